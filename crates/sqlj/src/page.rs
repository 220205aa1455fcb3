//! Ordering and page requests.

use crate::error::{DbError, DbResult};

/// One `ORDER BY` term. `direction` is passed through as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    pub column: String,
    pub direction: String,
}

impl OrderSpec {
    pub fn new(column: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: direction.into(),
        }
    }

    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, "ASC")
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, "DESC")
    }

    /// `"<column> <direction>"`
    pub fn render(&self) -> String {
        if self.direction.is_empty() {
            self.column.clone()
        } else {
            format!("{} {}", self.column, self.direction)
        }
    }
}

/// A request for one page of an ordered result set.
///
/// Pages are only stable across calls when the rows have a deterministic order,
/// so at least one [`OrderSpec`] is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page_number: u64,
    pub page_size: u64,
    pub order: Vec<OrderSpec>,
}

impl PageRequest {
    pub fn new(page_number: u64, page_size: u64, order: Vec<OrderSpec>) -> Self {
        Self {
            page_number,
            page_size,
            order,
        }
    }

    /// Check the request before any SQL is built.
    pub fn validate(&self) -> DbResult<()> {
        if self.page_number < 1 {
            return Err(DbError::invalid_argument(
                "page number must be greater than 0",
            ));
        }
        if self.page_size < 1 {
            return Err(DbError::invalid_argument("page size must be greater than 0"));
        }
        if self.order.is_empty() {
            return Err(DbError::invalid_argument(
                "page request must include at least one order by",
            ));
        }
        Ok(())
    }

    /// `(limit, offset)` as Postgres `bigint` values.
    pub fn limit_offset(&self) -> DbResult<(i64, i64)> {
        self.validate()?;

        let overflow = || {
            DbError::invalid_argument(format!(
                "page {} of size {} is out of range",
                self.page_number, self.page_size
            ))
        };

        let offset = (self.page_number - 1)
            .checked_mul(self.page_size)
            .and_then(|o| i64::try_from(o).ok())
            .ok_or_else(overflow)?;
        let limit = i64::try_from(self.page_size).map_err(|_| overflow())?;

        Ok((limit, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_name() -> Vec<OrderSpec> {
        vec![OrderSpec::asc("name")]
    }

    #[test]
    fn first_page_starts_at_zero() {
        let req = PageRequest::new(1, 10, by_name());
        assert_eq!(req.limit_offset().unwrap(), (10, 0));
    }

    #[test]
    fn second_page_offset() {
        let req = PageRequest::new(2, 10, by_name());
        assert_eq!(req.limit_offset().unwrap(), (10, 10));
    }

    #[test]
    fn rejects_page_zero() {
        let err = PageRequest::new(0, 10, by_name()).validate().unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn rejects_size_zero() {
        let err = PageRequest::new(1, 0, by_name()).validate().unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn rejects_missing_order() {
        let err = PageRequest::new(1, 10, vec![]).validate().unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn rejects_overflowing_offset() {
        let err = PageRequest::new(u64::MAX, u64::MAX, by_name())
            .limit_offset()
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn order_render_passes_direction_through() {
        assert_eq!(OrderSpec::desc("created_at").render(), "created_at DESC");
        assert_eq!(
            OrderSpec::new("lower(name)", "ASC NULLS LAST").render(),
            "lower(name) ASC NULLS LAST"
        );
        assert_eq!(OrderSpec::new("id", "").render(), "id");
    }
}
