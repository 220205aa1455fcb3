//! Bound parameter values.

use std::fmt;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A clone-friendly bound value.
///
/// Query values are shared between a base [`FluentQuery`](crate::FluentQuery) and every
/// query branched from it, so the value lives behind an `Arc` and cloning a `Param`
/// never copies the underlying data.
#[derive(Clone)]
pub struct Param(Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Wrap any `ToSql` value.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// Borrow the value in the form `tokio-postgres` expects.
    pub fn as_sql_ref(&self) -> &(dyn ToSql + Sync) {
        &*self.0 as &(dyn ToSql + Sync)
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// Borrow a list of params as `tokio-postgres` parameter refs.
pub fn param_refs(params: &[Param]) -> Vec<&(dyn ToSql + Sync)> {
    params.iter().map(Param::as_sql_ref).collect()
}

/// Build a `Vec<Param>` from heterogeneous values.
///
/// ```ignore
/// let q = db.from("posts").r#where("author_id = ? AND status = ?", params![42_i64, "draft"]);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::Param>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Param::new($value)),+]
    };
}
