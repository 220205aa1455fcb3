//! Immutable, chainable queries against one table.

use crate::client::GenericClient;
use crate::db::{Db, persisted_columns};
use crate::error::{DbError, DbResult};
use crate::expr::{Connector, Expression, WhereClause, column_eq};
use crate::page::{OrderSpec, PageRequest};
use crate::param::Param;
use crate::record::Record;
use crate::statement::{BuiltStatement, DeleteSpec, SelectSpec, build_delete, build_select};
use tokio_postgres::types::ToSql;

/// A query under construction.
///
/// Every builder method takes `&self` and returns a new query, so a base query
/// can be branched freely:
///
/// ```ignore
/// let posts = db.from("posts").r#where("author_id = ?", params![author]);
/// let drafts: Vec<Post> = posts.r#where("status = ?", params!["draft"]).all().await?;
/// let total = posts.count().await?;
/// ```
///
/// Values are kept in call order, which is also the order their `?` markers are
/// numbered in once the clauses are rendered.
pub struct FluentQuery<'a, C> {
    db: &'a Db<C>,
    table: String,
    where_clauses: Vec<WhereClause>,
    values: Vec<Param>,
    order: Vec<OrderSpec>,
}

impl<C> Clone for FluentQuery<'_, C> {
    fn clone(&self) -> Self {
        Self {
            db: self.db,
            table: self.table.clone(),
            where_clauses: self.where_clauses.clone(),
            values: self.values.clone(),
            order: self.order.clone(),
        }
    }
}

impl<C> std::fmt::Debug for FluentQuery<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FluentQuery")
            .field("table", &self.table)
            .field("where_clauses", &self.where_clauses)
            .field("values", &self.values)
            .field("order", &self.order)
            .finish()
    }
}

impl<'a, C: GenericClient> FluentQuery<'a, C> {
    pub(crate) fn new(db: &'a Db<C>, table: String) -> Self {
        Self {
            db,
            table,
            where_clauses: Vec::new(),
            values: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Accumulated WHERE clauses.
    pub fn clauses(&self) -> &[WhereClause] {
        &self.where_clauses
    }

    /// Accumulated values, in marker order.
    pub fn values(&self) -> &[Param] {
        &self.values
    }

    /// AND a condition with `?` markers.
    pub fn r#where(
        &self,
        text: impl Into<String>,
        values: impl IntoIterator<Item = Param>,
    ) -> Self {
        self.push_clause(Connector::And, Expression::simple(text), values)
    }

    /// OR a condition with `?` markers.
    pub fn or_where(
        &self,
        text: impl Into<String>,
        values: impl IntoIterator<Item = Param>,
    ) -> Self {
        self.push_clause(Connector::Or, Expression::simple(text), values)
    }

    /// AND an expression, usually a parenthesized group.
    pub fn where_expr(
        &self,
        expression: impl Into<Expression>,
        values: impl IntoIterator<Item = Param>,
    ) -> Self {
        self.push_clause(Connector::And, expression.into(), values)
    }

    /// OR an expression.
    pub fn or_where_expr(
        &self,
        expression: impl Into<Expression>,
        values: impl IntoIterator<Item = Param>,
    ) -> Self {
        self.push_clause(Connector::Or, expression.into(), values)
    }

    /// Append an `ORDER BY` term. `direction` is emitted as written.
    pub fn order(&self, column: impl Into<String>, direction: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.order.push(OrderSpec::new(column, direction));
        next
    }

    fn push_clause(
        &self,
        connector: Connector,
        expression: Expression,
        values: impl IntoIterator<Item = Param>,
    ) -> Self {
        let mut next = self.clone();
        next.where_clauses.push(WhereClause::new(connector, expression));
        next.values.extend(values);
        next
    }

    /// The SELECT used by [`FluentQuery::all`] and [`FluentQuery::one`].
    pub fn select_statement(&self, columns: &[&str]) -> BuiltStatement {
        build_select(&SelectSpec {
            where_clauses: &self.where_clauses,
            order: &self.order,
            ..SelectSpec::new(columns, &self.table)
        })
    }

    /// The SELECT used by [`FluentQuery::page`], and its values.
    ///
    /// Ordering comes from `request` alone; `LIMIT` is numbered before `OFFSET`
    /// and the returned values end with the limit then the offset.
    pub fn page_statement(
        &self,
        columns: &[&str],
        request: &PageRequest,
    ) -> DbResult<(BuiltStatement, Vec<Param>)> {
        request.validate()?;
        let (limit, offset) = request.limit_offset()?;

        let built = build_select(&SelectSpec {
            where_clauses: &self.where_clauses,
            order: &request.order,
            limit: true,
            offset: true,
            ..SelectSpec::new(columns, &self.table)
        });

        let mut values = self.values.clone();
        values.push(Param::new(limit));
        values.push(Param::new(offset));
        Ok((built, values))
    }

    /// The `SELECT count(1)` used by [`FluentQuery::count`].
    pub fn count_statement(&self) -> BuiltStatement {
        build_select(&SelectSpec {
            where_clauses: &self.where_clauses,
            ..SelectSpec::new(&["count(1)"], &self.table)
        })
    }

    /// The DELETE used by [`FluentQuery::delete`].
    pub fn delete_statement(&self) -> BuiltStatement {
        build_delete(&DeleteSpec {
            table: &self.table,
            where_clauses: &self.where_clauses,
        })
    }

    /// Fetch the row whose identifier column equals `id`.
    ///
    /// Accumulated clauses are ignored.
    pub async fn get<T, I>(&self, id: I) -> DbResult<T>
    where
        T: Record,
        I: ToSql + Send + Sync + 'static,
    {
        let columns = persisted_columns::<T>()?;
        let where_clauses = [WhereClause::and(column_eq(&self.db.options().id_column))];
        let built = build_select(&SelectSpec {
            where_clauses: &where_clauses,
            ..SelectSpec::new(columns, &self.table)
        });
        self.db.fetch_one(&built, &[Param::new(id)]).await
    }

    /// Fetch exactly one matching row.
    ///
    /// Returns [`DbError::NotFound`] for zero rows and [`DbError::TooManyRows`]
    /// for more than one.
    pub async fn one<T: Record>(&self) -> DbResult<T> {
        let built = self.select_statement(persisted_columns::<T>()?);
        self.db.fetch_one(&built, &self.values).await
    }

    /// Fetch every matching row.
    pub async fn all<T: Record>(&self) -> DbResult<Vec<T>> {
        let built = self.select_statement(persisted_columns::<T>()?);
        self.db.fetch_all(&built, &self.values).await
    }

    /// Fetch one page of matching rows.
    ///
    /// The request is validated before any SQL is built.
    pub async fn page<T: Record>(&self, request: &PageRequest) -> DbResult<Vec<T>> {
        let (built, values) = self.page_statement(persisted_columns::<T>()?, request)?;
        self.db.fetch_all(&built, &values).await
    }

    /// Count matching rows.
    pub async fn count(&self) -> DbResult<u64> {
        let built = self.count_statement();
        let row = self.db.fetch_one_row(&built, &self.values).await?;
        let count: i64 = row
            .try_get(0)
            .map_err(|e| DbError::decode("count", e.to_string()))?;
        u64::try_from(count).map_err(|e| DbError::decode("count", e.to_string()))
    }

    /// Delete matching rows. Returns the number of rows removed.
    ///
    /// With no clauses this empties the table.
    pub async fn delete(&self) -> DbResult<u64> {
        let built = self.delete_statement();
        self.db.execute(&built, &self.values).await
    }
}
