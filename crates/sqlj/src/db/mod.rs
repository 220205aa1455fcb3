//! Table operations over a [`GenericClient`].

use crate::client::GenericClient;
use crate::error::{DbError, DbResult};
use crate::expr::{WhereClause, column_eq};
use crate::field::{self, Field};
use crate::fluent::FluentQuery;
use crate::options::DbOptions;
use crate::param::{Param, param_refs};
use crate::placeholder;
use crate::record::Record;
use crate::row::FromRow;
use crate::statement::{
    BuiltStatement, DeleteSpec, InsertSpec, SelectSpec, UpdateSpec, build_delete, build_insert,
    build_select, build_update,
};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// Extra fields merged into an INSERT.
///
/// Fields here replace the record's fields of the same name, so a
/// [`Field::literal`] such as `created_at = now()` overrides the struct value.
#[derive(Debug, Clone, Default)]
pub struct InsertOptions {
    pub fields: Vec<Field>,
}

impl InsertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one override field.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}

/// Entry point for running statements: a client plus the options every
/// operation shares.
///
/// `C` can be an owned client, a borrowed one (`&client`), a transaction, or a
/// [`TracingClient`](crate::TracingClient) wrapping any of those.
///
/// ```ignore
/// let db = Db::new(&client);
/// let user: User = db.get("users", 1_i64).await?;
/// let active: Vec<User> = db
///     .from("users")
///     .r#where("status = ?", params!["active"])
///     .all()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct Db<C> {
    client: C,
    options: DbOptions,
}

impl<C: GenericClient> Db<C> {
    pub fn new(client: C) -> Self {
        Self::with_options(client, DbOptions::default())
    }

    pub fn with_options(client: C, options: DbOptions) -> Self {
        Self { client, options }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn options(&self) -> &DbOptions {
        &self.options
    }

    /// Start a fluent query against `table`.
    pub fn from(&self, table: impl Into<String>) -> FluentQuery<'_, C> {
        FluentQuery::new(self, table.into())
    }

    /// Fetch the row of `table` whose identifier column equals `id`.
    pub async fn get<T, I>(&self, table: &str, id: I) -> DbResult<T>
    where
        T: Record,
        I: ToSql + Send + Sync + 'static,
    {
        let columns = persisted_columns::<T>()?;
        let where_clauses = [WhereClause::and(column_eq(&self.options.id_column))];
        let built = build_select(&SelectSpec {
            where_clauses: &where_clauses,
            ..SelectSpec::new(columns, table)
        });
        self.fetch_one(&built, &[Param::new(id)]).await
    }

    /// Fetch every row of `table`.
    pub async fn select<T: Record>(&self, table: &str) -> DbResult<Vec<T>> {
        let columns = persisted_columns::<T>()?;
        let built = build_select(&SelectSpec::new(columns, table));
        self.fetch_all(&built, &[]).await
    }

    /// Run caller-written SQL and map exactly one row.
    ///
    /// `?` markers outside quotes are rewritten to `$n`; text already using `$n`
    /// passes through untouched.
    pub async fn get_row<T: FromRow>(&self, sql: &str, values: &[Param]) -> DbResult<T> {
        let built = raw_statement(sql, values);
        self.fetch_one(&built, values).await
    }

    /// Run caller-written SQL and map every row. Markers are handled as in
    /// [`Db::get_row`].
    pub async fn select_all<T: FromRow>(&self, sql: &str, values: &[Param]) -> DbResult<Vec<T>> {
        let built = raw_statement(sql, values);
        self.fetch_all(&built, values).await
    }

    /// Insert `record` and return the row as stored.
    pub async fn insert<T: Record>(&self, table: &str, record: &T) -> DbResult<T> {
        self.insert_with_options(table, record, InsertOptions::default())
            .await
    }

    /// Insert `record` with override fields.
    ///
    /// The record's fields and `options.fields` are merged by name (an override
    /// wins), then columns in [`DbOptions::skip_on_insert`] are dropped.
    pub async fn insert_with_options<T: Record>(
        &self,
        table: &str,
        record: &T,
        options: InsertOptions,
    ) -> DbResult<T> {
        let columns = persisted_columns::<T>()?;

        let mut fields = field::extract(record);
        fields.extend(options.fields);
        let fields = field::filter(field::dedupe(fields), &self.options.skip_on_insert);

        let built = build_insert(&InsertSpec {
            table,
            fields: &fields,
            returning: columns,
        });
        self.fetch_one(&built, &field::values(&fields)).await
    }

    /// Insert `record`, overriding the named columns with raw SQL.
    ///
    /// ```ignore
    /// let user = db.insert_with_literals("users", &user, [("created_at", "now()")]).await?;
    /// ```
    pub async fn insert_with_literals<T, I, N, S>(
        &self,
        table: &str,
        record: &T,
        literals: I,
    ) -> DbResult<T>
    where
        T: Record,
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<String>,
    {
        let fields = literals
            .into_iter()
            .map(|(name, raw_sql)| Field::literal(name, raw_sql))
            .collect();
        self.insert_with_options(table, record, InsertOptions { fields })
            .await
    }

    /// Overwrite the row identified by `id` with `record` and return it.
    pub async fn update<T, I>(&self, table: &str, id: I, record: &T) -> DbResult<T>
    where
        T: Record,
        I: ToSql + Send + Sync + 'static,
    {
        let columns = persisted_columns::<T>()?;
        let fields = field::filter(field::extract(record), &self.options.skip_on_insert);
        if fields.is_empty() {
            return Err(DbError::validation(format!(
                "update of {table}: no columns left to set"
            )));
        }

        let built = build_update(&UpdateSpec {
            table,
            fields: &fields,
            id_column: &self.options.id_column,
            returning: columns,
        });
        let mut values = field::values(&fields);
        values.push(Param::new(id));
        self.fetch_one(&built, &values).await
    }

    /// Delete the row identified by `id`. Returns the number of rows removed.
    pub async fn delete<I>(&self, table: &str, id: I) -> DbResult<u64>
    where
        I: ToSql + Send + Sync + 'static,
    {
        let where_clauses = [WhereClause::and(column_eq(&self.options.id_column))];
        let built = build_delete(&DeleteSpec {
            table,
            where_clauses: &where_clauses,
        });
        self.execute(&built, &[Param::new(id)]).await
    }

    pub(crate) async fn fetch_rows(
        &self,
        built: &BuiltStatement,
        values: &[Param],
    ) -> DbResult<Vec<Row>> {
        check_arity(built, values)?;
        self.client.query(&built.sql, &param_refs(values)).await
    }

    pub(crate) async fn fetch_all<T: FromRow>(
        &self,
        built: &BuiltStatement,
        values: &[Param],
    ) -> DbResult<Vec<T>> {
        let rows = self.fetch_rows(built, values).await?;
        rows.iter().map(T::from_row).collect()
    }

    pub(crate) async fn fetch_one_row(
        &self,
        built: &BuiltStatement,
        values: &[Param],
    ) -> DbResult<Row> {
        check_arity(built, values)?;
        self.client
            .query_one_strict(&built.sql, &param_refs(values))
            .await
    }

    pub(crate) async fn fetch_one<T: FromRow>(
        &self,
        built: &BuiltStatement,
        values: &[Param],
    ) -> DbResult<T> {
        let row = self.fetch_one_row(built, values).await?;
        T::from_row(&row)
    }

    pub(crate) async fn execute(&self, built: &BuiltStatement, values: &[Param]) -> DbResult<u64> {
        check_arity(built, values)?;
        self.client.execute(&built.sql, &param_refs(values)).await
    }
}

/// The persisted columns of `T`, or a validation error when it has none.
pub(crate) fn persisted_columns<T: Record>() -> DbResult<&'static [&'static str]> {
    let columns = T::columns();
    if columns.is_empty() {
        return Err(DbError::validation(format!(
            "{} has no persisted columns",
            std::any::type_name::<T>()
        )));
    }
    Ok(columns)
}

fn check_arity(built: &BuiltStatement, values: &[Param]) -> DbResult<()> {
    if built.placeholders != values.len() {
        return Err(DbError::validation(format!(
            "statement has {} placeholders but {} values were supplied: {}",
            built.placeholders,
            values.len(),
            built.sql
        )));
    }
    Ok(())
}

fn raw_statement(sql: &str, values: &[Param]) -> BuiltStatement {
    let (sql, markers) = placeholder::rewrite(sql, 0);
    // `$n` text has no markers to count; trust the caller's value list
    let placeholders = if markers == 0 { values.len() } else { markers };
    BuiltStatement::new(sql, placeholders)
}
