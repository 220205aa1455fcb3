//! `tracing` instrumentation for SQL execution.
//!
//! [`TracingClient`] wraps any [`GenericClient`] and emits one event per statement
//! on the `sqlj.sql` target **before** it is sent to the server, so the exact SQL
//! and parameter count show up in logs even when the statement then fails.
//!
//! ```ignore
//! let client = sqlj::TracingClient::new(pg_client).max_sql_length(500);
//! let db = sqlj::Db::new(client);
//! ```

use crate::client::GenericClient;
use crate::error::DbResult;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;
use tracing::Level;

/// The kind of SQL statement being executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Other,
}

impl StatementKind {
    /// Detect the statement kind from its leading keyword.
    pub fn from_sql(sql: &str) -> Self {
        fn starts_with_keyword(s: &str, keyword: &str) -> bool {
            match s.get(0..keyword.len()) {
                Some(prefix) => prefix.eq_ignore_ascii_case(keyword),
                None => false,
            }
        }

        let s = sql.trim_start_matches(|c: char| c.is_whitespace() || c == '(');
        if starts_with_keyword(s, "SELECT") || starts_with_keyword(s, "WITH") {
            StatementKind::Select
        } else if starts_with_keyword(s, "INSERT") {
            StatementKind::Insert
        } else if starts_with_keyword(s, "UPDATE") {
            StatementKind::Update
        } else if starts_with_keyword(s, "DELETE") {
            StatementKind::Delete
        } else {
            StatementKind::Other
        }
    }
}

/// Cut `sql` to at most `max_bytes`, backing off to a char boundary.
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// A [`GenericClient`] that logs every statement through `tracing`.
#[derive(Debug, Clone)]
pub struct TracingClient<C> {
    client: C,
    level: Level,
    max_sql_length: Option<usize>,
}

impl<C: GenericClient> TracingClient<C> {
    /// Wrap `client`, logging at DEBUG and truncating SQL to 200 bytes.
    pub fn new(client: C) -> Self {
        Self {
            client,
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    /// The wrapped client.
    pub fn inner(&self) -> &C {
        &self.client
    }

    pub fn into_inner(self) -> C {
        self.client
    }

    fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }

    fn before(&self, sql: &str, param_count: usize) {
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        let shown = self.truncate_sql(sql);
        emit_at_level!(
            self.level,
            target: "sqlj.sql",
            statement = ?StatementKind::from_sql(sql),
            param_count,
            sql = %shown,
            "executing statement"
        );
    }

    fn after<T>(&self, sql: &str, result: DbResult<T>) -> DbResult<T> {
        if let Err(err) = &result {
            tracing::warn!(
                target: "sqlj.sql",
                statement = ?StatementKind::from_sql(sql),
                error = %err,
                "statement failed"
            );
        }
        result
    }
}

impl<C: GenericClient> GenericClient for TracingClient<C> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DbResult<Vec<Row>> {
        self.before(sql, params.len());
        let result = self.client.query(sql, params).await;
        self.after(sql, result)
    }

    async fn query_one(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DbResult<Row> {
        self.before(sql, params.len());
        let result = self.client.query_one(sql, params).await;
        self.after(sql, result)
    }

    async fn query_one_strict(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> DbResult<Row> {
        self.before(sql, params.len());
        let result = self.client.query_one_strict(sql, params).await;
        self.after(sql, result)
    }

    async fn query_opt(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DbResult<Option<Row>> {
        self.before(sql, params.len());
        let result = self.client.query_opt(sql, params).await;
        self.after(sql, result)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DbResult<u64> {
        self.before(sql, params.len());
        let result = self.client.execute(sql, params).await;
        self.after(sql, result)
    }
}
