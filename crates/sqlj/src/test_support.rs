//! Test doubles shared by unit tests.

use crate::client::GenericClient;
use crate::error::DbResult;
use std::sync::Mutex;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// One statement seen by [`RecordingClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Call {
    pub sql: String,
    /// `Debug` rendering of each parameter, in order.
    pub params: Vec<String>,
}

/// Records every statement and returns no rows.
///
/// `execute` reports `affected` rows.
#[derive(Default)]
pub(crate) struct RecordingClient {
    calls: Mutex<Vec<Call>>,
    affected: u64,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn affecting(affected: u64) -> Self {
        Self {
            affected,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last(&self) -> Call {
        self.calls().pop().expect("no statement recorded")
    }

    fn record(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) {
        self.calls.lock().unwrap().push(Call {
            sql: sql.to_string(),
            params: params.iter().map(|p| format!("{p:?}")).collect(),
        });
    }
}

impl GenericClient for RecordingClient {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DbResult<Vec<Row>> {
        self.record(sql, params);
        Ok(Vec::new())
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DbResult<u64> {
        self.record(sql, params);
        Ok(self.affected)
    }
}
