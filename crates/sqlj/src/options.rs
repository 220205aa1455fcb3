//! Table-operation configuration.

use serde::Deserialize;

/// Options shared by every operation a [`Db`](crate::Db) runs.
///
/// Deserializable so it can sit inside an application's own config file:
///
/// ```toml
/// [database]
/// id_column = "id"
/// skip_on_insert = ["id", "created_at"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DbOptions {
    /// Identifier column used by `get`, `update` and `delete`.
    pub id_column: String,
    /// Column names left out of INSERT and UPDATE field lists.
    pub skip_on_insert: Vec<String>,
}

impl Default for DbOptions {
    fn default() -> Self {
        Self {
            id_column: "id".to_string(),
            skip_on_insert: vec!["id".to_string()],
        }
    }
}

impl DbOptions {
    /// Defaults: `id` identifier column, `id` skipped on insert.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifier column.
    pub fn with_id_column(mut self, column: impl Into<String>) -> Self {
        self.id_column = column.into();
        self
    }

    /// Replace the skip-on-insert list.
    pub fn with_skip_on_insert<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_on_insert = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Add one column to the skip-on-insert list.
    pub fn skip_on_insert(mut self, column: impl Into<String>) -> Self {
        self.skip_on_insert.push(column.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = DbOptions::default();
        assert_eq!(opts.id_column, "id");
        assert_eq!(opts.skip_on_insert, vec!["id"]);
    }

    #[test]
    fn builder_setters() {
        let opts = DbOptions::new()
            .with_id_column("user_id")
            .with_skip_on_insert(["user_id"])
            .skip_on_insert("created_at");
        assert_eq!(opts.id_column, "user_id");
        assert_eq!(opts.skip_on_insert, vec!["user_id", "created_at"]);
    }

    #[test]
    fn deserializes_with_missing_keys_defaulted() {
        let opts: DbOptions = serde_json::from_str(r#"{"id_column": "uuid"}"#).unwrap();
        assert_eq!(opts.id_column, "uuid");
        assert_eq!(opts.skip_on_insert, vec!["id"]);

        let opts: DbOptions = serde_json::from_str(r#"{"skip_on_insert": []}"#).unwrap();
        assert_eq!(opts.id_column, "id");
        assert!(opts.skip_on_insert.is_empty());
    }
}
