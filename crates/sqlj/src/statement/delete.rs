//! DELETE statement assembly.

use super::BuiltStatement;
use crate::expr::{WhereClause, build_where_clause};

/// Inputs for a DELETE statement.
#[derive(Debug, Clone, Copy)]
pub struct DeleteSpec<'a> {
    pub table: &'a str,
    pub where_clauses: &'a [WhereClause],
}

/// `DELETE FROM <table> [WHERE <clauses>]`
pub fn build_delete(spec: &DeleteSpec<'_>) -> BuiltStatement {
    let mut sql = format!("DELETE FROM {}", spec.table);

    let (where_sql, placeholders) = build_where_clause(spec.where_clauses);
    if !where_sql.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_sql);
    }

    BuiltStatement::new(sql, placeholders)
}
