//! SELECT statement assembly.

use std::fmt::Write;

use super::BuiltStatement;
use crate::expr::{WhereClause, build_where_clause};
use crate::page::OrderSpec;

/// Inputs for a SELECT statement.
#[derive(Debug, Clone, Copy)]
pub struct SelectSpec<'a> {
    pub columns: &'a [&'a str],
    pub table: &'a str,
    pub where_clauses: &'a [WhereClause],
    pub order: &'a [OrderSpec],
    /// Emit `LIMIT $n`
    pub limit: bool,
    /// Emit `OFFSET $n`
    pub offset: bool,
}

impl<'a> SelectSpec<'a> {
    /// `SELECT <columns> FROM <table>` with no clauses.
    pub fn new(columns: &'a [&'a str], table: &'a str) -> Self {
        Self {
            columns,
            table,
            where_clauses: &[],
            order: &[],
            limit: false,
            offset: false,
        }
    }
}

/// `SELECT <columns> FROM <table> [WHERE ...] [ORDER BY ...] [LIMIT $m+1] [OFFSET $m+2]`
///
/// The WHERE clause consumes `$1..$m`. `LIMIT` is numbered before `OFFSET`.
pub fn build_select(spec: &SelectSpec<'_>) -> BuiltStatement {
    let mut sql = format!("SELECT {} FROM {}", spec.columns.join(", "), spec.table);

    let (where_sql, mut placeholders) = build_where_clause(spec.where_clauses);
    if !where_sql.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_sql);
    }

    if !spec.order.is_empty() {
        let order: Vec<String> = spec.order.iter().map(OrderSpec::render).collect();
        sql.push_str(" ORDER BY ");
        sql.push_str(&order.join(", "));
    }

    if spec.limit {
        placeholders += 1;
        let _ = write!(&mut sql, " LIMIT ${}", placeholders);
    }

    if spec.offset {
        placeholders += 1;
        let _ = write!(&mut sql, " OFFSET ${}", placeholders);
    }

    BuiltStatement::new(sql, placeholders)
}
