//! INSERT statement assembly.

use super::BuiltStatement;
use crate::field::Field;

/// Inputs for an INSERT ... RETURNING statement.
#[derive(Debug, Clone, Copy)]
pub struct InsertSpec<'a> {
    pub table: &'a str,
    pub fields: &'a [Field],
    pub returning: &'a [&'a str],
}

/// `INSERT INTO <table> (<names>) VALUES (<placeholders>) RETURNING <columns>`
///
/// With no fields the statement falls back to `DEFAULT VALUES`; with no returning
/// columns the `RETURNING` clause is omitted.
pub fn build_insert(spec: &InsertSpec<'_>) -> BuiltStatement {
    let mut sql = format!("INSERT INTO {}", spec.table);
    let mut bound = 0;

    if spec.fields.is_empty() {
        sql.push_str(" DEFAULT VALUES");
    } else {
        let mut names = Vec::with_capacity(spec.fields.len());
        let mut placeholders = Vec::with_capacity(spec.fields.len());

        for field in spec.fields {
            names.push(field.name());
            placeholders.push(field.placeholder(bound + 1));
            if !field.is_literal() {
                bound += 1;
            }
        }

        sql.push_str(" (");
        sql.push_str(&names.join(", "));
        sql.push_str(") VALUES (");
        sql.push_str(&placeholders.join(", "));
        sql.push(')');
    }

    if !spec.returning.is_empty() {
        sql.push_str(" RETURNING ");
        sql.push_str(&spec.returning.join(", "));
    }

    BuiltStatement::new(sql, bound)
}
