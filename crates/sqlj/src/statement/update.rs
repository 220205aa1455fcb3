//! UPDATE statement assembly.

use super::BuiltStatement;
use crate::field::Field;

/// Inputs for an UPDATE-by-id ... RETURNING statement.
#[derive(Debug, Clone, Copy)]
pub struct UpdateSpec<'a> {
    pub table: &'a str,
    pub fields: &'a [Field],
    pub id_column: &'a str,
    pub returning: &'a [&'a str],
}

/// `UPDATE <table> SET <name = placeholder, ...> WHERE <id_column> = $<n> RETURNING <columns>`
///
/// `n` is one past the number of bound fields: literal fields do not shift the id
/// placeholder. Values must be supplied as the bound field values followed by the id.
pub fn build_update(spec: &UpdateSpec<'_>) -> BuiltStatement {
    let mut bound = 0;
    let set: Vec<String> = spec
        .fields
        .iter()
        .map(|field| {
            let placeholder = field.placeholder(bound + 1);
            if !field.is_literal() {
                bound += 1;
            }
            format!("{} = {}", field.name(), placeholder)
        })
        .collect();

    let mut sql = format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        spec.table,
        set.join(", "),
        spec.id_column,
        bound + 1
    );

    if !spec.returning.is_empty() {
        sql.push_str(" RETURNING ");
        sql.push_str(&spec.returning.join(", "));
    }

    BuiltStatement::new(sql, bound + 1)
}
