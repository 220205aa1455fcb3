//! SQL text assembly for INSERT/UPDATE/DELETE/SELECT.
//!
//! Every builder is a pure function from a borrowed spec to a [`BuiltStatement`].
//! Nothing here fails: an empty table name or an unknown column is the database's
//! problem, not the builder's.
//!
//! Placeholder numbering rules:
//!
//! - INSERT/UPDATE: a bound field takes the next `$n`; a literal field is spliced in
//!   verbatim and takes none. UPDATE's trailing id placeholder is `$<bound + 1>`.
//! - SELECT/DELETE: the WHERE clause's markers take `$1..$m`. SELECT then numbers
//!   `LIMIT` before `OFFSET`, so the value list must carry the limit before the offset.

mod delete;
mod insert;
mod select;
mod update;

pub use delete::{DeleteSpec, build_delete};
pub use insert::{InsertSpec, build_insert};
pub use select::{SelectSpec, build_select};
pub use update::{UpdateSpec, build_update};

/// Statement text plus the number of `$n` placeholders it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltStatement {
    pub sql: String,
    pub placeholders: usize,
}

impl BuiltStatement {
    pub(crate) fn new(sql: String, placeholders: usize) -> Self {
        Self { sql, placeholders }
    }
}

impl std::fmt::Display for BuiltStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)
    }
}
