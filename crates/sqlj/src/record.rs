//! The record adapter: mapping a struct to persisted columns and back.

use crate::field::Field;
use crate::row::FromRow;

/// A struct whose tagged attributes map to table columns.
///
/// Usually derived:
///
/// ```ignore
/// use sqlj::Record;
///
/// #[derive(Debug, Default, Record)]
/// struct User {
///     #[orm(column = "id")]
///     id: i64,
///     #[orm(column = "name")]
///     name: String,
///     // untagged: not persisted, filled with `Default::default()` on read
///     display_cache: Option<String>,
/// }
/// ```
pub trait Record: FromRow {
    /// Persisted column names, in declared attribute order.
    fn columns() -> &'static [&'static str];

    /// One bound field per persisted attribute, in the same order as [`Record::columns`].
    fn fields(&self) -> Vec<Field>;
}
