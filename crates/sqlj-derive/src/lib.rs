//! Derive macros for sqlj
//!
//! Provides `#[derive(Record)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod record;

/// Derive `sqlj::Record` and `sqlj::FromRow` for a struct.
///
/// # Example
///
/// ```ignore
/// use sqlj::Record;
///
/// #[derive(Debug, Default, Record)]
/// struct User {
///     #[orm(column = "id")]
///     id: i64,
///     #[orm(column = "user_name")]
///     name: String,
///     // not persisted
///     login_count: u32,
/// }
/// ```
///
/// # Attributes
///
/// - `#[orm(column = "name")]` - Persist the field as column `name`
///
/// Only tagged fields are persisted, in declaration order. Untagged fields are
/// filled with `Default::default()` when a row is read. Persisted field types
/// must implement `Clone`, `ToSql` and `FromSql`.
#[proc_macro_derive(Record, attributes(orm))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
