//! # sqlj
//!
//! Parameterized Postgres statement construction with a thin execution layer.
//!
//! ## Features
//!
//! - **`?` markers**: write conditions with `?`; they are renumbered to `$1..$n`
//!   in text order, and markers inside single-quoted literals are left alone
//! - **Record mapping**: `#[derive(Record)]` maps tagged struct fields to columns
//! - **Immutable queries**: every [`FluentQuery`] builder returns a new query, so a
//!   base query can be branched without the branches seeing each other
//! - **Literal fields**: splice raw SQL such as `now()` into an INSERT by name
//! - **Transaction-friendly**: pass a transaction anywhere a `GenericClient` is expected
//! - **Logging**: wrap any client in [`TracingClient`] to log SQL through `tracing`
//!
//! ## Usage
//!
//! ```ignore
//! use sqlj::prelude::*;
//!
//! #[derive(Debug, Default, Record)]
//! struct Post {
//!     #[orm(column = "id")]
//!     id: i64,
//!     #[orm(column = "title")]
//!     title: String,
//! }
//!
//! let db = Db::new(&client);
//!
//! let post = db.insert_with_literals("posts", &post, [("created_at", "now()")]).await?;
//!
//! let posts: Vec<Post> = db
//!     .from("posts")
//!     .r#where("author_id = ?", params![author_id])
//!     .where_expr(
//!         Expression::nested(vec![
//!             WhereClause::and("status = ?"),
//!             WhereClause::or("pinned"),
//!         ]),
//!         params!["published"],
//!     )
//!     .page(&PageRequest::new(1, 20, vec![OrderSpec::desc("id")]))
//!     .await?;
//! ```

pub mod client;
pub mod db;
pub mod error;
pub mod expr;
pub mod field;
pub mod fluent;
pub mod options;
pub mod page;
pub mod param;
pub mod placeholder;
pub mod prelude;
pub mod record;
pub mod row;
pub mod statement;

pub use client::GenericClient;
pub use db::{Db, InsertOptions};
pub use error::{DbError, DbResult};
pub use expr::{Connector, Expression, WhereClause};
pub use field::Field;
pub use fluent::FluentQuery;
pub use options::DbOptions;
pub use page::{OrderSpec, PageRequest};
pub use param::Param;
pub use record::Record;
pub use row::{FromRow, RowExt};
pub use statement::BuiltStatement;

#[cfg(feature = "tracing")]
pub mod monitor;

#[cfg(feature = "tracing")]
pub use monitor::{StatementKind, TracingClient};

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};

#[cfg(feature = "derive")]
pub use sqlj_derive::Record;

// Used by code generated from `#[derive(Record)]`
#[doc(hidden)]
pub use tokio_postgres;

#[cfg(test)]
mod test_support;
