//! Convenient imports for typical `sqlj` usage.
//!
//! ```ignore
//! use sqlj::prelude::*;
//! ```

pub use crate::{
    Db, DbError, DbOptions, DbResult, Expression, Field, FromRow, GenericClient, InsertOptions,
    OrderSpec, PageRequest, Param, Record, RowExt, WhereClause, params,
};

#[cfg(feature = "tracing")]
pub use crate::TracingClient;

#[cfg(feature = "pool")]
pub use crate::{create_pool, create_pool_with_config};
