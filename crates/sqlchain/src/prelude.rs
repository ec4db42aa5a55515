//! Convenient imports for typical `sqlchain` usage.
//!
//! ```ignore
//! use sqlchain::prelude::*;
//! ```

pub use crate::{
    Expr, Fragment, FromRow, GenericClient, MutationQb, PlaceholderFormat, Raw, RowExt, Single,
    SqlError, SqlQb, SqlResult, StatementBuilder, Value, qb,
};
