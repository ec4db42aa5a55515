//! # sqlchain
//!
//! Composable SQL statement builder with dialect-pluggable placeholders.
//!
//! ## Features
//!
//! - **Fragments all the way down**: predicates, AND/OR groups, raw SQL and whole
//!   statements render to text plus an ordered argument list
//! - **Deterministic output**: multi-column predicates keep insertion order
//! - **Fixed clause order**: WHERE, GROUP BY, HAVING, ORDER BY, LIMIT, OFFSET
//!   regardless of call order
//! - **Pluggable placeholders**: `?`, `$n`, `:n`, `@pn`, or any [`PlaceholderStyle`]
//! - **Cheap snapshots**: builders are copy-on-write values
//! - **Thin execution layer**: run statements through any [`GenericClient`]
//!
//! ## Example
//!
//! ```ignore
//! use sqlchain::{qb, Expr, PlaceholderFormat, SqlQb};
//!
//! let built = qb::select(["id", "name"])
//!     .with_placeholder_format(PlaceholderFormat::Dollar)
//!     .from("users")
//!     .eq("status", "active")
//!     .or([Expr::eq("role", "admin"), Expr::gt("karma", 1000)])
//!     .order_by("created_at DESC")
//!     .limit(20)
//!     .build()?;
//!
//! assert_eq!(
//!     built.sql,
//!     "SELECT id, name FROM users WHERE status = $1 AND (role = $2 OR karma > $3) \
//!      ORDER BY created_at DESC LIMIT 20"
//! );
//! ```

pub mod client;
pub mod debug;
pub mod error;
pub mod fragment;
pub mod placeholder;
pub mod prelude;
pub mod qb;
pub mod row;
pub mod value;

pub use client::GenericClient;
pub use debug::debug_sql;
pub use error::{SqlError, SqlResult};
pub use fragment::{Fragment, Raw};
pub use placeholder::{PlaceholderFormat, PlaceholderStyle, count_markers, replace_placeholders};
pub use row::{FromRow, RowExt, Single};
pub use value::Value;

pub use qb::{
    BuiltQuery, CompareOp, DeleteQb, EmptyList, Expr, InsertQb, IntoExpr, MutationQb, Predicate,
    SelectQb, SetValue, SqlQb, StatementBuilder, UpdateQb, WhereQb, delete, filter, insert, select,
    update,
};
