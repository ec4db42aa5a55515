//! Statement builders.
//!
//! Every builder accumulates clause fragments and renders them in a fixed
//! order into one SQL string plus an ordered argument list. Text is rendered
//! with the neutral `?` marker and rewritten into the builder's
//! [`PlaceholderFormat`](crate::PlaceholderFormat) by [`SqlQb::build`].
//!
//! # Usage
//!
//! ```ignore
//! use sqlchain::{qb, PlaceholderFormat, SqlQb, StatementBuilder};
//!
//! // SELECT
//! let (sql, args) = qb::select(["id", "name"])
//!     .from("users")
//!     .eq("status", "active")
//!     .order_by("created_at DESC")
//!     .limit(20)
//!     .to_sql()?;
//!
//! // PostgreSQL placeholders for everything created from `psql`
//! let psql = StatementBuilder::new().with_placeholder_format(PlaceholderFormat::Dollar);
//! psql.update("users")
//!     .set("status", "inactive")
//!     .eq("id", user_id)
//!     .execute(&client)
//!     .await?;
//!
//! // DELETE
//! psql.delete("sessions")
//!     .lt("expires_at", now)
//!     .execute(&client)
//!     .await?;
//! ```

#[macro_use]
mod macros;

pub(crate) mod clauses;
mod delete;
mod expr;
mod filter;
mod insert;
mod select;
mod statement;
mod traits;
mod update;

pub use delete::DeleteQb;
pub use expr::{CompareOp, EmptyList, Expr, IntoExpr, Predicate};
pub use filter::WhereQb;
pub use insert::InsertQb;
pub use select::SelectQb;
pub use statement::StatementBuilder;
pub use traits::{BuiltQuery, MutationQb, SqlQb};
pub use update::{SetValue, UpdateQb};

/// Create a SELECT builder with the given result columns.
///
/// # Example
/// ```ignore
/// let qb = sqlchain::qb::select(["*"]).from("users").eq("id", 1);
/// ```
pub fn select<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> SelectQb {
    SelectQb::new().columns(columns)
}

/// Create an INSERT builder for the given table.
pub fn insert(table: impl Into<String>) -> InsertQb {
    InsertQb::new(table)
}

/// Create an UPDATE builder for the given table.
pub fn update(table: impl Into<String>) -> UpdateQb {
    UpdateQb::new(table)
}

/// Create a DELETE builder for the given table.
///
/// No WHERE guard is added: without conditions every row is deleted.
pub fn delete(table: impl Into<String>) -> DeleteQb {
    DeleteQb::new(table)
}

/// Create a clause-only builder rendering ` WHERE ...` and the clauses after it.
pub fn filter() -> WhereQb {
    WhereQb::new()
}
