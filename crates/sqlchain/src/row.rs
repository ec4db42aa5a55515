//! Row mapping traits

use crate::error::{SqlError, SqlResult};
use tokio_postgres::Row;
use tokio_postgres::types::FromSql;

/// Trait for converting a database row into a Rust value.
///
/// # Example
///
/// ```ignore
/// use sqlchain::{FromRow, RowExt, SqlResult};
///
/// struct User {
///     id: i64,
///     username: String,
/// }
///
/// impl FromRow for User {
///     fn from_row(row: &tokio_postgres::Row) -> SqlResult<Self> {
///         Ok(Self {
///             id: row.try_get_column("id")?,
///             username: row.try_get_column("username")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> SqlResult<Self>;
}

/// The first column of a row, for single-value queries such as
/// `SELECT COUNT(*)` or `INSERT ... RETURNING id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Single<T>(pub T);

impl<T> Single<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> FromRow for Single<T>
where
    T: for<'a> FromSql<'a>,
{
    fn from_row(row: &Row) -> SqlResult<Self> {
        row.try_get(0)
            .map(Single)
            .map_err(|e| SqlError::decode("0", e.to_string()))
    }
}

/// Extension trait for Row to provide typed access
pub trait RowExt {
    /// Try to get a column value, returning [`SqlError::Decode`] on failure
    fn try_get_column<T>(&self, column: &str) -> SqlResult<T>
    where
        T: for<'a> FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> SqlResult<T>
    where
        T: for<'a> FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| SqlError::decode(column, e.to_string()))
    }
}
