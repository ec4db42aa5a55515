//! Error types for sqlchain

use thiserror::Error;

/// Result type alias for sqlchain operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors raised while rendering or executing a statement
#[derive(Debug, Error)]
pub enum SqlError {
    /// A statement-level invariant is unmet (no table, no SET clause, ...)
    #[error("{statement} statements must specify {field}")]
    MissingRequiredField {
        statement: &'static str,
        field: &'static str,
    },

    /// An ordering comparison received NULL or a list
    #[error("cannot compare column '{column}' with {op}: {kind} value is not comparable")]
    ValueNotComparable {
        column: String,
        op: &'static str,
        kind: &'static str,
    },

    /// A value that cannot act as a SQL fragment was passed where one is expected
    #[error("unsupported fragment kind: {0}")]
    UnsupportedFragmentKind(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),

    /// An INSERT row does not have one value per column
    #[error("insert row {row} has {values} values for {columns} columns")]
    RowWidthMismatch {
        row: usize,
        columns: usize,
        values: usize,
    },
}

impl SqlError {
    /// Create a missing-field error for a statement kind
    pub fn missing(statement: &'static str, field: &'static str) -> Self {
        Self::MissingRequiredField { statement, field }
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Check if this is a missing-field error
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingRequiredField { .. })
    }

    /// Check if this is a not-comparable error
    pub fn is_not_comparable(&self) -> bool {
        matches!(self, Self::ValueNotComparable { .. })
    }

    /// Check if this is an INSERT row-width error
    pub fn is_row_width_mismatch(&self) -> bool {
        matches!(self, Self::RowWidthMismatch { .. })
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for SqlError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
