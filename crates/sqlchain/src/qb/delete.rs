//! DELETE statement builder.

use crate::error::{SqlError, SqlResult};
use crate::fragment::Fragment;
use crate::placeholder::PlaceholderFormat;
use crate::qb::clauses::{ClauseSet, push_shared, write_returning};
use crate::qb::traits::{MutationQb, SqlQb};
use crate::value::Value;
use std::sync::Arc;

/// DELETE statement builder.
///
/// A DELETE without WHERE parts deletes every row; no implicit guard is added.
#[derive(Clone, Debug, Default)]
pub struct DeleteQb {
    format: PlaceholderFormat,
    table: String,
    returning: Arc<Vec<String>>,
    pub(crate) clauses: ClauseSet,
}

impl DeleteQb {
    /// Create a new DELETE builder for a table.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Set the placeholder format used by [`SqlQb::build`].
    pub fn with_placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the target table.
    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Add RETURNING columns.
    pub fn returning(mut self, column: impl Into<String>) -> Self {
        push_shared(&mut self.returning, column.into());
        self
    }

    impl_filter_methods!();
}

impl Fragment for DeleteQb {
    fn write_sql(&self, out: &mut String, args: &mut Vec<Value>) -> SqlResult<()> {
        if self.table.is_empty() {
            return Err(SqlError::missing("delete", "a table"));
        }

        self.clauses.write_prefixes(out, args)?;
        out.push_str("DELETE FROM ");
        out.push_str(&self.table);
        self.clauses.write_tail(out, args)?;
        write_returning(&self.returning, out);
        self.clauses.write_suffixes(out, args)
    }
}

impl SqlQb for DeleteQb {
    fn statement_kind(&self) -> &'static str {
        "delete"
    }

    fn placeholder_format(&self) -> PlaceholderFormat {
        self.format
    }
}

impl MutationQb for DeleteQb {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_with_where() {
        let (sql, args) = DeleteQb::new("sessions")
            .lt("expires_at", 1_700_000_000)
            .to_sql()
            .unwrap();
        assert_eq!(sql, "DELETE FROM sessions WHERE expires_at < ?");
        assert_eq!(args, vec![Value::Int(1_700_000_000)]);
    }

    #[test]
    fn delete_without_where_is_unguarded() {
        let (sql, _) = DeleteQb::new("t").to_sql().unwrap();
        assert_eq!(sql, "DELETE FROM t");
    }

    #[test]
    fn requires_table() {
        let err = DeleteQb::new("").eq("id", 1).to_sql().unwrap_err();
        assert!(err.is_missing_field());
        assert_eq!(err.to_string(), "delete statements must specify a table");
    }

    #[test]
    fn from_sets_table_and_returning() {
        let (sql, _) = DeleteQb::default()
            .from("users")
            .in_list("id", [1, 2])
            .returning("id")
            .returning("email")
            .to_sql()
            .unwrap();
        assert_eq!(sql, "DELETE FROM users WHERE id IN (?,?) RETURNING id, email");
    }

    #[test]
    fn offset_without_limit_is_dropped() {
        let (sql, _) = DeleteQb::new("t").eq("a", 1).offset(5).to_sql().unwrap();
        assert_eq!(sql, "DELETE FROM t WHERE a = ?");
    }
}
