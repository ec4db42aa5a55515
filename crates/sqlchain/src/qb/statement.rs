//! Parent builder sharing a placeholder format with the statements it creates.

use crate::placeholder::PlaceholderFormat;
use crate::qb::{DeleteQb, InsertQb, SelectQb, UpdateQb, WhereQb};

/// Parent builder carrying configuration shared by every statement it creates.
///
/// # Example
/// ```ignore
/// let psql = StatementBuilder::new().with_placeholder_format(PlaceholderFormat::Dollar);
/// let built = psql.select(["*"]).from("users").eq("id", 1).build()?;
/// assert_eq!(built.sql, "SELECT * FROM users WHERE id = $1");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatementBuilder {
    format: PlaceholderFormat,
}

impl StatementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder format inherited by statements created from now on.
    pub fn with_placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    pub fn placeholder_format(&self) -> PlaceholderFormat {
        self.format
    }

    pub fn select<S: Into<String>>(&self, columns: impl IntoIterator<Item = S>) -> SelectQb {
        SelectQb::new()
            .with_placeholder_format(self.format)
            .columns(columns)
    }

    pub fn insert(&self, table: impl Into<String>) -> InsertQb {
        InsertQb::new(table).with_placeholder_format(self.format)
    }

    pub fn update(&self, table: impl Into<String>) -> UpdateQb {
        UpdateQb::new(table).with_placeholder_format(self.format)
    }

    pub fn delete(&self, table: impl Into<String>) -> DeleteQb {
        DeleteQb::new(table).with_placeholder_format(self.format)
    }

    pub fn filter(&self) -> WhereQb {
        WhereQb::new().with_placeholder_format(self.format)
    }
}
