//! SELECT statement builder.

use crate::error::{SqlError, SqlResult};
use crate::fragment::{Fragment, Raw, write_joined};
use crate::placeholder::PlaceholderFormat;
use crate::qb::clauses::{ClauseSet, extend_shared, push_shared};
use crate::qb::traits::SqlQb;
use crate::value::Value;
use std::sync::Arc;

/// A result column or FROM source: raw SQL or an aliased sub-select.
#[derive(Clone, Debug)]
enum Part {
    Raw(Raw),
    Subquery(Box<SelectQb>, String),
}

impl Fragment for Part {
    fn write_sql(&self, out: &mut String, args: &mut Vec<Value>) -> SqlResult<()> {
        match self {
            Part::Raw(raw) => raw.write_sql(out, args),
            Part::Subquery(select, alias) => {
                out.push('(');
                select.write_sql(out, args)?;
                out.push_str(") AS ");
                out.push_str(alias);
                Ok(())
            }
        }
    }
}

/// SELECT statement builder.
///
/// Every method returns a new snapshot; clones share clause lists until one
/// side extends them.
///
/// # Example
/// ```ignore
/// let (sql, args) = qb::select(["id", "name"])
///     .from("users")
///     .eq("status", "active")
///     .order_by("created_at DESC")
///     .limit(20)
///     .to_sql()?;
/// // SELECT id, name FROM users WHERE status = ? ORDER BY created_at DESC LIMIT 20
/// ```
#[derive(Clone, Debug, Default)]
pub struct SelectQb {
    format: PlaceholderFormat,
    options: Arc<Vec<String>>,
    columns: Arc<Vec<Part>>,
    from: Option<Arc<Part>>,
    pub(crate) clauses: ClauseSet,
}

impl SelectQb {
    /// Create an empty SELECT builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder format used by [`SqlQb::build`].
    pub fn with_placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    // ==================== SELECT list ====================

    /// Add `DISTINCT` to the statement options.
    pub fn distinct(self) -> Self {
        self.options(["DISTINCT"])
    }

    /// Add keywords placed right after `SELECT` (e.g. `SQL_NO_CACHE`).
    pub fn options<S: Into<String>>(mut self, options: impl IntoIterator<Item = S>) -> Self {
        extend_shared(&mut self.options, options.into_iter().map(Into::into));
        self
    }

    /// Append result columns.
    pub fn columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        extend_shared(
            &mut self.columns,
            columns.into_iter().map(|c| Part::Raw(Raw::new(c))),
        );
        self
    }

    /// Append one result column, which may carry arguments.
    ///
    /// # Example
    /// ```ignore
    /// qb::select(["id"]).column(Raw::with_args("COALESCE(nick, ?) AS nick", ["anon"]))
    /// ```
    pub fn column(mut self, column: impl Into<Raw>) -> Self {
        push_shared(&mut self.columns, Part::Raw(column.into()));
        self
    }

    /// Append a sub-select as a result column: `(SELECT ...) AS alias`.
    pub fn column_select(mut self, select: SelectQb, alias: impl Into<String>) -> Self {
        push_shared(
            &mut self.columns,
            Part::Subquery(Box::new(select), alias.into()),
        );
        self
    }

    // ==================== FROM ====================

    /// Set the FROM table (or any FROM expression, e.g. `"users u"`).
    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.from = Some(Arc::new(Part::Raw(Raw::new(table))));
        self
    }

    /// Select from a sub-select: `FROM (SELECT ...) AS alias`.
    pub fn from_select(mut self, select: SelectQb, alias: impl Into<String>) -> Self {
        self.from = Some(Arc::new(Part::Subquery(Box::new(select), alias.into())));
        self
    }

    impl_join_group_methods!();

    impl_filter_methods!();
}

impl Fragment for SelectQb {
    fn write_sql(&self, out: &mut String, args: &mut Vec<Value>) -> SqlResult<()> {
        if self.columns.is_empty() {
            return Err(SqlError::missing("select", "at least one column"));
        }

        self.clauses.write_prefixes(out, args)?;
        out.push_str("SELECT ");
        for option in self.options.iter() {
            out.push_str(option);
            out.push(' ');
        }
        if !write_joined(&self.columns, ", ", out, args)? {
            return Err(SqlError::missing("select", "at least one column"));
        }
        if let Some(from) = &self.from {
            out.push_str(" FROM ");
            from.write_sql(out, args)?;
        }
        self.clauses.write_joins(out, args)?;
        self.clauses.write_tail(out, args)?;
        self.clauses.write_suffixes(out, args)
    }
}

impl SqlQb for SelectQb {
    fn statement_kind(&self) -> &'static str {
        "select"
    }

    fn placeholder_format(&self) -> PlaceholderFormat {
        self.format
    }
}
