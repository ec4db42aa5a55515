//! UPDATE statement builder.

use crate::error::{SqlError, SqlResult};
use crate::fragment::Fragment;
use crate::placeholder::PlaceholderFormat;
use crate::qb::clauses::{ClauseSet, push_shared, write_returning};
use crate::qb::expr::Expr;
use crate::qb::traits::{MutationQb, SqlQb};
use crate::value::Value;
use std::sync::Arc;

/// Right-hand side of one SET clause.
#[derive(Clone, Debug, PartialEq)]
pub enum SetValue {
    /// `col = <expr>` (a bound value is `Expr::bind(v)`)
    Assign(Expr),
    /// `col = col + ?`
    Increment(Value),
    /// `col = col - ?`
    Decrement(Value),
}

impl SetValue {
    fn write_clause(&self, column: &str, out: &mut String, args: &mut Vec<Value>) -> SqlResult<()> {
        out.push_str(column);
        out.push_str(" = ");
        match self {
            SetValue::Assign(expr) => expr.write_sql(out, args)?,
            SetValue::Increment(delta) | SetValue::Decrement(delta) => {
                out.push_str(column);
                out.push_str(if matches!(self, SetValue::Increment(_)) {
                    " + ?"
                } else {
                    " - ?"
                });
                args.push(delta.clone());
            }
        }
        Ok(())
    }
}

/// UPDATE statement builder.
///
/// # Example
/// ```ignore
/// let (sql, args) = qb::update("users")
///     .set("status", "inactive")
///     .incr_by("version", 1)
///     .eq("id", 42)
///     .to_sql()?;
/// // UPDATE users SET status = ?, version = version + ? WHERE id = ?
/// ```
#[derive(Clone, Debug, Default)]
pub struct UpdateQb {
    format: PlaceholderFormat,
    table: String,
    set_clauses: Arc<Vec<(String, SetValue)>>,
    returning: Arc<Vec<String>>,
    pub(crate) clauses: ClauseSet,
}

impl UpdateQb {
    /// Create a new UPDATE builder for a table.
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
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Add a SET clause with an explicit [`SetValue`].
    pub fn set_value(mut self, column: impl Into<String>, value: SetValue) -> Self {
        push_shared(&mut self.set_clauses, (column.into(), value));
        self
    }

    /// SET column = ? (bound value)
    pub fn set(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_value(column, SetValue::Assign(Expr::bind(value)))
    }

    /// SET column = <expr> (e.g. `"NOW()"`)
    pub fn set_expr(self, column: impl Into<String>, expr: impl Into<Expr>) -> Self {
        self.set_value(column, SetValue::Assign(expr.into()))
    }

    /// Add one SET clause per `(column, value)` pair, sorted by column name.
    pub fn set_map<K, V>(self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut pairs: Vec<(String, Value)> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs
            .into_iter()
            .fold(self, |qb, (column, value)| qb.set(column, value))
    }

    /// SET column = column + ?
    pub fn incr_by(self, column: impl Into<String>, delta: impl Into<Value>) -> Self {
        self.set_value(column, SetValue::Increment(delta.into()))
    }

    /// SET column = column - ?
    pub fn decr_by(self, column: impl Into<String>, delta: impl Into<Value>) -> Self {
        self.set_value(column, SetValue::Decrement(delta.into()))
    }

    /// Add RETURNING columns.
    pub fn returning(mut self, column: impl Into<String>) -> Self {
        push_shared(&mut self.returning, column.into());
        self
    }

    impl_filter_methods!();
}

impl Fragment for UpdateQb {
    fn write_sql(&self, out: &mut String, args: &mut Vec<Value>) -> SqlResult<()> {
        if self.table.is_empty() {
            return Err(SqlError::missing("update", "a table"));
        }
        if self.set_clauses.is_empty() {
            return Err(SqlError::missing("update", "at least one SET clause"));
        }

        self.clauses.write_prefixes(out, args)?;
        out.push_str("UPDATE ");
        out.push_str(&self.table);
        out.push_str(" SET ");
        for (i, (column, value)) in self.set_clauses.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            value.write_clause(column, out, args)?;
        }
        self.clauses.write_tail(out, args)?;
        write_returning(&self.returning, out);
        self.clauses.write_suffixes(out, args)
    }
}

impl SqlQb for UpdateQb {
    fn statement_kind(&self) -> &'static str {
        "update"
    }

    fn placeholder_format(&self) -> PlaceholderFormat {
        self.format
    }
}

impl MutationQb for UpdateQb {}
