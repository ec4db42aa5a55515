//! Expression layer for WHERE/HAVING conditions.
//!
//! [`Expr`] is the closed set of condition fragments:
//! - raw SQL with `?` markers
//! - column predicates ([`Predicate`]) for `=`, `<>`, `>`, `>=`, `<`, `<=`
//! - AND / OR groups and NOT
//!
//! Groups parenthesize a child only when the child is a group of the other
//! kind, so `a AND (b OR c)` keeps its meaning while `a AND b AND c` stays flat.
//! A child that renders to empty text is dropped together with its joiner.

use crate::error::{SqlError, SqlResult};
use crate::fragment::{Fragment, Raw};
use crate::value::Value;

/// Comparison operator of a [`Predicate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    NotEq,
    Gt,
    GtOrEq,
    Lt,
    LtOrEq,
}

impl CompareOp {
    pub fn as_sql(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "<>",
            CompareOp::Gt => ">",
            CompareOp::GtOrEq => ">=",
            CompareOp::Lt => "<",
            CompareOp::LtOrEq => "<=",
        }
    }

    /// Equality operators accept NULL and lists; ordering operators do not.
    pub fn is_equality(self) -> bool {
        matches!(self, CompareOp::Eq | CompareOp::NotEq)
    }
}

/// What an empty list renders to in an `IN` / `NOT IN` predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EmptyList {
    /// `1=0`
    AlwaysFalse,
    /// `1=1`
    AlwaysTrue,
}

impl EmptyList {
    pub fn as_sql(self) -> &'static str {
        match self {
            EmptyList::AlwaysFalse => "1=0",
            EmptyList::AlwaysTrue => "1=1",
        }
    }
}

/// An ordered set of `column <op> value` comparisons joined with AND.
///
/// Columns render in insertion order, so the argument order is stable.
///
/// # Example
/// ```ignore
/// let p = Predicate::eq().column("status", "active").column("deleted_at", Value::Null);
/// // status = ? AND deleted_at IS NULL
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Predicate {
    op: CompareOp,
    columns: Vec<(String, Value)>,
    empty_list: EmptyList,
}

impl Predicate {
    /// Create an empty predicate. Empty lists default to `1=0` for `Eq`
    /// and `1=1` for `NotEq`.
    pub fn new(op: CompareOp) -> Self {
        let empty_list = if op == CompareOp::NotEq {
            EmptyList::AlwaysTrue
        } else {
            EmptyList::AlwaysFalse
        };
        Self {
            op,
            columns: Vec::new(),
            empty_list,
        }
    }

    pub fn eq() -> Self {
        Self::new(CompareOp::Eq)
    }

    pub fn not_eq() -> Self {
        Self::new(CompareOp::NotEq)
    }

    pub fn gt() -> Self {
        Self::new(CompareOp::Gt)
    }

    pub fn gt_or_eq() -> Self {
        Self::new(CompareOp::GtOrEq)
    }

    pub fn lt() -> Self {
        Self::new(CompareOp::Lt)
    }

    pub fn lt_or_eq() -> Self {
        Self::new(CompareOp::LtOrEq)
    }

    /// Build a predicate from `(column, value)` pairs, keeping their order.
    pub fn from_pairs<K, V>(op: CompareOp, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        pairs
            .into_iter()
            .fold(Self::new(op), |p, (k, v)| p.column(k, v))
    }

    /// Append a column comparison.
    pub fn column(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.columns.push((name.into(), value.into()));
        self
    }

    /// Override what an empty list renders to.
    pub fn on_empty_list(mut self, policy: EmptyList) -> Self {
        self.empty_list = policy;
        self
    }

    pub fn op(&self) -> CompareOp {
        self.op
    }

    pub fn columns(&self) -> &[(String, Value)] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn write_column(
        &self,
        column: &str,
        value: &Value,
        out: &mut String,
        args: &mut Vec<Value>,
    ) -> SqlResult<()> {
        let negated = self.op == CompareOp::NotEq;
        match value {
            Value::Null | Value::List(_) if !self.op.is_equality() => {
                return Err(SqlError::ValueNotComparable {
                    column: column.to_string(),
                    op: self.op.as_sql(),
                    kind: value.kind(),
                });
            }
            Value::Null => {
                out.push_str(column);
                out.push_str(if negated { " IS NOT NULL" } else { " IS NULL" });
            }
            Value::List(items) if items.is_empty() => {
                out.push_str(self.empty_list.as_sql());
            }
            Value::List(items) => {
                out.push_str(column);
                out.push_str(if negated { " NOT IN (" } else { " IN (" });
                for i in 0..items.len() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push('?');
                }
                out.push(')');
                args.extend(items.iter().cloned());
            }
            scalar => {
                out.push_str(column);
                out.push(' ');
                out.push_str(self.op.as_sql());
                out.push_str(" ?");
                args.push(scalar.clone());
            }
        }
        Ok(())
    }
}

impl Fragment for Predicate {
    fn write_sql(&self, out: &mut String, args: &mut Vec<Value>) -> SqlResult<()> {
        for (i, (column, value)) in self.columns.iter().enumerate() {
            if i > 0 {
                out.push_str(" AND ");
            }
            self.write_column(column, value, out, args)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Joiner {
    And,
    Or,
}

impl Joiner {
    fn separator(self) -> &'static str {
        match self {
            Joiner::And => " AND ",
            Joiner::Or => " OR ",
        }
    }
}

/// Expression node for building WHERE/HAVING clauses.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// SQL text with `?` markers and one argument per marker.
    Raw(Raw),

    /// Column comparisons.
    Compare(Predicate),

    /// AND group: all conditions must be true.
    And(Vec<Expr>),

    /// OR group: at least one condition must be true.
    Or(Vec<Expr>),

    /// NOT: negate the inner expression.
    Not(Box<Expr>),
}

impl Default for Expr {
    fn default() -> Self {
        Expr::empty()
    }
}

impl Expr {
    /// An expression that renders to nothing.
    pub fn empty() -> Self {
        Expr::And(Vec::new())
    }

    /// Create an AND expression from a list of expressions.
    pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Self {
        Expr::And(exprs.into_iter().collect())
    }

    /// Create an OR expression from a list of expressions.
    pub fn or(exprs: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Or(exprs.into_iter().collect())
    }

    /// Create an AND expression from dynamic inputs, failing on the first
    /// input that cannot be a fragment.
    pub fn try_and<T: IntoExpr>(items: impl IntoIterator<Item = T>) -> SqlResult<Self> {
        let exprs = items
            .into_iter()
            .map(IntoExpr::into_expr)
            .collect::<SqlResult<Vec<_>>>()?;
        Ok(Expr::And(exprs))
    }

    /// Create an OR expression from dynamic inputs, failing on the first
    /// input that cannot be a fragment.
    pub fn try_or<T: IntoExpr>(items: impl IntoIterator<Item = T>) -> SqlResult<Self> {
        let exprs = items
            .into_iter()
            .map(IntoExpr::into_expr)
            .collect::<SqlResult<Vec<_>>>()?;
        Ok(Expr::Or(exprs))
    }

    /// Create a NOT expression.
    pub fn not(expr: Expr) -> Self {
        Expr::Not(Box::new(expr))
    }

    /// column = value (`IS NULL` for NULL, `IN (...)` for lists)
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Expr::Compare(Predicate::eq().column(column, value))
    }

    /// column <> value (`IS NOT NULL` for NULL, `NOT IN (...)` for lists)
    pub fn not_eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Expr::Compare(Predicate::not_eq().column(column, value))
    }

    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Expr::Compare(Predicate::gt().column(column, value))
    }

    pub fn gt_or_eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Expr::Compare(Predicate::gt_or_eq().column(column, value))
    }

    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Expr::Compare(Predicate::lt().column(column, value))
    }

    pub fn lt_or_eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Expr::Compare(Predicate::lt_or_eq().column(column, value))
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Expr::eq(column, Value::Null)
    }

    pub fn is_not_null(column: impl Into<String>) -> Self {
        Expr::not_eq(column, Value::Null)
    }

    /// column IN (values...); an empty list renders `1=0`.
    pub fn in_list<T: Into<Value>>(column: impl Into<String>, values: impl IntoIterator<Item = T>) -> Self {
        Expr::eq(column, Value::list(values))
    }

    /// column NOT IN (values...); an empty list renders `1=1`.
    pub fn not_in<T: Into<Value>>(column: impl Into<String>, values: impl IntoIterator<Item = T>) -> Self {
        Expr::not_eq(column, Value::list(values))
    }

    /// Raw SQL fragment without arguments.
    pub fn raw(sql: impl Into<String>) -> Self {
        Expr::Raw(Raw::new(sql))
    }

    /// Raw SQL fragment with one argument per `?` marker.
    ///
    /// # Example
    /// ```ignore
    /// Expr::raw_with("a = ? OR b = ?", [1, 2])
    /// ```
    pub fn raw_with<T: Into<Value>>(sql: impl Into<String>, args: impl IntoIterator<Item = T>) -> Self {
        Expr::Raw(Raw::with_args(sql, args))
    }

    /// A single bound argument (`?`), for SET and VALUES positions.
    pub fn bind(value: impl Into<Value>) -> Self {
        Expr::Raw(Raw::with_args("?", [value.into()]))
    }

    /// Check if this expression contains no conditions.
    pub fn is_empty(&self) -> bool {
        match self {
            Expr::And(exprs) | Expr::Or(exprs) => exprs.iter().all(Expr::is_empty),
            Expr::Not(inner) => inner.is_empty(),
            Expr::Compare(p) => p.is_empty(),
            Expr::Raw(raw) => raw.is_empty(),
        }
    }

    /// The boolean operator joining this node's top-level terms, if any.
    fn joiner(&self) -> Option<Joiner> {
        match self {
            Expr::And(_) => Some(Joiner::And),
            Expr::Or(_) => Some(Joiner::Or),
            Expr::Compare(p) if p.len() > 1 => Some(Joiner::And),
            _ => None,
        }
    }
}

fn write_group(
    children: &[Expr],
    joiner: Joiner,
    out: &mut String,
    args: &mut Vec<Value>,
) -> SqlResult<()> {
    let mut first = true;
    for child in children {
        let (text, mut child_args) = child.to_sql()?;
        if text.is_empty() {
            continue;
        }
        if !first {
            out.push_str(joiner.separator());
        }
        if child.joiner().is_some_and(|j| j != joiner) {
            out.push('(');
            out.push_str(&text);
            out.push(')');
        } else {
            out.push_str(&text);
        }
        args.append(&mut child_args);
        first = false;
    }
    Ok(())
}

/// Render `parts` as an AND group (the form used by WHERE and HAVING).
pub(crate) fn write_conjunction(
    parts: &[Expr],
    out: &mut String,
    args: &mut Vec<Value>,
) -> SqlResult<()> {
    write_group(parts, Joiner::And, out, args)
}

impl Fragment for Expr {
    fn write_sql(&self, out: &mut String, args: &mut Vec<Value>) -> SqlResult<()> {
        match self {
            Expr::Raw(raw) => raw.write_sql(out, args),
            Expr::Compare(p) => p.write_sql(out, args),
            Expr::And(children) => write_group(children, Joiner::And, out, args),
            Expr::Or(children) => write_group(children, Joiner::Or, out, args),
            Expr::Not(inner) => {
                let (text, mut inner_args) = inner.to_sql()?;
                if !text.is_empty() {
                    out.push_str("NOT (");
                    out.push_str(&text);
                    out.push(')');
                    args.append(&mut inner_args);
                }
                Ok(())
            }
        }
    }
}

impl From<Predicate> for Expr {
    fn from(p: Predicate) -> Self {
        Expr::Compare(p)
    }
}

impl From<Raw> for Expr {
    fn from(raw: Raw) -> Self {
        Expr::Raw(raw)
    }
}

impl From<&str> for Expr {
    fn from(sql: &str) -> Self {
        Expr::raw(sql)
    }
}

impl From<String> for Expr {
    fn from(sql: String) -> Self {
        Expr::raw(sql)
    }
}

/// Fallible conversion into an [`Expr`].
///
/// Typed fragments always convert; a dynamic [`Value`] converts only when it
/// is text (raw SQL) or NULL (nothing).
pub trait IntoExpr {
    fn into_expr(self) -> SqlResult<Expr>;
}

impl IntoExpr for Expr {
    fn into_expr(self) -> SqlResult<Expr> {
        Ok(self)
    }
}

impl IntoExpr for Predicate {
    fn into_expr(self) -> SqlResult<Expr> {
        Ok(Expr::Compare(self))
    }
}

impl IntoExpr for Raw {
    fn into_expr(self) -> SqlResult<Expr> {
        Ok(Expr::Raw(self))
    }
}

impl IntoExpr for &str {
    fn into_expr(self) -> SqlResult<Expr> {
        Ok(Expr::raw(self))
    }
}

impl IntoExpr for String {
    fn into_expr(self) -> SqlResult<Expr> {
        Ok(Expr::raw(self))
    }
}

impl IntoExpr for Value {
    fn into_expr(self) -> SqlResult<Expr> {
        Expr::try_from(self)
    }
}

impl TryFrom<Value> for Expr {
    type Error = SqlError;

    fn try_from(value: Value) -> SqlResult<Self> {
        match value {
            Value::Null => Ok(Expr::empty()),
            Value::Text(sql) => Ok(Expr::raw(sql)),
            other => Err(SqlError::UnsupportedFragmentKind(format!(
                "{} value cannot be used as a condition",
                other.kind()
            ))),
        }
    }
}
