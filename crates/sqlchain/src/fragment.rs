//! The fragment capability and the raw SQL escape hatch.

use crate::error::SqlResult;
use crate::value::Value;

/// A piece of SQL that renders to text plus its ordered arguments.
///
/// Rendered text uses the neutral `?` marker (`??` for a literal `?`).
/// Dialect placeholders are only produced when a whole statement is built.
pub trait Fragment {
    /// Append this fragment's text to `out` and its arguments to `args`.
    ///
    /// On error the contents of `out` and `args` are unspecified and must be discarded.
    fn write_sql(&self, out: &mut String, args: &mut Vec<Value>) -> SqlResult<()>;

    /// Render into a fresh buffer.
    fn to_sql(&self) -> SqlResult<(String, Vec<Value>)> {
        let mut out = String::new();
        let mut args = Vec::new();
        self.write_sql(&mut out, &mut args)?;
        Ok((out, args))
    }
}

impl<F: Fragment + ?Sized> Fragment for &F {
    fn write_sql(&self, out: &mut String, args: &mut Vec<Value>) -> SqlResult<()> {
        (**self).write_sql(out, args)
    }
}

/// A literal SQL snippet with positional arguments.
///
/// No validation is performed: a mismatch between markers and arguments only
/// surfaces when the statement is executed or debug-rendered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Raw {
    sql: String,
    args: Vec<Value>,
}

impl Raw {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            args: Vec::new(),
        }
    }

    /// Raw SQL with one argument per `?` marker.
    pub fn with_args<T: Into<Value>>(sql: impl Into<String>, args: impl IntoIterator<Item = T>) -> Self {
        Self {
            sql: sql.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

impl Fragment for Raw {
    fn write_sql(&self, out: &mut String, args: &mut Vec<Value>) -> SqlResult<()> {
        out.push_str(&self.sql);
        args.extend(self.args.iter().cloned());
        Ok(())
    }
}

impl From<&str> for Raw {
    fn from(sql: &str) -> Self {
        Raw::new(sql)
    }
}

impl From<String> for Raw {
    fn from(sql: String) -> Self {
        Raw::new(sql)
    }
}

/// Write `parts` separated by `sep`, skipping parts that render empty.
///
/// Returns whether anything was written.
pub(crate) fn write_joined<F: Fragment>(
    parts: &[F],
    sep: &str,
    out: &mut String,
    args: &mut Vec<Value>,
) -> SqlResult<bool> {
    let mut wrote = false;
    for part in parts {
        let mut text = String::new();
        let mut part_args = Vec::new();
        part.write_sql(&mut text, &mut part_args)?;
        if text.is_empty() {
            continue;
        }
        if wrote {
            out.push_str(sep);
        }
        out.push_str(&text);
        args.append(&mut part_args);
        wrote = true;
    }
    Ok(wrote)
}
