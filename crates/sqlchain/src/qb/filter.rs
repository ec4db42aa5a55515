//! Clause-only builder: joins, WHERE and the clauses after it, without a statement head.

use crate::error::SqlResult;
use crate::fragment::{Fragment, write_joined};
use crate::placeholder::PlaceholderFormat;
use crate::qb::clauses::ClauseSet;
use crate::qb::traits::BuiltQuery;
use crate::value::Value;

/// Accumulates joins and WHERE/GROUP BY/HAVING/ORDER BY/LIMIT/OFFSET clauses
/// and renders them on their own, starting with a space.
///
/// Useful for appending a dynamic filter to hand-written SQL:
///
/// ```ignore
/// let (tail, args) = qb::filter().eq("username", ["moe", "larry"]).to_sql()?;
/// // " WHERE username IN (?,?)"
/// let sql = format!("SELECT * FROM users{tail}");
/// ```
#[derive(Clone, Debug, Default)]
pub struct WhereQb {
    format: PlaceholderFormat,
    pub(crate) clauses: ClauseSet,
}

impl WhereQb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder format used by [`WhereQb::build`].
    pub fn with_placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    pub fn placeholder_format(&self) -> PlaceholderFormat {
        self.format
    }

    /// Render and rewrite placeholders.
    ///
    /// Numbering starts at 1, so the result is only directly usable when the
    /// surrounding SQL has no placeholders of its own in a numbered format.
    pub fn build(&self) -> SqlResult<BuiltQuery> {
        let (sql, params) = self.to_sql()?;
        Ok(BuiltQuery::new(self.format.replace_placeholders(&sql), params))
    }

    impl_join_group_methods!();

    impl_filter_methods!();
}

impl Fragment for WhereQb {
    fn write_sql(&self, out: &mut String, args: &mut Vec<Value>) -> SqlResult<()> {
        write_joined(&self.clauses.prefixes, " ", out, args)?;
        self.clauses.write_joins(out, args)?;
        self.clauses.write_tail(out, args)?;
        self.clauses.write_suffixes(out, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_list_renders_where_only() {
        let (sql, args) = WhereQb::new()
            .eq("username", ["moe", "larry", "curly", "shemp"])
            .to_sql()
            .unwrap();
        assert_eq!(sql, " WHERE username IN (?,?,?,?)");
        assert_eq!(
            args,
            vec![
                Value::from("moe"),
                Value::from("larry"),
                Value::from("curly"),
                Value::from("shemp")
            ]
        );
    }

    #[test]
    fn empty_filter_renders_nothing() {
        let (sql, args) = WhereQb::new().to_sql().unwrap();
        assert_eq!(sql, "");
        assert!(args.is_empty());
    }

    #[test]
    fn clause_order_is_fixed() {
        let (sql, _) = WhereQb::new()
            .limit(10)
            .order_by("id")
            .having("COUNT(*) > 1")
            .group_by("kind")
            .eq("a", 1)
            .offset(30)
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            " WHERE a = ? GROUP BY kind HAVING COUNT(*) > 1 ORDER BY id LIMIT 10 OFFSET 30"
        );
    }

    #[test]
    fn joins_precede_where() {
        let (sql, _) = WhereQb::new()
            .eq("b.flag", true)
            .inner_join("b ON b.id = a.b_id")
            .to_sql()
            .unwrap();
        assert_eq!(sql, " INNER JOIN b ON b.id = a.b_id WHERE b.flag = ?");
    }

    #[test]
    fn build_with_dollar() {
        let built = WhereQb::new()
            .with_placeholder_format(PlaceholderFormat::Dollar)
            .gt("age", 18)
            .lt_or_eq("age", 65)
            .build()
            .unwrap();
        assert_eq!(built.sql, " WHERE age > $1 AND age <= $2");
    }
}
