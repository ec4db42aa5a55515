//! INSERT statement builder.

use crate::error::{SqlError, SqlResult};
use crate::fragment::{Fragment, Raw};
use crate::placeholder::PlaceholderFormat;
use crate::qb::clauses::{ClauseSet, extend_shared, push_shared, write_returning};
use crate::qb::expr::Expr;
use crate::qb::select::SelectQb;
use crate::qb::traits::{MutationQb, SqlQb};
use crate::value::Value;
use std::sync::Arc;

/// INSERT statement builder.
///
/// Rows are either bound values or expressions such as `NOW()`:
///
/// ```ignore
/// let (sql, args) = qb::insert("users")
///     .columns(["name", "created_at"])
///     .values_expr([Expr::bind("alice"), Expr::raw("NOW()")])
///     .to_sql()?;
/// // INSERT INTO users (name,created_at) VALUES (?,NOW())
/// ```
#[derive(Clone, Debug, Default)]
pub struct InsertQb {
    format: PlaceholderFormat,
    table: String,
    options: Arc<Vec<String>>,
    columns: Arc<Vec<String>>,
    rows: Arc<Vec<Vec<Expr>>>,
    select: Option<Arc<SelectQb>>,
    returning: Arc<Vec<String>>,
    clauses: ClauseSet,
}

impl InsertQb {
    /// Create a new INSERT builder for a table.
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
    pub fn into(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Add keywords placed right after `INSERT` (e.g. `IGNORE`).
    pub fn options<S: Into<String>>(mut self, options: impl IntoIterator<Item = S>) -> Self {
        extend_shared(&mut self.options, options.into_iter().map(Into::into));
        self
    }

    /// Append column names.
    pub fn columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        extend_shared(&mut self.columns, columns.into_iter().map(Into::into));
        self
    }

    /// Add a row of bound values.
    pub fn values<T: Into<Value>>(self, row: impl IntoIterator<Item = T>) -> Self {
        self.values_expr(row.into_iter().map(Expr::bind))
    }

    /// Add a row whose entries are expressions; their arguments are spliced in order.
    pub fn values_expr(mut self, row: impl IntoIterator<Item = Expr>) -> Self {
        push_shared(&mut self.rows, row.into_iter().collect());
        self
    }

    /// Append one column and its bound value to the first row.
    ///
    /// Meant for single-row inserts: with more than one row the other rows
    /// are left short and rendering fails.
    pub fn set(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_expr(column, Expr::bind(value))
    }

    /// Append one column and its expression to the first row.
    ///
    /// See [`InsertQb::set`] for multi-row behavior.
    pub fn set_expr(mut self, column: impl Into<String>, expr: impl Into<Expr>) -> Self {
        push_shared(&mut self.columns, column.into());
        let rows = Arc::make_mut(&mut self.rows);
        match rows.first_mut() {
            Some(row) => row.push(expr.into()),
            None => rows.push(vec![expr.into()]),
        }
        self
    }

    /// Set columns and one row of values from `(column, value)` pairs.
    ///
    /// Pairs are sorted by column name so map inputs render deterministically.
    pub fn set_map<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut pairs: Vec<(String, Value)> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        let (columns, row): (Vec<String>, Vec<Expr>) = pairs
            .into_iter()
            .map(|(k, v)| (k, Expr::bind(v)))
            .unzip();
        self.columns = Arc::new(columns);
        self.rows = Arc::new(vec![row]);
        self
    }

    /// Insert the result of a SELECT instead of VALUES.
    pub fn select(mut self, select: SelectQb) -> Self {
        self.select = Some(Arc::new(select));
        self
    }

    /// Add RETURNING columns.
    pub fn returning(mut self, column: impl Into<String>) -> Self {
        push_shared(&mut self.returning, column.into());
        self
    }

    /// Add SQL placed before the statement.
    pub fn prefix(mut self, raw: impl Into<Raw>) -> Self {
        push_shared(&mut self.clauses.prefixes, raw.into());
        self
    }

    /// Add SQL placed after the statement (e.g. an `ON CONFLICT` clause).
    pub fn suffix(mut self, raw: impl Into<Raw>) -> Self {
        push_shared(&mut self.clauses.suffixes, raw.into());
        self
    }

    /// Every row must have one value per column when columns are listed.
    fn check_row_widths(&self) -> SqlResult<()> {
        if self.columns.is_empty() || self.select.is_some() {
            return Ok(());
        }
        let columns = self.columns.len();
        match self.rows.iter().position(|row| row.len() != columns) {
            Some(i) => Err(SqlError::RowWidthMismatch {
                row: i + 1,
                columns,
                values: self.rows[i].len(),
            }),
            None => Ok(()),
        }
    }

    fn write_values(&self, out: &mut String, args: &mut Vec<Value>) -> SqlResult<()> {
        out.push_str("VALUES ");
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push('(');
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    out.push(',');
                }
                value.write_sql(out, args)?;
            }
            out.push(')');
        }
        Ok(())
    }
}

impl Fragment for InsertQb {
    fn write_sql(&self, out: &mut String, args: &mut Vec<Value>) -> SqlResult<()> {
        if self.table.is_empty() {
            return Err(SqlError::missing("insert", "a table"));
        }
        if self.rows.is_empty() && self.select.is_none() {
            return Err(SqlError::missing("insert", "values or a select"));
        }
        self.check_row_widths()?;

        self.clauses.write_prefixes(out, args)?;
        out.push_str("INSERT ");
        for option in self.options.iter() {
            out.push_str(option);
            out.push(' ');
        }
        out.push_str("INTO ");
        out.push_str(&self.table);
        out.push(' ');
        if !self.columns.is_empty() {
            out.push('(');
            out.push_str(&self.columns.join(","));
            out.push_str(") ");
        }

        match &self.select {
            Some(select) => select.write_sql(out, args)?,
            None => self.write_values(out, args)?,
        }

        write_returning(&self.returning, out);
        self.clauses.write_suffixes(out, args)
    }
}

impl SqlQb for InsertQb {
    fn statement_kind(&self) -> &'static str {
        "insert"
    }

    fn placeholder_format(&self) -> PlaceholderFormat {
        self.format
    }
}

impl MutationQb for InsertQb {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_row() {
        let (sql, args) = InsertQb::new("users")
            .columns(["name", "age"])
            .values([Value::from("alice"), Value::from(30)])
            .to_sql()
            .unwrap();
        assert_eq!(sql, "INSERT INTO users (name,age) VALUES (?,?)");
        assert_eq!(args, vec![Value::from("alice"), Value::Int(30)]);
    }

    #[test]
    fn multiple_rows_keep_order() {
        let (sql, args) = InsertQb::new("t")
            .columns(["a", "b"])
            .values([1, 2])
            .values([3, 4])
            .to_sql()
            .unwrap();
        assert_eq!(sql, "INSERT INTO t (a,b) VALUES (?,?),(?,?)");
        assert_eq!(
            args,
            vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]
        );
    }

    #[test]
    fn expression_values_splice_args() {
        let (sql, args) = InsertQb::new("events")
            .columns(["kind", "at", "score"])
            .values_expr([
                Expr::bind("login"),
                Expr::raw("NOW()"),
                Expr::raw_with("GREATEST(?, ?)", [1, 2]),
            ])
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO events (kind,at,score) VALUES (?,NOW(),GREATEST(?, ?))"
        );
        assert_eq!(args, vec![Value::from("login"), Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn set_builds_first_row() {
        let (sql, args) = InsertQb::new("users")
            .set("name", "bob")
            .set_expr("created_at", "NOW()")
            .returning("id")
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO users (name,created_at) VALUES (?,NOW()) RETURNING id"
        );
        assert_eq!(args, vec![Value::from("bob")]);
    }

    #[test]
    fn set_after_several_rows_fails() {
        let err = InsertQb::new("t")
            .columns(["a"])
            .values([1])
            .values([2])
            .set("b", 3)
            .to_sql()
            .unwrap_err();
        assert!(err.is_row_width_mismatch());
        assert_eq!(err.to_string(), "insert row 2 has 1 values for 2 columns");
    }

    #[test]
    fn row_width_must_match_columns() {
        let err = InsertQb::new("t")
            .columns(["a", "b"])
            .values([1, 2])
            .values([3, 4, 5])
            .to_sql()
            .unwrap_err();
        assert!(err.is_row_width_mismatch());

        // Without a column list the rows are passed through as given.
        let (sql, _) = InsertQb::new("t").values([1, 2]).values([3]).to_sql().unwrap();
        assert_eq!(sql, "INSERT INTO t VALUES (?,?),(?)");
    }

    #[test]
    fn set_map_sorts_columns() {
        let (sql, args) = InsertQb::new("t")
            .set_map([("b", 2), ("a", 1), ("c", 3)])
            .to_sql()
            .unwrap();
        assert_eq!(sql, "INSERT INTO t (a,b,c) VALUES (?,?,?)");
        assert_eq!(args, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn options_prefix_suffix() {
        let (sql, _) = InsertQb::new("t")
            .options(["IGNORE"])
            .columns(["a"])
            .values([1])
            .prefix("/* batch */")
            .suffix("ON CONFLICT DO NOTHING")
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "/* batch */ INSERT IGNORE INTO t (a) VALUES (?) ON CONFLICT DO NOTHING"
        );
    }

    #[test]
    fn insert_select() {
        let source = SelectQb::new()
            .columns(["id", "name"])
            .from("staging")
            .eq("ready", true);
        let (sql, args) = InsertQb::new("users")
            .columns(["id", "name"])
            .select(source)
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO users (id,name) SELECT id, name FROM staging WHERE ready = ?"
        );
        assert_eq!(args, vec![Value::Bool(true)]);
    }

    #[test]
    fn requires_table_and_values() {
        let err = InsertQb::new("").values([1]).to_sql().unwrap_err();
        assert!(err.is_missing_field());
        assert!(err.to_string().contains("table"));

        let err = InsertQb::new("users").columns(["a"]).to_sql().unwrap_err();
        assert!(err.to_string().contains("values or a select"));
    }
}
