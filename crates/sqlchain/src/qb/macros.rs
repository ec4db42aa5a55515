/// Generate the WHERE / ORDER BY / LIMIT / prefix / suffix builder methods
/// shared by every statement that owns a `clauses: ClauseSet` field.
///
/// Usage:
/// ```ignore
/// impl UpdateQb {
///     impl_filter_methods!();
/// }
/// ```
macro_rules! impl_filter_methods {
    () => {
        /// Add a WHERE part. Parts are ANDed together.
        pub fn where_(mut self, expr: impl Into<$crate::qb::Expr>) -> Self {
            $crate::qb::clauses::push_shared(&mut self.clauses.where_parts, expr.into());
            self
        }

        /// Add a WHERE part from a dynamic input.
        ///
        /// Fails when the input cannot act as a condition (see [`IntoExpr`](crate::qb::IntoExpr)).
        pub fn try_where(self, input: impl $crate::qb::IntoExpr) -> $crate::error::SqlResult<Self> {
            Ok(self.where_(input.into_expr()?))
        }

        /// Add WHERE: raw SQL with one argument per `?` marker.
        pub fn expr<T: Into<$crate::value::Value>>(
            self,
            sql: impl Into<String>,
            args: impl IntoIterator<Item = T>,
        ) -> Self {
            self.where_($crate::qb::Expr::raw_with(sql, args))
        }

        /// Add WHERE: column = value
        pub fn eq(self, column: impl Into<String>, value: impl Into<$crate::value::Value>) -> Self {
            self.where_($crate::qb::Expr::eq(column, value))
        }

        /// Add WHERE: column <> value
        pub fn not_eq(self, column: impl Into<String>, value: impl Into<$crate::value::Value>) -> Self {
            self.where_($crate::qb::Expr::not_eq(column, value))
        }

        /// Add WHERE: column > value
        pub fn gt(self, column: impl Into<String>, value: impl Into<$crate::value::Value>) -> Self {
            self.where_($crate::qb::Expr::gt(column, value))
        }

        /// Add WHERE: column >= value
        pub fn gt_or_eq(self, column: impl Into<String>, value: impl Into<$crate::value::Value>) -> Self {
            self.where_($crate::qb::Expr::gt_or_eq(column, value))
        }

        /// Add WHERE: column < value
        pub fn lt(self, column: impl Into<String>, value: impl Into<$crate::value::Value>) -> Self {
            self.where_($crate::qb::Expr::lt(column, value))
        }

        /// Add WHERE: column <= value
        pub fn lt_or_eq(self, column: impl Into<String>, value: impl Into<$crate::value::Value>) -> Self {
            self.where_($crate::qb::Expr::lt_or_eq(column, value))
        }

        /// Add WHERE: column IS NULL
        pub fn is_null(self, column: impl Into<String>) -> Self {
            self.where_($crate::qb::Expr::is_null(column))
        }

        /// Add WHERE: column IS NOT NULL
        pub fn is_not_null(self, column: impl Into<String>) -> Self {
            self.where_($crate::qb::Expr::is_not_null(column))
        }

        /// Add WHERE: column IN (values...)
        pub fn in_list<T: Into<$crate::value::Value>>(
            self,
            column: impl Into<String>,
            values: impl IntoIterator<Item = T>,
        ) -> Self {
            self.where_($crate::qb::Expr::in_list(column, values))
        }

        /// Add WHERE: column NOT IN (values...)
        pub fn not_in<T: Into<$crate::value::Value>>(
            self,
            column: impl Into<String>,
            values: impl IntoIterator<Item = T>,
        ) -> Self {
            self.where_($crate::qb::Expr::not_in(column, values))
        }

        /// Add an OR group as one WHERE part.
        pub fn or(self, exprs: impl IntoIterator<Item = $crate::qb::Expr>) -> Self {
            self.where_($crate::qb::Expr::or(exprs))
        }

        /// Add an ORDER BY term (e.g. `"created_at DESC"`).
        pub fn order_by(mut self, term: impl Into<String>) -> Self {
            $crate::qb::clauses::push_shared(&mut self.clauses.order_bys, term.into());
            self
        }

        /// Set LIMIT. Zero means no limit.
        pub fn limit(mut self, limit: u64) -> Self {
            self.clauses.limit = Some(limit);
            self
        }

        /// Set OFFSET. Only rendered together with a LIMIT.
        pub fn offset(mut self, offset: u64) -> Self {
            self.clauses.offset = Some(offset);
            self
        }

        /// Add SQL placed before the statement (e.g. a `WITH` clause).
        pub fn prefix(mut self, raw: impl Into<$crate::fragment::Raw>) -> Self {
            $crate::qb::clauses::push_shared(&mut self.clauses.prefixes, raw.into());
            self
        }

        /// Add SQL placed after the statement (e.g. `FOR UPDATE`).
        pub fn suffix(mut self, raw: impl Into<$crate::fragment::Raw>) -> Self {
            $crate::qb::clauses::push_shared(&mut self.clauses.suffixes, raw.into());
            self
        }
    };
}

/// Generate JOIN / GROUP BY / HAVING builder methods for SELECT-like statements.
macro_rules! impl_join_group_methods {
    () => {
        /// Add a join clause carrying its own keyword (e.g. `"JOIN b ON b.id = a.b_id"`).
        pub fn join_clause(mut self, raw: impl Into<$crate::fragment::Raw>) -> Self {
            $crate::qb::clauses::push_shared(&mut self.clauses.joins, raw.into());
            self
        }

        /// Add `JOIN <join>`.
        pub fn join(self, join: &str) -> Self {
            self.join_clause(format!("JOIN {join}"))
        }

        /// Add `JOIN <join>` with arguments for its `?` markers.
        pub fn join_with<T: Into<$crate::value::Value>>(
            self,
            join: &str,
            args: impl IntoIterator<Item = T>,
        ) -> Self {
            self.join_clause($crate::fragment::Raw::with_args(format!("JOIN {join}"), args))
        }

        /// Add `LEFT JOIN <join>`.
        pub fn left_join(self, join: &str) -> Self {
            self.join_clause(format!("LEFT JOIN {join}"))
        }

        /// Add `LEFT JOIN <join>` with arguments.
        pub fn left_join_with<T: Into<$crate::value::Value>>(
            self,
            join: &str,
            args: impl IntoIterator<Item = T>,
        ) -> Self {
            self.join_clause($crate::fragment::Raw::with_args(format!("LEFT JOIN {join}"), args))
        }

        /// Add `RIGHT JOIN <join>`.
        pub fn right_join(self, join: &str) -> Self {
            self.join_clause(format!("RIGHT JOIN {join}"))
        }

        /// Add `RIGHT JOIN <join>` with arguments.
        pub fn right_join_with<T: Into<$crate::value::Value>>(
            self,
            join: &str,
            args: impl IntoIterator<Item = T>,
        ) -> Self {
            self.join_clause($crate::fragment::Raw::with_args(format!("RIGHT JOIN {join}"), args))
        }

        /// Add `INNER JOIN <join>`.
        pub fn inner_join(self, join: &str) -> Self {
            self.join_clause(format!("INNER JOIN {join}"))
        }

        /// Add `INNER JOIN <join>` with arguments.
        pub fn inner_join_with<T: Into<$crate::value::Value>>(
            self,
            join: &str,
            args: impl IntoIterator<Item = T>,
        ) -> Self {
            self.join_clause($crate::fragment::Raw::with_args(format!("INNER JOIN {join}"), args))
        }

        /// Add a GROUP BY column.
        pub fn group_by(mut self, column: impl Into<String>) -> Self {
            $crate::qb::clauses::push_shared(&mut self.clauses.group_bys, column.into());
            self
        }

        /// Add a HAVING part. Parts are ANDed together.
        pub fn having(mut self, expr: impl Into<$crate::qb::Expr>) -> Self {
            $crate::qb::clauses::push_shared(&mut self.clauses.having_parts, expr.into());
            self
        }

        /// Add HAVING: raw SQL with one argument per `?` marker.
        pub fn having_expr<T: Into<$crate::value::Value>>(
            self,
            sql: impl Into<String>,
            args: impl IntoIterator<Item = T>,
        ) -> Self {
            self.having($crate::qb::Expr::raw_with(sql, args))
        }
    };
}
