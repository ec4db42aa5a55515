//! Trait definitions for statement builders.

use crate::client::GenericClient;
use crate::debug::debug_sql;
use crate::error::SqlResult;
use crate::fragment::Fragment;
use crate::placeholder::PlaceholderFormat;
use crate::row::FromRow;
use crate::value::Value;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A rendered statement: dialect-specific SQL plus its ordered arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl BuiltQuery {
    pub fn new(sql: String, params: Vec<Value>) -> Self {
        Self { sql, params }
    }

    /// Get parameters as references for tokio-postgres.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|p| p as &(dyn ToSql + Sync))
            .collect()
    }
}

/// Base trait for all statement builders.
///
/// Rendering happens in [`Fragment::write_sql`] with neutral `?` markers;
/// [`SqlQb::build`] rewrites them for the builder's placeholder format.
pub trait SqlQb: Fragment + Sync {
    /// Statement kind used in logs (`"select"`, `"insert"`, ...).
    fn statement_kind(&self) -> &'static str;

    /// Placeholder format applied by [`SqlQb::build`].
    fn placeholder_format(&self) -> PlaceholderFormat;

    /// Render the statement and rewrite its placeholders.
    fn build(&self) -> SqlResult<BuiltQuery> {
        let (sql, params) = self.to_sql()?;
        let sql = self.placeholder_format().replace_placeholders(&sql);
        Ok(BuiltQuery::new(sql, params))
    }

    /// Render only the SQL text (placeholders rewritten).
    fn to_sql_string(&self) -> SqlResult<String> {
        self.build().map(|built| built.sql)
    }

    /// Best-effort SQL with arguments inlined, for logs and debugging only.
    fn debug_sql(&self) -> String {
        debug_sql(self)
    }

    /// Execute query and return all rows.
    fn query(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = SqlResult<Vec<Row>>> + Send {
        async move {
            let built = prepare(self)?;
            conn.query(&built.sql, &built.params_ref()).await
        }
    }

    /// Execute query and return at most one row.
    fn query_opt(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = SqlResult<Option<Row>>> + Send {
        async move {
            let built = prepare(self)?;
            conn.query_opt(&built.sql, &built.params_ref()).await
        }
    }

    /// Execute query and return the first row, or [`SqlError::NotFound`](crate::SqlError::NotFound).
    fn query_one(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = SqlResult<Row>> + Send {
        async move {
            let built = prepare(self)?;
            conn.query_one(&built.sql, &built.params_ref()).await
        }
    }

    /// Execute query and map all rows to `T`.
    fn fetch_all<T: FromRow>(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = SqlResult<Vec<T>>> + Send {
        async move {
            let rows = self.query(conn).await?;
            rows.iter().map(T::from_row).collect()
        }
    }

    /// Execute query and map at most one row to `T`.
    fn fetch_opt<T: FromRow>(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = SqlResult<Option<T>>> + Send {
        async move {
            let row = self.query_opt(conn).await?;
            row.as_ref().map(T::from_row).transpose()
        }
    }

    /// Execute query and map the first row to `T`.
    fn fetch_one<T: FromRow>(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = SqlResult<T>> + Send {
        async move {
            let row = self.query_one(conn).await?;
            T::from_row(&row)
        }
    }
}

/// Trait for mutation builders (INSERT/UPDATE/DELETE).
pub trait MutationQb: SqlQb {
    /// Execute and return affected row count.
    fn execute(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = SqlResult<u64>> + Send {
        async move {
            let built = prepare(self)?;
            conn.execute(&built.sql, &built.params_ref()).await
        }
    }
}

/// Build a statement for execution, logging the outcome.
fn prepare<Q: SqlQb + ?Sized>(qb: &Q) -> SqlResult<BuiltQuery> {
    match qb.build() {
        Ok(built) => {
            tracing::debug!(
                target: "sqlchain.sql",
                statement = qb.statement_kind(),
                sql = %built.sql,
                param_count = built.params.len(),
                "executing statement"
            );
            Ok(built)
        }
        Err(err) => {
            tracing::warn!(
                target: "sqlchain.sql",
                statement = qb.statement_kind(),
                error = %err,
                "statement failed to render"
            );
            Err(err)
        }
    }
}
