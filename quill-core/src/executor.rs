//! Query execution against a database client

use std::sync::Arc;

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::builder::{Mode, Query};
use crate::compiler::CompiledQuery;
use crate::config::default_database;
use crate::{Error, Result, Value};

/// A result row, column name to JSON value in column order
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Outcome of a statement executed for its side effect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub rows_affected: u64,
    pub last_insert_id: Option<i64>,
}

/// A database client able to prepare statements
pub trait Database: Send + Sync {
    fn prepare(&self, sql: &str) -> Result<Box<dyn PreparedStatement>>;
}

/// A statement waiting for its positional parameters
pub trait PreparedStatement: Send {
    fn bind(self: Box<Self>, parameters: Vec<Value>) -> Box<dyn BoundStatement>;
}

/// A statement ready to execute
///
/// Errors from the underlying client are returned unchanged.
pub trait BoundStatement: Send {
    /// Execute and return every row
    fn all(self: Box<Self>) -> BoxFuture<'static, Result<Vec<Row>>>;

    /// Execute and return the first row, if any
    fn first(self: Box<Self>) -> BoxFuture<'static, Result<Option<Row>>>;

    /// Execute for side effects
    fn run(self: Box<Self>) -> BoxFuture<'static, Result<RunResult>>;
}

impl<R> Query<R> {
    /// Execute the query and return every row
    ///
    /// The query is validated first. For INSERT, UPDATE and DELETE the
    /// statement gets `RETURNING *` so the affected rows come back.
    pub async fn all(&self) -> Result<Vec<R>>
    where
        R: DeserializeOwned,
    {
        let rows = self.bound(true)?.all().await?;
        rows.into_iter().map(from_row).collect()
    }

    /// Execute the query and return the first row, if any
    pub async fn first(&self) -> Result<Option<R>>
    where
        R: DeserializeOwned,
    {
        self.bound(true)?.first().await?.map(from_row).transpose()
    }

    /// Execute the query for its side effect
    pub async fn run(&self) -> Result<RunResult> {
        self.bound(false)?.run().await
    }

    /// Run raw SQL with caller-supplied parameters, bypassing the builder
    pub async fn sql<T>(&self, sql: &str, parameters: Vec<Value>) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let rows = self.statement(sql, parameters)?.all().await?;
        rows.into_iter().map(from_row).collect()
    }

    /// Run raw SQL and return the first row, if any
    pub async fn sql_first<T>(&self, sql: &str, parameters: Vec<Value>) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        self.statement(sql, parameters)?
            .first()
            .await?
            .map(from_row)
            .transpose()
    }

    fn bound(&self, returning: bool) -> Result<Box<dyn BoundStatement>> {
        self.validate()?;

        let CompiledQuery {
            mut sql,
            parameters,
        } = self.compile();
        if returning && self.descriptor.effective_mode() != Some(Mode::Select) {
            sql.push_str(" RETURNING *");
        }

        self.statement(&sql, parameters)
    }

    fn statement(&self, sql: &str, parameters: Vec<Value>) -> Result<Box<dyn BoundStatement>> {
        let database = self.resolve_database()?;
        tracing::debug!(
            sql,
            parameters = %serde_json::Value::from_iter(parameters.iter().map(crate::Value::to_json)),
            "executing statement"
        );
        Ok(database.prepare(sql)?.bind(parameters))
    }

    fn resolve_database(&self) -> Result<Arc<dyn Database>> {
        self.options
            .get_database()
            .cloned()
            .or_else(default_database)
            .ok_or_else(|| {
                Error::configuration(
                    "no database configured, pass Options::database or call set_default_database",
                )
            })
    }
}

fn from_row<T: DeserializeOwned>(row: Row) -> Result<T> {
    Ok(serde_json::from_value(serde_json::Value::Object(row))?)
}
