//! SQLite client over an sqlx connection pool

use futures::future::BoxFuture;
use futures::FutureExt;
use sqlx::sqlite::{SqliteArguments, SqlitePool, SqliteRow};
use sqlx::{Column, Row as _, Sqlite, TypeInfo, ValueRef};

use crate::executor::{BoundStatement, Database, PreparedStatement, Row, RunResult};
use crate::{Result, Value};

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// [`Database`] backed by an sqlx [`SqlitePool`]
#[derive(Debug, Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open a pool for a connection string such as `sqlite://app.db`
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(url).await?;
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Database for SqliteDatabase {
    fn prepare(&self, sql: &str) -> Result<Box<dyn PreparedStatement>> {
        Ok(Box::new(SqliteStatement {
            pool: self.pool.clone(),
            sql: sql.to_string(),
            parameters: Vec::new(),
        }))
    }
}

struct SqliteStatement {
    pool: SqlitePool,
    sql: String,
    parameters: Vec<Value>,
}

impl PreparedStatement for SqliteStatement {
    fn bind(mut self: Box<Self>, parameters: Vec<Value>) -> Box<dyn BoundStatement> {
        self.parameters = parameters;
        self
    }
}

impl BoundStatement for SqliteStatement {
    fn all(self: Box<Self>) -> BoxFuture<'static, Result<Vec<Row>>> {
        async move {
            let rows = bind_values(sqlx::query(&self.sql), &self.parameters)
                .fetch_all(&self.pool)
                .await?;
            rows.iter().map(row_to_json).collect::<Result<Vec<_>>>()
        }
        .boxed()
    }

    fn first(self: Box<Self>) -> BoxFuture<'static, Result<Option<Row>>> {
        async move {
            let row = bind_values(sqlx::query(&self.sql), &self.parameters)
                .fetch_optional(&self.pool)
                .await?;
            row.as_ref().map(row_to_json).transpose()
        }
        .boxed()
    }

    fn run(self: Box<Self>) -> BoxFuture<'static, Result<RunResult>> {
        async move {
            let result = bind_values(sqlx::query(&self.sql), &self.parameters)
                .execute(&self.pool)
                .await?;
            Ok::<_, crate::Error>(RunResult {
                rows_affected: result.rows_affected(),
                last_insert_id: Some(result.last_insert_rowid()).filter(|id| *id != 0),
            })
        }
        .boxed()
    }
}

fn bind_values<'q>(mut query: SqliteQuery<'q>, values: &'q [Value]) -> SqliteQuery<'q> {
    for value in values {
        query = match value {
            Value::Null => query.bind(None::<i64>),
            Value::Integer(i) => query.bind(*i),
            Value::Real(f) => query.bind(*f),
            Value::Text(s) => query.bind(s.as_str()),
            Value::Blob(b) => query.bind(b.as_slice()),
        };
    }
    query
}

/// Decode a row by the runtime type of each value
fn row_to_json(row: &SqliteRow) -> Result<Row> {
    let mut object = Row::new();
    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;

        let value = if raw.is_null() {
            serde_json::Value::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" => row.try_get::<i64, _>(index)?.into(),
                "REAL" => row.try_get::<f64, _>(index)?.into(),
                "BLOB" => row.try_get::<Vec<u8>, _>(index)?.into(),
                "BOOLEAN" => row.try_get::<bool, _>(index)?.into(),
                _ => row.try_get::<String, _>(index)?.into(),
            }
        };

        object.insert(column.name().to_string(), value);
    }
    Ok(object)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde::Deserialize;
    use sqlx::sqlite::SqlitePoolOptions;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::{ClauseStyle, Error, Options, Query};

    #[derive(Debug, PartialEq, Deserialize)]
    struct User {
        id: i64,
        name: String,
        email: Option<String>,
        age: i64,
    }

    async fn setup() -> SqliteDatabase {
        // One connection, each in-memory connection is its own database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT,
                age INTEGER NOT NULL DEFAULT 0,
                avatar BLOB,
                score REAL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        SqliteDatabase::from_pool(pool)
    }

    fn root(database: &SqliteDatabase, style: ClauseStyle) -> Query {
        Query::with_options(
            Options::new()
                .database(Arc::new(database.clone()))
                .clause_style(style),
        )
    }

    async fn seed(query: &Query) {
        for (name, age) in [("John", 30), ("Jane", 25), ("Jim", 17)] {
            let result = query
                .insert_into("users", [("name", Value::from(name)), ("age", Value::from(age))])
                .run()
                .await;
            assert_ok!(result);
        }
    }

    #[tokio::test]
    async fn test_insert_returning() {
        let database = setup().await;
        let query = root(&database, ClauseStyle::Bound);

        let inserted = assert_ok!(
            query
                .insert_into(
                    "users",
                    [
                        ("name", Value::from("John")),
                        ("email", Value::from("john@example.com")),
                        ("age", Value::from(30)),
                    ],
                )
                .with_row_type::<User>()
                .first()
                .await
        );
        assert_eq!(
            inserted,
            Some(User {
                id: 1,
                name: "John".into(),
                email: Some("john@example.com".into()),
                age: 30,
            })
        );
    }

    #[tokio::test]
    async fn test_run_reports_counts() {
        let database = setup().await;
        let query = root(&database, ClauseStyle::Bound);

        let result = assert_ok!(query.insert_into("users", [("name", "John")]).run().await);
        assert_eq!(result.rows_affected, 1);
        assert_eq!(result.last_insert_id, Some(1));

        seed(&query).await;
        let result = assert_ok!(
            query
                .update("users")
                .set([("email", Value::Null)])
                .where_(("age", ">", 18))
                .run()
                .await
        );
        assert_eq!(result.rows_affected, 2);
    }

    #[tokio::test]
    async fn test_select_where_and_limit() {
        let database = setup().await;
        let query = root(&database, ClauseStyle::Bound);
        seed(&query).await;

        let adults = assert_ok!(
            query
                .from("users")
                .where_(("age", ">=", 18))
                .with_row_type::<User>()
                .all()
                .await
        );
        assert_eq!(adults.len(), 2);

        let one = assert_ok!(query.from("users").limit(1).all().await);
        assert_eq!(one.len(), 1);

        let count = assert_ok!(query.from("users").count_all().first().await);
        assert_eq!(count.unwrap()["COUNT(*)"], 3);
    }

    #[tokio::test]
    async fn test_inline_style_orders_rows() {
        let database = setup().await;
        let query = root(&database, ClauseStyle::Inline);
        seed(&query).await;

        let users = assert_ok!(
            query
                .from("users")
                .where_(("age", ">", 0))
                .order_by("age DESC")
                .limit(2)
                .with_row_type::<User>()
                .all()
                .await
        );
        let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["John", "Jane"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_return_rows() {
        let database = setup().await;
        let query = root(&database, ClauseStyle::Bound);
        seed(&query).await;

        let updated = assert_ok!(
            query
                .update("users")
                .set([("email", "jim@example.com")])
                .where_(("name", "=", "Jim"))
                .with_row_type::<User>()
                .all()
                .await
        );
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].email.as_deref(), Some("jim@example.com"));

        let deleted = assert_ok!(
            query
                .delete_from("users")
                .where_(("age", "<", 18))
                .with_row_type::<User>()
                .all()
                .await
        );
        assert_eq!(deleted.len(), 1);
        assert_eq!(deleted[0].name, "Jim");

        let remaining = assert_ok!(query.from("users").all().await);
        assert_eq!(remaining.len(), 2);
    }

    #[tokio::test]
    async fn test_value_types_round_trip() {
        let database = setup().await;
        let query = root(&database, ClauseStyle::Bound);

        assert_ok!(
            query
                .insert_into(
                    "users",
                    [
                        ("name", Value::from("Ada")),
                        ("avatar", Value::from(vec![1u8, 2, 3])),
                        ("score", Value::from(9.5)),
                    ],
                )
                .run()
                .await
        );

        let row = assert_ok!(query.from("users").first().await).unwrap();
        assert_eq!(row["name"], "Ada");
        assert_eq!(row["avatar"], serde_json::json!([1, 2, 3]));
        assert_eq!(row["score"], 9.5);
        assert!(row["email"].is_null());
        assert_eq!(row["age"], 0);
    }

    #[tokio::test]
    async fn test_database_errors_pass_through() {
        let database = setup().await;
        let query = root(&database, ClauseStyle::Bound);

        let err = assert_err!(query.from("missing_table").all().await);
        assert!(matches!(err, Error::Database(_)));

        // NOT NULL constraint on name
        let err = assert_err!(query.insert_into("users", [("age", 3)]).run().await);
        assert!(matches!(err, Error::Database(_)));
    }

    #[tokio::test]
    async fn test_schema_introspection() {
        let database = setup().await;
        let query = root(&database, ClauseStyle::Bound);
        seed(&query).await;

        let columns = assert_ok!(query.table_info("users").await);
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["id", "name", "email", "age", "avatar", "score"]);
        assert!(columns[0].is_primary_key());
        assert!(!columns[1].is_nullable());
        assert_eq!(columns[3].dflt_value, Some(serde_json::json!("0")));

        let tables = assert_ok!(query.table_list(false).await);
        let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["users"]);

        let all = assert_ok!(query.table_list(true).await);
        assert!(all.iter().any(|t| t.name == "sqlite_sequence"));
    }
}
