//! Typed tables and SQLite schema introspection

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::builder::Query;
use crate::{validator, Result, ValidationError};

/// A table with a known name and row shape
pub trait Table {
    const NAME: &'static str;
    type Row: DeserializeOwned;
}

/// One row of `PRAGMA table_info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub cid: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    pub notnull: i64,
    pub dflt_value: Option<serde_json::Value>,
    pub pk: i64,
}

impl ColumnInfo {
    pub fn is_nullable(&self) -> bool {
        self.notnull == 0
    }

    pub fn is_primary_key(&self) -> bool {
        self.pk > 0
    }
}

/// One row of `PRAGMA table_list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    pub schema: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub ncol: i64,
    pub wr: i64,
    pub strict: i64,
}

/// Tables SQLite and D1 maintain for themselves
const INTERNAL_TABLES: &[&str] = &[
    "sqlite_sequence",
    "d1_migrations",
    "_cf_KV",
    "sqlite_schema",
    "sqlite_temp_schema",
];

impl TableEntry {
    pub fn is_internal(&self) -> bool {
        INTERNAL_TABLES.contains(&self.name.as_str())
    }
}

impl<R> Query<R> {
    /// Describe the columns of `table`
    pub async fn table_info(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        if !validator::is_identifier(table) || table.ends_with('*') {
            return Err(ValidationError::UnsafeClause {
                clause: "PRAGMA table_info",
                value: table.to_string(),
            }
            .into());
        }

        self.sql(&format!("PRAGMA table_info({table})"), Vec::new())
            .await
    }

    /// List tables and views; internal bookkeeping tables are hidden unless `show_all`
    pub async fn table_list(&self, show_all: bool) -> Result<Vec<TableEntry>> {
        let tables: Vec<TableEntry> = self.sql("PRAGMA table_list", Vec::new()).await?;
        if show_all {
            return Ok(tables);
        }

        Ok(tables.into_iter().filter(|t| !t.is_internal()).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::executor::mock::MockDatabase;
    use crate::{Error, Options};

    fn root(database: &MockDatabase) -> Query {
        Query::with_options(Options::new().database(Arc::new(database.clone())))
    }

    #[tokio::test]
    async fn test_table_info() {
        let database = MockDatabase::with_rows(json!([
            {"cid": 0, "name": "id", "type": "INTEGER", "notnull": 0, "dflt_value": null, "pk": 1},
            {"cid": 1, "name": "title", "type": "TEXT", "notnull": 1, "dflt_value": "'untitled'", "pk": 0}
        ]));

        let columns = assert_ok!(root(&database).table_info("shaders").await);
        assert_eq!(columns.len(), 2);
        assert!(columns[0].is_primary_key());
        assert!(!columns[1].is_nullable());
        assert_eq!(columns[1].column_type, "TEXT");
        assert_eq!(database.calls()[0].0, "PRAGMA table_info(shaders)");
    }

    #[tokio::test]
    async fn test_table_info_rejects_unsafe_names() {
        let database = MockDatabase::default();
        let err = assert_err!(root(&database).table_info("x); DROP TABLE users; --").await);
        assert!(matches!(
            err,
            Error::Validation(ValidationError::UnsafeClause { .. })
        ));
        assert!(database.calls().is_empty());
    }

    #[tokio::test]
    async fn test_table_list_hides_internal_tables() {
        let entry = |name: &str| {
            json!({"schema": "main", "name": name, "type": "table", "ncol": 2, "wr": 0, "strict": 0})
        };
        let database = MockDatabase::with_rows(json!([
            entry("shaders"),
            entry("sqlite_sequence"),
            entry("d1_migrations"),
            entry("_cf_KV"),
            entry("users"),
        ]));

        let tables = assert_ok!(root(&database).table_list(false).await);
        let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["shaders", "users"]);

        let tables = assert_ok!(root(&database).table_list(true).await);
        assert_eq!(tables.len(), 5);
    }
}
