//! Quill Core - an immutable, chainable SQL query builder for SQLite-style databases
//!
//! Every builder call returns a new [`Query`], so partial queries can be shared
//! and extended freely. A query compiles to SQL text plus positional `?`
//! parameters, is validated before it reaches the database, and runs through
//! the [`Database`] client capability.
//!
//! ```
//! use quill_core::{from, Value};
//!
//! let q = from("shaders")
//!     .select("shaders.*, users.name as user_name")
//!     .left_join("users")
//!     .on("shaders.user_id", "=", "users.id")
//!     .where_(("shaders.id", ">", 10))
//!     .limit(20);
//!
//! assert_eq!(
//!     q.to_sql(),
//!     "SELECT shaders.*, users.name as user_name FROM shaders LEFT JOIN users \
//!      ON shaders.user_id = users.id WHERE shaders.id > ? LIMIT ?"
//! );
//! assert_eq!(q.parameters(), vec![Value::Integer(10), Value::Integer(20)]);
//! ```

pub mod builder;
pub mod compiler;
pub mod config;
pub mod error;
pub mod executor;
pub mod operator;
pub mod schema;
pub mod validator;
pub mod value;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use builder::{
    Condition, IntoColumns, IntoCondition, IntoOrderBy, IntoRecord, Join, JoinType, Mode, Query,
    QueryDescriptor, Record, SortDirection,
};
pub use compiler::CompiledQuery;
pub use config::{default_database, set_default_database, ClauseStyle, Options};
pub use error::{Error, Result, ValidationError};
pub use executor::{BoundStatement, Database, PreparedStatement, Row, RunResult};
pub use operator::{op, IntoOperator, Operator};
pub use schema::{ColumnInfo, Table, TableEntry};
pub use value::Value;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;

/// Start an empty chain with default options
pub fn query() -> Query {
    Query::new()
}

/// Start a SELECT chain on `table`
pub fn from(table: &str) -> Query {
    Query::new().from(table)
}

/// Start an INSERT chain
pub fn insert_into<D: IntoRecord>(table: &str, data: D) -> Query {
    Query::new().insert_into(table, data)
}

/// Start an UPDATE chain; needs `set()` and `where_()` or `force()` to run
pub fn update(table: &str) -> Query {
    Query::new().update(table)
}

/// Start a DELETE chain; needs `where_()` or `force()` to run
pub fn delete_from(table: &str) -> Query {
    Query::new().delete_from(table)
}
