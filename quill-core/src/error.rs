//! Error types for Quill

use thiserror::Error;

/// The main error type for Quill operations
#[derive(Error, Debug)]
pub enum Error {
    /// A builder method was called in an order that makes no sense,
    /// such as `and()` before any `where_()`
    #[error("Usage error: {message}")]
    Usage { message: String },

    /// The query descriptor was rejected before any I/O was attempted
    #[error("Invalid query: {0}")]
    Validation(#[from] ValidationError),

    /// No database client is available to execute the query
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Error reported by the bundled SQLx-backed client
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Error reported by any other database client, passed through unchanged
    #[error("Client error: {0}")]
    Client(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Row mapping or record conversion error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Reasons the validator rejects a query descriptor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("can't use both select(\"{select}\") and count(\"{count}\")")]
    SelectAndCount { select: String, count: String },

    #[error("can't do update without set")]
    UpdateWithoutSet,

    #[error("update() without where() is unsafe, append force() if you really want to do this")]
    UnguardedUpdate,

    #[error("deleteFrom() without where() is unsafe, append force() if you really want to do this")]
    UnguardedDelete,

    #[error("?-parameters vs actual values mismatch: {placeholders} != {parameters}")]
    PlaceholderMismatch { placeholders: usize, parameters: usize },

    #[error("query has no statement, call select(), from(), insert_into(), update() or delete_from()")]
    EmptyQuery,

    #[error("SELECT requires a table, call from()")]
    MissingTable,

    #[error("INSERT requires at least one column")]
    EmptyInsert,

    #[error("{clause} value '{value}' cannot be inlined safely")]
    UnsafeClause { clause: &'static str, value: String },
}

/// Convenience Result type for Quill operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new usage error
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Wrap an error reported by a database client
    pub fn client<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Client(error.into())
    }
}
