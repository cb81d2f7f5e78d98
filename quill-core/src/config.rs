//! Query options and the process-wide default database

use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::Deserialize;

use crate::executor::Database;
use crate::{Error, Result};

/// How GROUP BY, HAVING and ORDER BY expressions reach the database
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClauseStyle {
    /// Each expression is sent as a bound `?` parameter and clauses follow
    /// the fixed order GROUP BY, HAVING, WHERE, ORDER BY, LIMIT, OFFSET.
    #[default]
    Bound,
    /// Expressions are checked against a strict identifier grammar and
    /// written into the SQL text in standard clause order.
    Inline,
}

/// Per-chain configuration, fixed when the chain root is created
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Options {
    #[serde(skip)]
    database: Option<Arc<dyn Database>>,
    table: Option<String>,
    clause_style: ClauseStyle,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client used by this chain, overriding the process default
    pub fn database(mut self, database: Arc<dyn Database>) -> Self {
        self.database = Some(database);
        self
    }

    /// Default subject table, used when the chain never calls `from()`
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn clause_style(mut self, style: ClauseStyle) -> Self {
        self.clause_style = style;
        self
    }

    pub fn get_database(&self) -> Option<&Arc<dyn Database>> {
        self.database.as_ref()
    }

    pub fn get_table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn get_clause_style(&self) -> ClauseStyle {
        self.clause_style
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("database", &self.database.as_ref().map(|_| "<database>"))
            .field("table", &self.table)
            .field("clause_style", &self.clause_style)
            .finish()
    }
}

static DEFAULT_DATABASE: OnceLock<Arc<dyn Database>> = OnceLock::new();

/// Install the process-wide default database.
///
/// It is used by every chain whose options carry no database. It can be set
/// once per process, later calls fail instead of rebinding it.
pub fn set_default_database(database: Arc<dyn Database>) -> Result<()> {
    DEFAULT_DATABASE
        .set(database)
        .map_err(|_| Error::configuration("default database is already configured"))?;
    tracing::info!("default database configured");
    Ok(())
}

/// The process-wide default database, if one was installed
pub fn default_database() -> Option<Arc<dyn Database>> {
    DEFAULT_DATABASE.get().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = Options::new()
            .table("shaders")
            .clause_style(ClauseStyle::Inline);
        assert_eq!(options.get_table(), Some("shaders"));
        assert_eq!(options.get_clause_style(), ClauseStyle::Inline);
        assert!(options.get_database().is_none());
    }

    #[test]
    fn test_options_deserialize() {
        let options: Options =
            serde_json::from_str(r#"{"table": "users", "clause_style": "inline"}"#).unwrap();
        assert_eq!(options.get_table(), Some("users"));
        assert_eq!(options.get_clause_style(), ClauseStyle::Inline);

        let options: Options = serde_json::from_str("{}").unwrap();
        assert_eq!(options.get_table(), None);
        assert_eq!(options.get_clause_style(), ClauseStyle::Bound);
    }

    #[test]
    fn test_options_debug_hides_database() {
        let debug = format!("{:?}", Options::new().table("users"));
        assert!(debug.contains("table: Some(\"users\")"));
        assert!(debug.contains("database: None"));
    }
}
