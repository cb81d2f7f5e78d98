//! The immutable record a builder chain accumulates

use super::common::{Join, JoinType};
use crate::{ClauseStyle, Value};

/// Statement kind, mutually exclusive on a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Select,
    InsertInto,
    Update,
    DeleteFrom,
}

/// Everything a chain of builder calls has specified so far.
///
/// Descriptors are plain values. Builder transitions clone the current
/// descriptor and change one field, so a descriptor is never edited after
/// another query has been derived from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryDescriptor {
    pub mode: Option<Mode>,
    pub from_table: Option<String>,
    pub insert_table: Option<String>,
    pub update_table: Option<String>,
    pub delete_table: Option<String>,
    pub select_columns: Option<String>,
    pub count: Option<String>,
    pub joins: Vec<Join>,
    pub on_clause: Option<String>,
    pub where_clause: Option<String>,
    pub where_parameters: Vec<Value>,
    pub group_by: Option<String>,
    pub having: Option<String>,
    pub order_by: Vec<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub set_clause: Option<String>,
    pub set_parameters: Vec<Value>,
    pub insert_columns: Vec<String>,
    pub insert_parameters: Vec<Value>,
    pub force: bool,
    pub clause_style: ClauseStyle,
}

impl QueryDescriptor {
    /// The statement that will be compiled: the explicit mode, or a
    /// `SELECT *` when only a table was given.
    pub fn effective_mode(&self) -> Option<Mode> {
        self.mode
            .or_else(|| self.from_table.as_ref().map(|_| Mode::Select))
    }

    /// The subject table of the statement that will be compiled.
    ///
    /// Each statement kind keeps its own table, so a later mode-setting
    /// call never retargets the statement that claimed the mode.
    pub fn target_table(&self) -> Option<&str> {
        match self.effective_mode()? {
            Mode::Select => self.from_table.as_deref(),
            Mode::InsertInto => self.insert_table.as_deref(),
            Mode::Update => self.update_table.as_deref(),
            Mode::DeleteFrom => self.delete_table.as_deref(),
        }
    }

    /// Record a mode unless one is already set
    pub(crate) fn claim_mode(&mut self, mode: Mode) {
        if self.mode.is_none() {
            self.mode = Some(mode);
        }
    }

    /// Record a join, replacing an earlier join of the same kind in place
    pub(crate) fn put_join(&mut self, kind: JoinType, table: &str) {
        let join = Join {
            kind,
            table: table.to_string(),
        };
        match self.joins.iter_mut().find(|existing| existing.kind == kind) {
            Some(existing) => *existing = join,
            None => self.joins.push(join),
        }
    }
}
