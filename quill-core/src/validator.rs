//! Safety and consistency checks run before a query touches the database

use std::sync::LazyLock;

use regex::Regex;

use crate::builder::{Mode, QueryDescriptor};
use crate::{ClauseStyle, ValidationError};

const IDENT: &str = r"[A-Za-z_][A-Za-z0-9_]*(?:\.(?:[A-Za-z_][A-Za-z0-9_]*|\*))?";

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{IDENT}$")).expect("identifier pattern is valid")
});

static IDENTIFIER_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*{IDENT}(?:\s*,\s*{IDENT})*\s*$"))
        .expect("identifier list pattern is valid")
});

static ORDER_TERM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*{IDENT}(?:\s+(?i:ASC|DESC))?\s*$"))
        .expect("order term pattern is valid")
});

// No quotes, semicolons, comments or placeholders
static HAVING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.*(),<>=!+%\s]+$").expect("having pattern is valid")
});

/// Whether `name` is a plain (optionally table-qualified) SQL identifier
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER_RE.is_match(name)
}

/// Check a descriptor, reporting the first violation found.
///
/// Checks run in a fixed order: select/count conflict, update without set,
/// unguarded update or delete, placeholder/parameter mismatch. Then:
/// missing statement, SELECT without a table, INSERT without columns, and
/// for [`ClauseStyle::Inline`] the expressions that will be inlined.
pub fn validate(query: &QueryDescriptor) -> Result<(), ValidationError> {
    let result = check(query);
    if let Err(error) = &result {
        tracing::debug!(%error, "query rejected by validator");
    }
    result
}

fn check(query: &QueryDescriptor) -> Result<(), ValidationError> {
    if let (Some(select), Some(count)) = (&query.select_columns, &query.count) {
        return Err(ValidationError::SelectAndCount {
            select: select.clone(),
            count: count.clone(),
        });
    }

    let mode = query.effective_mode();

    if mode == Some(Mode::Update) && query.set_clause.is_none() {
        return Err(ValidationError::UpdateWithoutSet);
    }

    if query.where_clause.is_none() && !query.force {
        match mode {
            Some(Mode::Update) => return Err(ValidationError::UnguardedUpdate),
            Some(Mode::DeleteFrom) => return Err(ValidationError::UnguardedDelete),
            _ => {}
        }
    }

    if let Some(clause) = &query.where_clause {
        let placeholders = clause.matches('?').count();
        let parameters = query.where_parameters.len();
        if placeholders != parameters {
            return Err(ValidationError::PlaceholderMismatch {
                placeholders,
                parameters,
            });
        }
    }

    match mode {
        None => return Err(ValidationError::EmptyQuery),
        Some(Mode::Select) if query.from_table.is_none() => {
            return Err(ValidationError::MissingTable)
        }
        Some(Mode::InsertInto) if query.insert_columns.is_empty() => {
            return Err(ValidationError::EmptyInsert)
        }
        _ => {}
    }

    if query.clause_style == ClauseStyle::Inline {
        check_inline_clauses(query)?;
    }

    Ok(())
}

fn check_inline_clauses(query: &QueryDescriptor) -> Result<(), ValidationError> {
    if let Some(group_by) = &query.group_by {
        if !IDENTIFIER_LIST_RE.is_match(group_by) {
            return Err(unsafe_clause("GROUP BY", group_by));
        }
    }

    if let Some(having) = &query.having {
        if !HAVING_RE.is_match(having) {
            return Err(unsafe_clause("HAVING", having));
        }
    }

    if let Some(order) = query.order_by.iter().find(|o| !ORDER_TERM_RE.is_match(o)) {
        return Err(unsafe_clause("ORDER BY", order));
    }

    Ok(())
}

fn unsafe_clause(clause: &'static str, value: &str) -> ValidationError {
    ValidationError::UnsafeClause {
        clause,
        value: value.to_string(),
    }
}
