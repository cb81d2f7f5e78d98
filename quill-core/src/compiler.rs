//! Render a query descriptor into SQL text and positional parameters

use crate::builder::{Mode, QueryDescriptor};
use crate::{ClauseStyle, Value};

/// SQL text plus the values for its `?` placeholders, left to right
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub parameters: Vec<Value>,
}

impl CompiledQuery {
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.parameters)
    }
}

/// Compile a descriptor. Pure and deterministic; does not validate.
///
/// Under [`ClauseStyle::Bound`] the tail clauses are appended in the order
/// GROUP BY, HAVING, WHERE, ORDER BY, LIMIT, OFFSET, and the GROUP BY,
/// HAVING and ORDER BY expressions are sent as parameters. Under
/// [`ClauseStyle::Inline`] they are written into the text in standard SQL
/// order (WHERE first). LIMIT and OFFSET are always bound.
pub fn compile(query: &QueryDescriptor) -> CompiledQuery {
    let mut sql = String::new();
    let mut parameters = Vec::new();

    match query.effective_mode() {
        Some(Mode::Select) => {
            sql.push_str("SELECT ");
            match (&query.count, &query.select_columns) {
                (Some(count), _) => {
                    sql.push_str("COUNT(");
                    sql.push_str(count);
                    sql.push(')');
                }
                (None, Some(columns)) => sql.push_str(columns),
                (None, None) => sql.push('*'),
            }

            sql.push_str(" FROM ");
            sql.push_str(query.target_table().unwrap_or_default());

            for join in &query.joins {
                sql.push(' ');
                sql.push_str(&join.kind.to_string());
                sql.push_str(" JOIN ");
                sql.push_str(&join.table);
            }

            if let Some(on) = &query.on_clause {
                sql.push_str(" ON ");
                sql.push_str(on);
            }
        }
        Some(Mode::InsertInto) => {
            let placeholders = vec!["?"; query.insert_columns.len()].join(", ");
            sql.push_str("INSERT INTO ");
            sql.push_str(query.target_table().unwrap_or_default());
            sql.push_str(" (");
            sql.push_str(&query.insert_columns.join(", "));
            sql.push_str(") VALUES (");
            sql.push_str(&placeholders);
            sql.push(')');
            parameters.extend(query.insert_parameters.iter().cloned());
        }
        Some(Mode::DeleteFrom) => {
            sql.push_str("DELETE FROM ");
            sql.push_str(query.target_table().unwrap_or_default());
        }
        Some(Mode::Update) => {
            sql.push_str("UPDATE ");
            sql.push_str(query.target_table().unwrap_or_default());
            if let Some(set) = &query.set_clause {
                sql.push_str(" SET ");
                sql.push_str(set);
                parameters.extend(query.set_parameters.iter().cloned());
            }
        }
        None => {}
    }

    match query.clause_style {
        ClauseStyle::Bound => {
            if let Some(group_by) = &query.group_by {
                sql.push_str(" GROUP BY ?");
                parameters.push(Value::from(group_by));
            }
            if let Some(having) = &query.having {
                sql.push_str(" HAVING ?");
                parameters.push(Value::from(having));
            }
            push_where(query, &mut sql, &mut parameters);
            if !query.order_by.is_empty() {
                sql.push_str(" ORDER BY ");
                sql.push_str(&vec!["?"; query.order_by.len()].join(", "));
                parameters.extend(query.order_by.iter().map(Value::from));
            }
        }
        ClauseStyle::Inline => {
            push_where(query, &mut sql, &mut parameters);
            if let Some(group_by) = &query.group_by {
                sql.push_str(" GROUP BY ");
                sql.push_str(group_by);
            }
            if let Some(having) = &query.having {
                sql.push_str(" HAVING ");
                sql.push_str(having);
            }
            if !query.order_by.is_empty() {
                sql.push_str(" ORDER BY ");
                sql.push_str(&query.order_by.join(", "));
            }
        }
    }

    if let Some(limit) = query.limit {
        sql.push_str(" LIMIT ?");
        parameters.push(bound_integer(limit));
    }

    if let Some(offset) = query.offset {
        sql.push_str(" OFFSET ?");
        parameters.push(bound_integer(offset));
    }

    CompiledQuery { sql, parameters }
}

fn push_where(query: &QueryDescriptor, sql: &mut String, parameters: &mut Vec<Value>) {
    if let Some(clause) = &query.where_clause {
        sql.push_str(" WHERE ");
        sql.push_str(clause);
    }
    parameters.extend(query.where_parameters.iter().cloned());
}

// SQLite integers are i64, larger counts saturate
fn bound_integer(n: u64) -> Value {
    Value::Integer(i64::try_from(n).unwrap_or(i64::MAX))
}
