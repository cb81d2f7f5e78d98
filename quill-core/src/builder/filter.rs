//! WHERE transitions

use super::common::IntoCondition;
use super::query::Query;
use crate::{Error, Result};

impl<R> Query<R> {
    /// Set the WHERE predicate
    ///
    /// The predicate text is replaced and the condition's value, if any,
    /// is appended to the bound parameters. A unary operator binds nothing.
    ///
    /// # Examples
    /// ```
    /// use quill_core::from;
    ///
    /// let q = from("users").where_(("id", "=", 1));
    /// assert_eq!(q.to_sql(), "SELECT * FROM users WHERE id = ?");
    ///
    /// let q = from("users").where_(("email", "IS NOT NULL"));
    /// assert_eq!(q.to_sql(), "SELECT * FROM users WHERE email IS NOT NULL");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the condition's operator is a string naming no known SQLite
    /// operator; use [`Operator::custom`](crate::Operator::custom) instead.
    /// The same holds for [`Query::and`] and [`Query::or`].
    pub fn where_<C>(&self, condition: C) -> Self
    where
        C: IntoCondition,
    {
        let condition = condition.into_condition();
        self.derive(|d| {
            d.where_clause = Some(condition.to_sql());
            d.where_parameters.extend(condition.value);
        })
    }

    /// Set the WHERE predicate verbatim, binding nothing
    pub fn where_raw(&self, clause: &str) -> Self {
        self.derive(|d| d.where_clause = Some(clause.to_string()))
    }

    /// Extend the WHERE predicate with `AND <condition>`
    ///
    /// Fails with [`Error::Usage`] when no predicate exists yet.
    pub fn and<C>(&self, condition: C) -> Result<Self>
    where
        C: IntoCondition,
    {
        self.extend_where("AND", condition)
    }

    /// Extend the WHERE predicate with `OR <condition>`
    ///
    /// Fails with [`Error::Usage`] when no predicate exists yet.
    pub fn or<C>(&self, condition: C) -> Result<Self>
    where
        C: IntoCondition,
    {
        self.extend_where("OR", condition)
    }

    fn extend_where<C>(&self, connector: &str, condition: C) -> Result<Self>
    where
        C: IntoCondition,
    {
        let Some(existing) = self.descriptor.where_clause.as_deref() else {
            return Err(Error::usage(format!(
                "{}() must come after where()",
                connector.to_lowercase()
            )));
        };

        let condition = condition.into_condition();
        let clause = format!("{} {} {}", existing, connector, condition.to_sql());
        Ok(self.derive(|d| {
            d.where_clause = Some(clause);
            d.where_parameters.extend(condition.value);
        }))
    }
}
