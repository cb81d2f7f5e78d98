//! SELECT transitions: columns, table, joins, grouping, ordering and paging

use super::common::{IntoColumns, IntoOrderBy, JoinType};
use super::descriptor::Mode;
use super::query::Query;
use crate::schema::Table;
use crate::IntoOperator;

impl<R> Query<R> {
    /// Select specific columns
    ///
    /// A single string is used verbatim, lists are joined with `", "`.
    ///
    /// # Examples
    /// ```
    /// use quill_core::query;
    ///
    /// let q = query().select("id,title").from("users");
    /// assert_eq!(q.to_sql(), "SELECT id,title FROM users");
    ///
    /// let q = query().select(["id", "title"]).from("users");
    /// assert_eq!(q.to_sql(), "SELECT id, title FROM users");
    /// ```
    pub fn select<C>(&self, columns: C) -> Self
    where
        C: IntoColumns,
    {
        let columns = columns.into_columns().join(", ");
        self.derive(|d| {
            d.select_columns = Some(columns);
            d.claim_mode(Mode::Select);
        })
    }

    /// Set the table to select from
    pub fn from(&self, table: &str) -> Self {
        self.derive(|d| d.from_table = Some(table.to_string()))
    }

    /// Select from a typed table, rows map to the table's row type
    pub fn from_table<T: Table>(&self) -> Query<T::Row> {
        self.from(T::NAME).with_row_type()
    }

    /// Select `COUNT(<expression>)` instead of columns
    pub fn count(&self, expression: &str) -> Self {
        self.derive(|d| {
            d.count = Some(expression.to_string());
            d.claim_mode(Mode::Select);
        })
    }

    /// Select `COUNT(*)`
    pub fn count_all(&self) -> Self {
        self.count("*")
    }

    pub fn left_join(&self, table: &str) -> Self {
        self.derive(|d| d.put_join(JoinType::Left, table))
    }

    pub fn right_join(&self, table: &str) -> Self {
        self.derive(|d| d.put_join(JoinType::Right, table))
    }

    pub fn inner_join(&self, table: &str) -> Self {
        self.derive(|d| d.put_join(JoinType::Inner, table))
    }

    pub fn outer_join(&self, table: &str) -> Self {
        self.derive(|d| d.put_join(JoinType::Outer, table))
    }

    /// Set the join predicate as `<left> <operator> <right>`
    ///
    /// # Examples
    /// ```
    /// use quill_core::from;
    ///
    /// let q = from("shaders")
    ///     .left_join("users")
    ///     .on("shaders.user_id", "=", "users.id");
    /// assert_eq!(
    ///     q.to_sql(),
    ///     "SELECT * FROM shaders LEFT JOIN users ON shaders.user_id = users.id"
    /// );
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `operator` is a string naming no known SQLite operator; use
    /// [`Operator::custom`](crate::Operator::custom) for anything else.
    pub fn on<O>(&self, left: &str, operator: O, right: &str) -> Self
    where
        O: IntoOperator,
    {
        let clause = format!("{} {} {}", left, operator.into_operator(), right);
        self.derive(|d| d.on_clause = Some(clause))
    }

    /// Set the join predicate verbatim
    pub fn on_raw(&self, clause: &str) -> Self {
        self.derive(|d| d.on_clause = Some(clause.to_string()))
    }

    /// Set the GROUP BY expression
    pub fn group_by<C>(&self, columns: C) -> Self
    where
        C: IntoColumns,
    {
        let columns = columns.into_columns().join(", ");
        self.derive(|d| d.group_by = Some(columns))
    }

    /// Set the HAVING expression
    pub fn having(&self, expression: &str) -> Self {
        self.derive(|d| d.having = Some(expression.to_string()))
    }

    /// Add an ORDER BY entry; repeated calls accumulate
    pub fn order_by<O>(&self, order: O) -> Self
    where
        O: IntoOrderBy,
    {
        let order = order.into_order_by();
        self.derive(|d| d.order_by.push(order))
    }

    /// Set the LIMIT clause
    ///
    /// SQLite integers are signed, values above `i64::MAX` are bound as
    /// `i64::MAX`.
    pub fn limit(&self, limit: u64) -> Self {
        self.derive(|d| d.limit = Some(limit))
    }

    /// Set the OFFSET clause; saturates at `i64::MAX` like [`Query::limit`]
    pub fn offset(&self, offset: u64) -> Self {
        self.derive(|d| d.offset = Some(offset))
    }
}
