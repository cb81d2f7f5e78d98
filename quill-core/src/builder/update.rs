//! UPDATE transitions

use super::common::IntoRecord;
use super::descriptor::Mode;
use super::query::Query;

impl<R> Query<R> {
    /// Start an UPDATE of `table`; a `set()` must follow
    pub fn update(&self, table: &str) -> Self {
        self.derive(|d| {
            d.update_table = Some(table.to_string());
            d.claim_mode(Mode::Update);
        })
    }

    /// Set the `<column> = ?` assignments of an UPDATE
    ///
    /// # Examples
    /// ```
    /// use quill_core::update;
    ///
    /// let q = update("users").set([("name", "foo")]).where_(("id", "=", 1));
    /// assert_eq!(q.to_sql(), "UPDATE users SET name = ? WHERE id = ?");
    /// assert_eq!(q.parameters(), vec!["foo".into(), 1.into()]);
    /// ```
    pub fn set<D>(&self, data: D) -> Self
    where
        D: IntoRecord,
    {
        let (columns, values) = data.into_record().into_parts();
        let clause = columns
            .iter()
            .map(|column| format!("{} = ?", column))
            .collect::<Vec<_>>()
            .join(", ");
        self.derive(|d| {
            d.set_clause = Some(clause);
            d.set_parameters = values;
        })
    }
}
