//! INSERT transition

use super::common::IntoRecord;
use super::descriptor::Mode;
use super::query::Query;

impl<R> Query<R> {
    /// Insert one record; columns and bound values follow the record's order
    ///
    /// # Examples
    /// ```
    /// use quill_core::insert_into;
    ///
    /// let q = insert_into("shaders", [("title", "bar")]);
    /// assert_eq!(q.to_sql(), "INSERT INTO shaders (title) VALUES (?)");
    /// assert_eq!(q.parameters(), vec!["bar".into()]);
    /// ```
    pub fn insert_into<D>(&self, table: &str, data: D) -> Self
    where
        D: IntoRecord,
    {
        let (columns, values) = data.into_record().into_parts();
        self.derive(|d| {
            d.insert_table = Some(table.to_string());
            d.insert_columns = columns;
            d.insert_parameters = values;
            d.claim_mode(Mode::InsertInto);
        })
    }
}
