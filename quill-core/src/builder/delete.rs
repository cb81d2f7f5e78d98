//! DELETE transitions and the unguarded-statement override

use super::descriptor::Mode;
use super::query::Query;

impl<R> Query<R> {
    /// Start a DELETE from `table`; needs `where_()` or `force()` to validate
    pub fn delete_from(&self, table: &str) -> Self {
        self.derive(|d| {
            d.delete_table = Some(table.to_string());
            d.claim_mode(Mode::DeleteFrom);
        })
    }

    /// Allow an UPDATE or DELETE without a WHERE predicate
    pub fn force(&self) -> Self {
        self.force_if(true)
    }

    /// Set or clear the unguarded-statement override
    pub fn force_if(&self, force: bool) -> Self {
        self.derive(|d| d.force = force)
    }
}
