//! The `Query` chain type

use std::fmt;
use std::marker::PhantomData;

use super::descriptor::QueryDescriptor;
use crate::compiler::{self, CompiledQuery};
use crate::executor::Row;
use crate::schema::Table;
use crate::{validator, Options, Result, Value};

/// An immutable, chainable query.
///
/// Every builder method borrows the query and returns a new one, so any
/// intermediate query can be reused as the root of several chains:
///
/// ```
/// use quill_core::from;
///
/// let users = from("users");
/// let first = users.where_(("id", "=", 1));
/// let second = users.where_(("id", "=", 2));
///
/// assert_eq!(users.to_sql(), "SELECT * FROM users");
/// assert_eq!(first.parameters(), vec![1.into()]);
/// assert_eq!(second.parameters(), vec![2.into()]);
/// ```
///
/// `R` is the row type produced by [`Query::all`] and [`Query::first`].
pub struct Query<R = Row> {
    pub(crate) descriptor: QueryDescriptor,
    pub(crate) options: Options,
    _row: PhantomData<fn() -> R>,
}

impl Query<Row> {
    /// Create an empty chain root with default options
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Create an empty chain root; `options.table` becomes the subject table
    pub fn with_options(options: Options) -> Self {
        Query::from_parts(
            QueryDescriptor {
                from_table: options.get_table().map(str::to_string),
                clause_style: options.get_clause_style(),
                ..QueryDescriptor::default()
            },
            options,
        )
    }

    /// Create a chain root bound to a typed table
    ///
    /// # Examples
    /// ```
    /// use quill_core::{Options, Query, Table};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Shader { id: i64, title: String }
    ///
    /// struct Shaders;
    /// impl Table for Shaders {
    ///     const NAME: &'static str = "shaders";
    ///     type Row = Shader;
    /// }
    ///
    /// let latest = Query::for_table::<Shaders>(Options::new())
    ///     .order_by("created_at DESC")
    ///     .limit(10);
    /// assert_eq!(latest.to_sql(), "SELECT * FROM shaders ORDER BY ? LIMIT ?");
    /// ```
    pub fn for_table<T: Table>(options: Options) -> Query<T::Row> {
        Query::with_options(options.table(T::NAME)).with_row_type()
    }
}

impl Default for Query<Row> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Query<R> {
    pub(crate) fn from_parts(descriptor: QueryDescriptor, options: Options) -> Self {
        Self {
            descriptor,
            options,
            _row: PhantomData,
        }
    }

    /// Produce a sibling query with one change applied to a copy of the descriptor
    pub(crate) fn derive(&self, change: impl FnOnce(&mut QueryDescriptor)) -> Self {
        let mut descriptor = self.descriptor.clone();
        change(&mut descriptor);
        Query::from_parts(descriptor, self.options.clone())
    }

    /// Same query, rows mapped to a different type
    pub fn with_row_type<R2>(&self) -> Query<R2> {
        Query::from_parts(self.descriptor.clone(), self.options.clone())
    }

    pub fn descriptor(&self) -> &QueryDescriptor {
        &self.descriptor
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Check the descriptor for unsafe or inconsistent states
    pub fn validate(&self) -> Result<()> {
        validator::validate(&self.descriptor)?;
        Ok(())
    }

    /// Render SQL text and positional parameters, without validating
    pub fn compile(&self) -> CompiledQuery {
        compiler::compile(&self.descriptor)
    }

    /// The SQL text only
    pub fn to_sql(&self) -> String {
        self.compile().sql
    }

    /// The bound parameters only, in placeholder order
    pub fn parameters(&self) -> Vec<Value> {
        self.compile().parameters
    }
}

impl<R> Clone for Query<R> {
    fn clone(&self) -> Self {
        Query::from_parts(self.descriptor.clone(), self.options.clone())
    }
}

impl<R> fmt::Debug for Query<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("descriptor", &self.descriptor)
            .field("options", &self.options)
            .finish()
    }
}
