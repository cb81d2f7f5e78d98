//! Query builder module

pub mod common;
pub mod descriptor;
pub mod query;

mod delete;
mod filter;
mod insert;
mod select;
mod update;

pub use common::{
    Condition, IntoColumns, IntoCondition, IntoOrderBy, IntoRecord, Join, JoinType, Record,
    SortDirection,
};
pub use descriptor::{Mode, QueryDescriptor};
pub use query::Query;
