//! Table stores the fixtures manage.
//!
//! A [`TableStore`] is the handle a fixture receives for a named system
//! object. Fixtures only need existence checks and drops; creation and
//! listing exist so tests and tooling can seed and inspect a store.

mod object;

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::StoreResult;
use crate::table::Table;

pub use object::{ObjectTableStore, TABLES_PREFIX};

#[async_trait]
pub trait TableStore: Send + Sync + Debug {
    /// Whether the table currently exists
    async fn check_table_exists(&self, table: &Table) -> StoreResult<bool>;

    /// Drop an existing table; dropping a missing table is an error
    async fn drop_table(&self, table: &Table) -> StoreResult<()>;

    /// Create the table if it is absent
    async fn create_table(&self, table: &Table) -> StoreResult<()>;

    /// Names of all tables, sorted
    async fn list_tables(&self) -> StoreResult<Vec<String>>;
}
