use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{StoreError, StoreResult};
use crate::store::TableStore;
use crate::table::Table;

/// Store that fails existence checks or drops for chosen tables with
/// [`StoreError::Unavailable`], forwarding everything else
#[derive(Debug)]
pub struct FailingTableStore {
    inner: Arc<dyn TableStore>,
    fail_checks: HashSet<String>,
    fail_drops: HashSet<String>,
}

impl FailingTableStore {
    pub fn new(inner: Arc<dyn TableStore>) -> Self {
        Self {
            inner,
            fail_checks: HashSet::new(),
            fail_drops: HashSet::new(),
        }
    }

    pub fn fail_check_on(mut self, table: &str) -> Self {
        self.fail_checks.insert(table.to_string());
        self
    }

    pub fn fail_drop_on(mut self, table: &str) -> Self {
        self.fail_drops.insert(table.to_string());
        self
    }

    pub fn inner(&self) -> &Arc<dyn TableStore> {
        &self.inner
    }
}

#[async_trait]
impl TableStore for FailingTableStore {
    async fn check_table_exists(&self, table: &Table) -> StoreResult<bool> {
        if self.fail_checks.contains(table.name()) {
            return Err(StoreError::Unavailable(format!(
                "existence check for {table} refused"
            )));
        }
        self.inner.check_table_exists(table).await
    }

    async fn drop_table(&self, table: &Table) -> StoreResult<()> {
        if self.fail_drops.contains(table.name()) {
            return Err(StoreError::Unavailable(format!("drop of {table} refused")));
        }
        self.inner.drop_table(table).await
    }

    async fn create_table(&self, table: &Table) -> StoreResult<()> {
        self.inner.create_table(table).await
    }

    async fn list_tables(&self) -> StoreResult<Vec<String>> {
        self.inner.list_tables().await
    }
}
