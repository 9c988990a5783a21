use async_trait::async_trait;
use bytes::Bytes;
use futures::{StreamExt, TryStreamExt};
use object_store::ObjectStore;
use object_store::path::Path;
use std::sync::Arc;

use super::TableStore;
use crate::error::{StoreError, StoreResult};
use crate::table::Table;

/// Root under which every table keeps its objects
pub const TABLES_PREFIX: &str = "tables";

const METADATA_FILE: &str = "_metadata";

/// Table store laid out on an object store.
///
/// A table exists while at least one object lives under `tables/<name>/`.
/// Creating a table writes `tables/<name>/_metadata` holding the JSON
/// encoded schema (`null` when absent).
#[derive(Debug, Clone)]
pub struct ObjectTableStore {
    object_store: Arc<dyn ObjectStore>,
}

impl ObjectTableStore {
    pub fn new(object_store: Arc<dyn ObjectStore>) -> Self {
        Self { object_store }
    }

    /// Underlying object store, e.g. to write row data under a table prefix
    pub fn object_store(&self) -> &Arc<dyn ObjectStore> {
        &self.object_store
    }

    /// Prefix holding all objects of `table`
    pub fn table_prefix(table: &Table) -> Path {
        Path::from(TABLES_PREFIX).child(table.name())
    }

    async fn has_objects(&self, prefix: &Path) -> StoreResult<bool> {
        let mut objects = self.object_store.list(Some(prefix));

        match objects.next().await {
            Some(Ok(_)) => Ok(true),
            Some(Err(e)) => Err(StoreError::Communication(e)),
            None => Ok(false),
        }
    }
}

#[async_trait]
impl TableStore for ObjectTableStore {
    async fn check_table_exists(&self, table: &Table) -> StoreResult<bool> {
        self.has_objects(&Self::table_prefix(table)).await
    }

    async fn drop_table(&self, table: &Table) -> StoreResult<()> {
        let prefix = Self::table_prefix(table);
        let locations: Vec<Path> = self
            .object_store
            .list(Some(&prefix))
            .map_ok(|meta| meta.location)
            .try_collect()
            .await?;

        if locations.is_empty() {
            return Err(StoreError::TableNotFound(table.name().to_string()));
        }

        for location in &locations {
            self.object_store.delete(location).await?;
        }

        log::debug!(
            "Dropped table {} ({} objects removed)",
            table,
            locations.len()
        );
        Ok(())
    }

    async fn create_table(&self, table: &Table) -> StoreResult<()> {
        if self.check_table_exists(table).await? {
            log::debug!("Table {table} already exists");
            return Ok(());
        }

        let metadata = serde_json::to_vec(&table.schema())?;
        let location = Self::table_prefix(table).child(METADATA_FILE);
        self.object_store
            .put(&location, Bytes::from(metadata).into())
            .await?;

        log::debug!("Created table {table}");
        Ok(())
    }

    async fn list_tables(&self) -> StoreResult<Vec<String>> {
        let root = Path::from(TABLES_PREFIX);
        let listing = self.object_store.list_with_delimiter(Some(&root)).await?;

        // Filesystem backends keep empty directories behind after a drop
        let mut names = Vec::new();
        for prefix in &listing.common_prefixes {
            let Some(name) = prefix.filename() else {
                continue;
            };
            if self.has_objects(prefix).await? {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
