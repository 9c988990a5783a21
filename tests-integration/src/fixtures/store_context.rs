//! Store test contexts for fixture integration testing
//!
//! Provides in-memory and filesystem-backed table stores, plus a context that
//! wires the HBase fixture to a recording store and lifecycle.

use anyhow::Result;
use bytes::Bytes;
use common::config::{Configuration, HBASE_SYSTEM_OBJECT};
use fixtures::testing::{RecordingLifecycle, RecordingTableStore};
use fixtures::{
    BasicFixture, ObjectTableStore, PxfHbaseFixture, SystemObjects, Table, TableStore,
};
use object_store::ObjectStore;
use object_store::memory::InMemory;
use std::sync::Arc;

/// Test context for a single table store
pub struct StoreTestContext {
    pub store: Arc<ObjectTableStore>,
}

impl StoreTestContext {
    /// Creates an in-memory table store for fast tests
    pub fn new_in_memory() -> Self {
        Self::with_object_store(Arc::new(InMemory::new()))
    }

    /// Wraps an existing object store, e.g. a `LocalFileSystem` under a temp dir
    pub fn with_object_store(object_store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store: Arc::new(ObjectTableStore::new(object_store)),
        }
    }

    /// Creates each table and writes `rows` row objects into it
    pub async fn seed_tables(&self, names: &[&str], rows: usize) -> Result<()> {
        for name in names {
            let table = Table::named(*name)?;
            self.store.create_table(&table).await?;

            for row in 0..rows {
                let location =
                    ObjectTableStore::table_prefix(&table).child(format!("row-{row:05}"));
                self.store
                    .object_store()
                    .put(&location, Bytes::from(format!("{name}:{row}")).into())
                    .await?;
            }
        }
        Ok(())
    }

    pub async fn table_names(&self) -> Result<Vec<String>> {
        Ok(self.store.list_tables().await?)
    }
}

/// HBase fixture wired to a recording store and a recording lifecycle
pub struct HbaseFixtureContext {
    pub storage: StoreTestContext,
    pub recorder: Arc<RecordingTableStore>,
    pub lifecycle: Arc<RecordingLifecycle>,
    pub base: Arc<BasicFixture>,
    pub registry: SystemObjects,
}

impl HbaseFixtureContext {
    /// Creates a context whose `hbase` system object is an in-memory store
    pub fn new_in_memory() -> Self {
        let storage = StoreTestContext::new_in_memory();
        let recorder = Arc::new(RecordingTableStore::new(storage.store.clone()));
        let base = Arc::new(BasicFixture::new(HBASE_SYSTEM_OBJECT));
        let lifecycle = Arc::new(RecordingLifecycle::new(base.clone()));

        let mut registry = SystemObjects::new();
        registry.register(HBASE_SYSTEM_OBJECT, recorder.clone());

        Self {
            storage,
            recorder,
            lifecycle,
            base,
            registry,
        }
    }

    /// Builds the fixture the way the runner does, from the registry
    pub fn fixture(&self) -> Result<PxfHbaseFixture> {
        Ok(PxfHbaseFixture::from_registry(
            &self.registry,
            self.lifecycle.clone(),
        )?)
    }

    /// Builds the fixture with settings from `config`
    pub fn fixture_from_config(&self, config: &Configuration) -> Result<PxfHbaseFixture> {
        Ok(PxfHbaseFixture::from_config(
            &self.registry,
            self.lifecycle.clone(),
            &config.hbase,
        )?)
    }
}
