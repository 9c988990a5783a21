//! Named system objects shared across fixtures.
//!
//! The orchestrator builds one [`SystemObjects`] per test run and hands the
//! resolved handles to fixtures; fixtures never look objects up globally.

use std::collections::BTreeMap;
use std::sync::Arc;

use common::config::Configuration;
use common::storage::create_object_store_from_dsn;

use crate::error::{FixtureError, FixtureResult};
use crate::store::{ObjectTableStore, TableStore};

#[derive(Debug, Default, Clone)]
pub struct SystemObjects {
    objects: BTreeMap<String, Arc<dyn TableStore>>,
}

impl SystemObjects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a store for every system object in the configuration.
    ///
    /// A loaded configuration always lists `hbase`; objects without a DSN of
    /// their own use `storage.dsn`.
    pub fn from_config(config: &Configuration) -> FixtureResult<Self> {
        let mut registry = Self::new();

        for (name, object) in &config.system_objects {
            let dsn = object.dsn.as_deref().unwrap_or(&config.storage.dsn);
            let object_store =
                create_object_store_from_dsn(dsn).map_err(|e| FixtureError::Storage {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;

            log::info!("Registered system object '{name}' at {dsn}");
            registry.register(name.clone(), Arc::new(ObjectTableStore::new(object_store)));
        }

        Ok(registry)
    }

    /// Register a store, replacing any previous object with the same name
    pub fn register(&mut self, name: impl Into<String>, store: Arc<dyn TableStore>) {
        let name = name.into();
        if self.objects.insert(name.clone(), store).is_some() {
            log::debug!("Replaced system object '{name}'");
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn TableStore>> {
        self.objects.get(name).cloned()
    }

    /// Like [`get`](Self::get) but missing objects are an error
    pub fn require(&self, name: &str) -> FixtureResult<Arc<dyn TableStore>> {
        self.get(name)
            .ok_or_else(|| FixtureError::SystemObjectNotFound(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }
}
