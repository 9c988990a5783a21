//! Test configuration builder for creating fixture setups quickly.

use crate::config::{
    Configuration, HBASE_SYSTEM_OBJECT, StorageConfig, SystemObjectConfig, TeardownPolicy,
};

/// Builder for creating test configurations.
///
/// # Example
///
/// ```rust,ignore
/// use common::testing::TestConfigBuilder;
///
/// let config = TestConfigBuilder::new()
///     .in_memory()
///     .with_teardown_policy(TeardownPolicy::WarnAndContinue)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct TestConfigBuilder {
    config: Configuration,
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Configuration::default(),
        }
    }

    /// Point the default storage and every system object at `memory://`.
    pub fn in_memory(mut self) -> Self {
        self.config.storage = StorageConfig {
            dsn: "memory://".to_string(),
        };
        for object in self.config.system_objects.values_mut() {
            object.dsn = None;
        }
        self
    }

    /// Set the default storage DSN.
    pub fn with_storage_dsn(mut self, dsn: &str) -> Self {
        self.config.storage.dsn = dsn.to_string();
        self
    }

    /// Register a system object with its own DSN.
    pub fn with_system_object(mut self, name: &str, dsn: &str) -> Self {
        self.config.system_objects.insert(
            name.to_string(),
            SystemObjectConfig {
                dsn: Some(dsn.to_string()),
            },
        );
        self
    }

    /// Drop the `hbase` system object, e.g. to exercise lookup failures.
    pub fn without_hbase(mut self) -> Self {
        self.config.system_objects.remove(HBASE_SYSTEM_OBJECT);
        self
    }

    /// Replace the managed HBase table list.
    pub fn with_hbase_tables(mut self, tables: &[&str]) -> Self {
        self.config.hbase.tables = tables.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_teardown_policy(mut self, policy: TeardownPolicy) -> Self {
        self.config.hbase.teardown_policy = policy;
        self
    }

    pub fn build(self) -> Configuration {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_builder() {
        let config = TestConfigBuilder::new()
            .with_system_object(HBASE_SYSTEM_OBJECT, "file:///tmp/hbase")
            .in_memory()
            .build();

        assert_eq!(
            config.system_object_dsn(HBASE_SYSTEM_OBJECT).as_deref(),
            Some("memory://")
        );
    }

    #[test]
    fn test_without_hbase() {
        let config = TestConfigBuilder::new().without_hbase().build();
        assert!(config.system_object_dsn(HBASE_SYSTEM_OBJECT).is_none());
    }

    #[test]
    fn test_custom_tables_and_policy() {
        let config = TestConfigBuilder::new()
            .with_hbase_tables(&["pxflookup"])
            .with_teardown_policy(TeardownPolicy::WarnAndContinue)
            .build();

        assert_eq!(config.hbase.tables, vec!["pxflookup"]);
        assert_eq!(config.hbase.teardown_policy, TeardownPolicy::WarnAndContinue);
    }
}
