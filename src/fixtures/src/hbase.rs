//! HBase fixture: keeps the PXF HBase test tables out of the store before
//! and after a fixture level runs.

use async_trait::async_trait;
use std::sync::Arc;

use common::config::{
    DEFAULT_HBASE_TABLES, HBASE_SYSTEM_OBJECT, HbaseFixtureConfig, TeardownPolicy,
};

use crate::error::{FixtureError, FixtureResult, StoreResult};
use crate::lifecycle::{Fixture, FixtureLifecycle, FixtureState};
use crate::registry::SystemObjects;
use crate::store::TableStore;
use crate::table::Table;

/// Outcome of a cleanup pass, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub checked: Vec<String>,
    pub dropped: Vec<String>,
}

/// The tables managed by the HBase fixture, without schema metadata
pub fn hbase_tables() -> Vec<Table> {
    DEFAULT_HBASE_TABLES
        .into_iter()
        .map(Table::from_static)
        .collect()
}

/// Drop every table in `tables` that exists, in order.
///
/// Stops at the first store error; tables after it are left untouched.
pub async fn ensure_tables_absent(
    store: &dyn TableStore,
    tables: &[Table],
) -> StoreResult<CleanupReport> {
    let mut report = CleanupReport::default();

    for table in tables {
        report.checked.push(table.name().to_string());
        if store.check_table_exists(table).await? {
            log::info!("Dropping existing table {table}");
            store.drop_table(table).await?;
            report.dropped.push(table.name().to_string());
        } else {
            log::debug!("Table {table} absent, nothing to drop");
        }
    }

    Ok(report)
}

pub struct PxfHbaseFixture {
    hbase: Arc<dyn TableStore>,
    lifecycle: Arc<dyn FixtureLifecycle>,
    tables: Vec<Table>,
    teardown_policy: TeardownPolicy,
    state: FixtureState,
    last_report: Option<CleanupReport>,
}

impl PxfHbaseFixture {
    pub fn new(hbase: Arc<dyn TableStore>, lifecycle: Arc<dyn FixtureLifecycle>) -> Self {
        Self {
            hbase,
            lifecycle,
            tables: hbase_tables(),
            teardown_policy: TeardownPolicy::default(),
            state: FixtureState::Idle,
            last_report: None,
        }
    }

    /// Resolve the `hbase` system object; fails before touching any table
    pub fn from_registry(
        registry: &SystemObjects,
        lifecycle: Arc<dyn FixtureLifecycle>,
    ) -> FixtureResult<Self> {
        let hbase = registry.require(HBASE_SYSTEM_OBJECT)?;
        Ok(Self::new(hbase, lifecycle))
    }

    /// Like [`from_registry`](Self::from_registry), with tables and teardown
    /// policy taken from configuration
    pub fn from_config(
        registry: &SystemObjects,
        lifecycle: Arc<dyn FixtureLifecycle>,
        config: &HbaseFixtureConfig,
    ) -> FixtureResult<Self> {
        let tables = config
            .tables
            .iter()
            .map(|name| Table::named(name.as_str()))
            .collect::<FixtureResult<Vec<_>>>()?;

        Ok(Self::from_registry(registry, lifecycle)?
            .with_tables(tables)
            .with_teardown_policy(config.teardown_policy))
    }

    pub fn with_tables(mut self, tables: Vec<Table>) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_teardown_policy(mut self, policy: TeardownPolicy) -> Self {
        self.teardown_policy = policy;
        self
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn state(&self) -> FixtureState {
        self.state
    }

    /// Report of the most recent successful cleanup pass
    pub fn last_report(&self) -> Option<&CleanupReport> {
        self.last_report.as_ref()
    }

    async fn clean(&mut self) -> StoreResult<()> {
        let report = ensure_tables_absent(self.hbase.as_ref(), &self.tables).await?;
        log::info!(
            "HBase cleanup checked {} tables, dropped {:?}",
            report.checked.len(),
            report.dropped
        );
        self.last_report = Some(report);
        Ok(())
    }
}

#[async_trait]
impl Fixture for PxfHbaseFixture {
    fn name(&self) -> &str {
        HBASE_SYSTEM_OBJECT
    }

    async fn set_up(&mut self) -> FixtureResult<()> {
        self.lifecycle.set_up().await?;
        self.lifecycle.start_fixture_level().await?;

        self.clean().await?;

        self.lifecycle.stop_fixture_level().await?;
        self.state = FixtureState::SetUp;
        Ok(())
    }

    async fn tear_down(&mut self) -> FixtureResult<()> {
        self.lifecycle.start_fixture_level().await?;

        if let Err(e) = self.clean().await {
            match self.teardown_policy {
                TeardownPolicy::FailFast => return Err(FixtureError::Store(e)),
                TeardownPolicy::WarnAndContinue => {
                    log::warn!("Ignoring HBase cleanup failure during teardown: {e}");
                }
            }
        }

        self.lifecycle.stop_fixture_level().await?;
        self.lifecycle.tear_down().await?;
        self.state = FixtureState::TornDown;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::BasicFixture;
    use crate::store::ObjectTableStore;
    use crate::testing::{
        FailingTableStore, LifecycleEvent, RecordingLifecycle, RecordingTableStore, StoreCall,
    };
    use object_store::memory::InMemory;

    fn memory_store() -> Arc<dyn TableStore> {
        Arc::new(ObjectTableStore::new(Arc::new(InMemory::new())))
    }

    async fn seed(store: &dyn TableStore, names: &[&str]) {
        for name in names {
            store.create_table(&Table::named(*name).unwrap()).await.unwrap();
        }
    }

    #[test]
    fn test_hbase_tables_order() {
        let names: Vec<_> = hbase_tables().iter().map(|t| t.name().to_string()).collect();
        assert_eq!(
            names,
            vec![
                "hbase_table",
                "hbase_table_with_nulls",
                "hbase_table_integer_row_key",
                "pxflookup"
            ]
        );
        assert!(hbase_tables().iter().all(|t| t.schema().is_none()));
    }

    #[tokio::test]
    async fn test_cleanup_drops_present_tables_only() {
        let inner = memory_store();
        seed(inner.as_ref(), &["hbase_table", "pxflookup", "unrelated"]).await;
        let store = RecordingTableStore::new(inner.clone());

        let report = ensure_tables_absent(&store, &hbase_tables()).await.unwrap();

        assert_eq!(report.dropped, vec!["hbase_table", "pxflookup"]);
        assert_eq!(inner.list_tables().await.unwrap(), vec!["unrelated"]);
        assert_eq!(
            store.calls().await,
            vec![
                StoreCall::CheckExists("hbase_table".into()),
                StoreCall::Drop("hbase_table".into()),
                StoreCall::CheckExists("hbase_table_with_nulls".into()),
                StoreCall::CheckExists("hbase_table_integer_row_key".into()),
                StoreCall::CheckExists("pxflookup".into()),
                StoreCall::Drop("pxflookup".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_cleanup_on_empty_store_only_checks() {
        let store = RecordingTableStore::new(memory_store());

        let report = ensure_tables_absent(&store, &hbase_tables()).await.unwrap();

        assert_eq!(report.checked.len(), 4);
        assert!(report.dropped.is_empty());
        assert_eq!(store.check_count().await, 4);
        assert_eq!(store.drop_count().await, 0);
    }

    #[tokio::test]
    async fn test_cleanup_stops_at_first_error() {
        let inner = memory_store();
        seed(inner.as_ref(), &["hbase_table", "pxflookup"]).await;
        let failing = FailingTableStore::new(inner.clone()).fail_check_on("hbase_table_with_nulls");
        let store = RecordingTableStore::new(Arc::new(failing));

        let result = ensure_tables_absent(&store, &hbase_tables()).await;

        assert!(result.is_err());
        // hbase_table was dropped before the failure; pxflookup never reached
        assert_eq!(inner.list_tables().await.unwrap(), vec!["pxflookup"]);
        assert!(!store.calls().await.contains(&StoreCall::CheckExists("pxflookup".into())));
    }

    #[tokio::test]
    async fn test_set_up_balances_levels() {
        let store = memory_store();
        seed(store.as_ref(), &["hbase_table_with_nulls"]).await;
        let lifecycle = Arc::new(BasicFixture::new("hbase"));
        let mut fixture = PxfHbaseFixture::new(store.clone(), lifecycle.clone());

        fixture.set_up().await.unwrap();

        assert_eq!(fixture.state(), FixtureState::SetUp);
        assert_eq!(lifecycle.level_depth(), 0);
        assert_eq!(
            fixture.last_report().unwrap().dropped,
            vec!["hbase_table_with_nulls"]
        );
        assert!(store.list_tables().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lifecycle_hook_order() {
        let lifecycle = Arc::new(RecordingLifecycle::new(Arc::new(BasicFixture::new("hbase"))));
        let mut fixture = PxfHbaseFixture::new(memory_store(), lifecycle.clone());

        fixture.set_up().await.unwrap();
        fixture.tear_down().await.unwrap();

        assert_eq!(
            lifecycle.events().await,
            vec![
                LifecycleEvent::SetUp,
                LifecycleEvent::StartLevel,
                LifecycleEvent::StopLevel,
                LifecycleEvent::StartLevel,
                LifecycleEvent::StopLevel,
                LifecycleEvent::TearDown,
            ]
        );
        assert_eq!(fixture.state(), FixtureState::TornDown);
    }

    #[tokio::test]
    async fn test_teardown_fail_fast() {
        let failing = FailingTableStore::new(memory_store()).fail_check_on("hbase_table");
        let mut fixture =
            PxfHbaseFixture::new(Arc::new(failing), Arc::new(BasicFixture::new("hbase")));

        let err = fixture.tear_down().await.unwrap_err();
        assert!(matches!(err, FixtureError::Store(_)));
        assert_ne!(fixture.state(), FixtureState::TornDown);
    }

    #[tokio::test]
    async fn test_teardown_warn_and_continue() {
        let failing = FailingTableStore::new(memory_store()).fail_drop_on("pxflookup");
        let inner = failing.inner().clone();
        seed(inner.as_ref(), &["pxflookup"]).await;
        let lifecycle = Arc::new(BasicFixture::new("hbase"));
        let mut fixture = PxfHbaseFixture::new(Arc::new(failing), lifecycle.clone())
            .with_teardown_policy(TeardownPolicy::WarnAndContinue);

        fixture.tear_down().await.unwrap();

        assert_eq!(fixture.state(), FixtureState::TornDown);
        assert_eq!(lifecycle.level_depth(), 0);
        assert!(fixture.last_report().is_none());
    }

    #[tokio::test]
    async fn test_from_registry_without_hbase() {
        let result =
            PxfHbaseFixture::from_registry(&SystemObjects::new(), Arc::new(BasicFixture::new("hbase")));
        assert!(matches!(
            result,
            Err(FixtureError::SystemObjectNotFound(name)) if name == "hbase"
        ));
    }

    #[tokio::test]
    async fn test_from_config_rejects_invalid_table() {
        let mut registry = SystemObjects::new();
        registry.register(HBASE_SYSTEM_OBJECT, memory_store());
        let config = HbaseFixtureConfig {
            tables: vec!["ok".into(), "not/ok".into()],
            ..HbaseFixtureConfig::default()
        };

        let result =
            PxfHbaseFixture::from_config(&registry, Arc::new(BasicFixture::new("hbase")), &config);
        assert!(matches!(result, Err(FixtureError::InvalidTableName(_))));
    }
}
