use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{FixtureResult, StoreResult};
use crate::lifecycle::FixtureLifecycle;
use crate::store::TableStore;
use crate::table::Table;

/// A single call made against a [`RecordingTableStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    CheckExists(String),
    Drop(String),
    Create(String),
    List,
}

/// Forwards to an inner store and journals every call, including failed ones
#[derive(Debug)]
pub struct RecordingTableStore {
    inner: Arc<dyn TableStore>,
    calls: Mutex<Vec<StoreCall>>,
}

impl RecordingTableStore {
    pub fn new(inner: Arc<dyn TableStore>) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub async fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().await.clone()
    }

    pub async fn check_count(&self) -> usize {
        self.count(|call| matches!(call, StoreCall::CheckExists(_)))
            .await
    }

    pub async fn drop_count(&self) -> usize {
        self.count(|call| matches!(call, StoreCall::Drop(_))).await
    }

    pub async fn clear(&self) {
        self.calls.lock().await.clear();
    }

    async fn count(&self, predicate: impl Fn(&StoreCall) -> bool) -> usize {
        self.calls.lock().await.iter().filter(|c| predicate(c)).count()
    }

    async fn record(&self, call: StoreCall) {
        self.calls.lock().await.push(call);
    }
}

#[async_trait]
impl TableStore for RecordingTableStore {
    async fn check_table_exists(&self, table: &Table) -> StoreResult<bool> {
        self.record(StoreCall::CheckExists(table.name().to_string()))
            .await;
        self.inner.check_table_exists(table).await
    }

    async fn drop_table(&self, table: &Table) -> StoreResult<()> {
        self.record(StoreCall::Drop(table.name().to_string())).await;
        self.inner.drop_table(table).await
    }

    async fn create_table(&self, table: &Table) -> StoreResult<()> {
        self.record(StoreCall::Create(table.name().to_string()))
            .await;
        self.inner.create_table(table).await
    }

    async fn list_tables(&self) -> StoreResult<Vec<String>> {
        self.record(StoreCall::List).await;
        self.inner.list_tables().await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    SetUp,
    TearDown,
    StartLevel,
    StopLevel,
}

/// Wraps a lifecycle and journals each hook before forwarding it
pub struct RecordingLifecycle {
    inner: Arc<dyn FixtureLifecycle>,
    events: Mutex<Vec<LifecycleEvent>>,
}

impl RecordingLifecycle {
    pub fn new(inner: Arc<dyn FixtureLifecycle>) -> Self {
        Self {
            inner,
            events: Mutex::new(Vec::new()),
        }
    }

    pub async fn events(&self) -> Vec<LifecycleEvent> {
        self.events.lock().await.clone()
    }

    async fn record(&self, event: LifecycleEvent) {
        self.events.lock().await.push(event);
    }
}

#[async_trait]
impl FixtureLifecycle for RecordingLifecycle {
    async fn set_up(&self) -> FixtureResult<()> {
        self.record(LifecycleEvent::SetUp).await;
        self.inner.set_up().await
    }

    async fn tear_down(&self) -> FixtureResult<()> {
        self.record(LifecycleEvent::TearDown).await;
        self.inner.tear_down().await
    }

    async fn start_fixture_level(&self) -> FixtureResult<()> {
        self.record(LifecycleEvent::StartLevel).await;
        self.inner.start_fixture_level().await
    }

    async fn stop_fixture_level(&self) -> FixtureResult<()> {
        self.record(LifecycleEvent::StopLevel).await;
        self.inner.stop_fixture_level().await
    }
}
