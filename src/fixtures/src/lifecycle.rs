//! Fixture lifecycle hooks.
//!
//! Concrete fixtures hold a shared [`FixtureLifecycle`] and call into it
//! around their own work instead of inheriting from a base fixture.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{FixtureError, FixtureResult};

#[async_trait]
pub trait FixtureLifecycle: Send + Sync {
    async fn set_up(&self) -> FixtureResult<()>;

    async fn tear_down(&self) -> FixtureResult<()>;

    /// Open a fixture level; levels nest
    async fn start_fixture_level(&self) -> FixtureResult<()>;

    /// Close the innermost open fixture level
    async fn stop_fixture_level(&self) -> FixtureResult<()>;
}

/// A fixture the runner can drive
#[async_trait]
pub trait Fixture: Send {
    fn name(&self) -> &str;

    async fn set_up(&mut self) -> FixtureResult<()>;

    async fn tear_down(&mut self) -> FixtureResult<()>;
}

/// Where a fixture is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixtureState {
    #[default]
    Idle,
    SetUp,
    TornDown,
}

/// Default lifecycle: logs each hook and tracks open fixture levels
#[derive(Debug)]
pub struct BasicFixture {
    name: String,
    level_depth: AtomicUsize,
}

impl BasicFixture {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level_depth: AtomicUsize::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of fixture levels currently open
    pub fn level_depth(&self) -> usize {
        self.level_depth.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FixtureLifecycle for BasicFixture {
    async fn set_up(&self) -> FixtureResult<()> {
        log::info!("Setting up fixture {}", self.name);
        Ok(())
    }

    async fn tear_down(&self) -> FixtureResult<()> {
        log::info!("Tearing down fixture {}", self.name);
        Ok(())
    }

    async fn start_fixture_level(&self) -> FixtureResult<()> {
        let depth = self.level_depth.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("Fixture {} entered level {depth}", self.name);
        Ok(())
    }

    async fn stop_fixture_level(&self) -> FixtureResult<()> {
        let previous = self
            .level_depth
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |depth| {
                depth.checked_sub(1)
            })
            .map_err(|_| FixtureError::LevelUnderflow)?;
        log::debug!("Fixture {} left level {previous}", self.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_levels_nest() {
        let fixture = BasicFixture::new("hbase");

        fixture.start_fixture_level().await.unwrap();
        fixture.start_fixture_level().await.unwrap();
        assert_eq!(fixture.level_depth(), 2);

        fixture.stop_fixture_level().await.unwrap();
        fixture.stop_fixture_level().await.unwrap();
        assert_eq!(fixture.level_depth(), 0);
    }

    #[tokio::test]
    async fn test_stop_without_start_underflows() {
        let fixture = BasicFixture::new("hbase");

        let err = fixture.stop_fixture_level().await.unwrap_err();
        assert!(matches!(err, FixtureError::LevelUnderflow));
        assert_eq!(fixture.level_depth(), 0);
    }

    #[tokio::test]
    async fn test_set_up_and_tear_down_succeed() {
        let fixture = BasicFixture::new("hbase");
        assert!(fixture.set_up().await.is_ok());
        assert!(fixture.tear_down().await.is_ok());
        assert_eq!(fixture.name(), "hbase");
    }
}
