//! Fixtures for the PXF integration test suite.
//!
//! A fixture receives store handles from [`SystemObjects`] and a shared
//! [`FixtureLifecycle`], and prepares the stores before and after each
//! fixture level runs.

pub mod error;
pub mod hbase;
pub mod lifecycle;
pub mod registry;
pub mod store;
pub mod table;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{FixtureError, FixtureResult, StoreError, StoreResult};
pub use hbase::{CleanupReport, PxfHbaseFixture, ensure_tables_absent, hbase_tables};
pub use lifecycle::{BasicFixture, Fixture, FixtureLifecycle, FixtureState};
pub use registry::SystemObjects;
pub use store::{ObjectTableStore, TableStore};
pub use table::{Table, TableSchema};
