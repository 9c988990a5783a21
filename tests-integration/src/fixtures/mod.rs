//! Test fixtures for integration testing
//!
//! Reusable contexts wiring a table store, a recording journal and a fixture
//! lifecycle together the way a test run orchestrator would.

mod store_context;

pub use store_context::{HbaseFixtureContext, StoreTestContext};
