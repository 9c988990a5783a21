//! Test doubles for table stores and fixture lifecycles.
//!
//! Available with the `testing` feature or inside this crate's tests.

mod failing;
mod recording;

pub use failing::FailingTableStore;
pub use recording::{LifecycleEvent, RecordingLifecycle, RecordingTableStore, StoreCall};
