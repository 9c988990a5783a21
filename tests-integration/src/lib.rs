/// Common test utilities and helpers for integration tests
use common::config::Configuration;
use common::testing::TestConfigBuilder;
use tempfile::TempDir;

pub mod fixtures;

/// Create a test configuration whose system objects live on the local
/// filesystem under a fresh temporary directory
pub fn create_test_config() -> (Configuration, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = TestConfigBuilder::new()
        .with_storage_dsn(&format!("file://{}", temp_dir.path().display()))
        .build();

    (config, temp_dir)
}

/// Initialize test logging
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
