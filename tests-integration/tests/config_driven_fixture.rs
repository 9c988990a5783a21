use common::config::HBASE_SYSTEM_OBJECT;
use common::testing::TestConfigBuilder;
use fixtures::{BasicFixture, Fixture, FixtureError, PxfHbaseFixture, SystemObjects, Table};
use object_store::local::LocalFileSystem;
use std::sync::Arc;
use tests_integration::fixtures::{HbaseFixtureContext, StoreTestContext};
use tests_integration::{create_test_config, init_test_logging};

#[tokio::test]
async fn test_registry_from_filesystem_config() {
    init_test_logging();
    let (config, temp_dir) = create_test_config();

    // Seed through a second handle on the same directory
    let seeding = StoreTestContext::with_object_store(Arc::new(
        LocalFileSystem::new_with_prefix(temp_dir.path()).unwrap(),
    ));
    seeding
        .seed_tables(&["hbase_table_integer_row_key", "weather"], 3)
        .await
        .unwrap();

    let registry = SystemObjects::from_config(&config).unwrap();
    let mut fixture = PxfHbaseFixture::from_config(
        &registry,
        Arc::new(BasicFixture::new("hbase")),
        &config.hbase,
    )
    .unwrap();

    fixture.set_up().await.unwrap();

    assert_eq!(seeding.table_names().await.unwrap(), vec!["weather"]);
    assert_eq!(
        fixture.last_report().unwrap().dropped,
        vec!["hbase_table_integer_row_key".to_string()]
    );
}

#[tokio::test]
async fn test_configured_table_list_overrides_defaults() {
    init_test_logging();
    let ctx = HbaseFixtureContext::new_in_memory();
    ctx.storage
        .seed_tables(&["hbase_table", "custom_lookup"], 1)
        .await
        .unwrap();
    let config = TestConfigBuilder::new()
        .with_hbase_tables(&["custom_lookup"])
        .build();

    let mut fixture = ctx.fixture_from_config(&config).unwrap();
    assert_eq!(fixture.tables(), &[Table::named("custom_lookup").unwrap()]);

    fixture.set_up().await.unwrap();

    assert_eq!(
        ctx.storage.table_names().await.unwrap(),
        vec!["hbase_table".to_string()]
    );
}

#[test]
fn test_config_without_hbase_object_fails() {
    let config = TestConfigBuilder::new().in_memory().without_hbase().build();

    let registry = SystemObjects::from_config(&config).unwrap();
    assert!(registry.get(HBASE_SYSTEM_OBJECT).is_none());

    let result = PxfHbaseFixture::from_config(
        &registry,
        Arc::new(BasicFixture::new("hbase")),
        &config.hbase,
    );
    assert!(matches!(result, Err(FixtureError::SystemObjectNotFound(_))));
}
