use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use once_cell::sync::OnceCell;

pub static CONFIG: OnceCell<Configuration> = OnceCell::new();

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "pxf-automation.toml";

/// Prefix for environment overrides, e.g. `PXF__HBASE__TEARDOWN_POLICY`
pub const ENV_PREFIX: &str = "PXF__";

/// System object name under which the HBase store is registered
pub const HBASE_SYSTEM_OBJECT: &str = "hbase";

/// Tables the HBase fixture keeps absent, in cleanup order
pub const DEFAULT_HBASE_TABLES: [&str; 4] = [
    "hbase_table",
    "hbase_table_with_nulls",
    "hbase_table_integer_row_key",
    "pxflookup",
];

/// Whether `name` is a valid HBase table name: `[A-Za-z0-9_.-]+`, optionally
/// qualified as `namespace:table`, where neither part is `.` or `..`
pub fn is_valid_table_name(name: &str) -> bool {
    fn valid_part(part: &str) -> bool {
        !part.is_empty()
            && part != "."
            && part != ".."
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    }

    match name.split_once(':') {
        Some((namespace, table)) => valid_part(namespace) && valid_part(table),
        None => valid_part(name),
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Default object store DSN for system objects without their own
    pub dsn: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dsn: String::from("memory://"),
        }
    }
}

/// Connection settings for a single named system object
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SystemObjectConfig {
    /// Store DSN; falls back to `storage.dsn` when absent
    #[serde(default)]
    pub dsn: Option<String>,
}

/// What to do when the store fails while a fixture tears down
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TeardownPolicy {
    /// Propagate the error to the runner
    #[default]
    FailFast,
    /// Log the error and let the next fixture level proceed
    WarnAndContinue,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HbaseFixtureConfig {
    /// Tables kept absent by the fixture, processed in order
    pub tables: Vec<String>,
    pub teardown_policy: TeardownPolicy,
}

impl Default for HbaseFixtureConfig {
    fn default() -> Self {
        Self {
            tables: DEFAULT_HBASE_TABLES.iter().map(|t| t.to_string()).collect(),
            teardown_policy: TeardownPolicy::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Configuration {
    /// Object storage defaults
    pub storage: StorageConfig,
    /// Named system objects the orchestrator registers before any fixture runs.
    ///
    /// Files and environment variables merge into the defaults, so `hbase`
    /// is always present once loaded; only code can remove it.
    pub system_objects: BTreeMap<String, SystemObjectConfig>,
    /// HBase fixture settings
    pub hbase: HbaseFixtureConfig,
}

impl Default for Configuration {
    fn default() -> Self {
        let mut system_objects = BTreeMap::new();
        system_objects.insert(
            HBASE_SYSTEM_OBJECT.to_string(),
            SystemObjectConfig::default(),
        );

        Self {
            storage: StorageConfig::default(),
            system_objects,
            hbase: HbaseFixtureConfig::default(),
        }
    }
}

impl Configuration {
    /// Resolve the DSN for a system object, falling back to the default storage DSN
    pub fn system_object_dsn(&self, name: &str) -> Option<String> {
        self.system_objects.get(name).map(|object| {
            object
                .dsn
                .clone()
                .unwrap_or_else(|| self.storage.dsn.clone())
        })
    }

    pub fn load() -> Result<Self, Box<figment::Error>> {
        Self::figment(Toml::file(CONFIG_FILE))
            .extract()
            .map_err(Box::new)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, Box<figment::Error>> {
        Self::figment(Toml::file(path)).extract().map_err(Box::new)
    }

    fn figment(file: figment::providers::Data<Toml>) -> Figment {
        Figment::from(Serialized::defaults(Configuration::default()))
            .merge(file)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
