use thiserror::Error;

/// Failures talking to a table store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store communication failed: {0}")]
    Communication(#[from] object_store::Error),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Failed to encode table metadata: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures raised while setting up or tearing down a fixture
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("No system object registered under '{0}'")]
    SystemObjectNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid table name: '{0}'")]
    InvalidTableName(String),

    #[error("Fixture level stopped without a matching start")]
    LevelUnderflow,

    #[error("Failed to open store for system object '{name}': {reason}")]
    Storage { name: String, reason: String },
}

pub type FixtureResult<T> = Result<T, FixtureError>;
