use common::config::is_valid_table_name;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FixtureError, FixtureResult};

/// Column families declared for a table
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub column_families: Vec<String>,
}

impl TableSchema {
    pub fn new<I, S>(column_families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column_families: column_families.into_iter().map(Into::into).collect(),
        }
    }
}

/// A table whose presence is controlled by a fixture.
///
/// The schema is optional metadata; cleanup only ever looks at the name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    name: String,
    schema: Option<TableSchema>,
}

impl Table {
    /// Build a table reference.
    ///
    /// Names follow HBase: `[A-Za-z0-9_.-]+` with an optional `namespace:`
    /// qualifier, never `.` or `..`. Such names are stored verbatim as
    /// object store path segments.
    pub fn new(name: impl Into<String>, schema: Option<TableSchema>) -> FixtureResult<Self> {
        let name = name.into();
        if !is_valid_table_name(&name) {
            return Err(FixtureError::InvalidTableName(name));
        }
        Ok(Self { name, schema })
    }

    /// For names known to be valid at compile time
    pub(crate) fn from_static(name: &'static str) -> Self {
        debug_assert!(is_valid_table_name(name));
        Self {
            name: name.to_string(),
            schema: None,
        }
    }

    /// Table reference without schema metadata
    pub fn named(name: impl Into<String>) -> FixtureResult<Self> {
        Self::new(name, None)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> Option<&TableSchema> {
        self.schema.as_ref()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
