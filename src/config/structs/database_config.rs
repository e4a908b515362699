use serde::{Deserialize, Serialize};
use crate::database::enums::database_drivers::DatabaseDrivers;

/// One `[[database]]` entry: a named SQL backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub name: String,
    pub engine: DatabaseDrivers,
    pub path: String,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub cache_enabled: bool,
    #[serde(default = "DatabaseConfig::default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "DatabaseConfig::default_acquire_timeout")]
    pub acquire_timeout: u64,
}
