use serde::{Deserialize, Serialize};
use crate::config::structs::cache_config::CacheConfig;
use crate::config::structs::database_config::DatabaseConfig;
use crate::config::structs::sentry_config::SentryConfig;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Configuration {
    pub log_level: String,
    pub cache: Option<CacheConfig>,
    #[serde(default)]
    pub database: Vec<DatabaseConfig>,
    #[serde(default)]
    pub sentry_config: SentryConfig,
}
