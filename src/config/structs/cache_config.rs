use crate::cache::enums::cache_engine::CacheEngine;
use serde::{
    Deserialize,
    Serialize
};

/// The `[cache]` section. Timeouts are in milliseconds except `idle_timeout`
/// and `data_cache_ttl`, which are in seconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    pub engine: CacheEngine,
    pub write_endpoints: Vec<String>,
    pub read_endpoints: Vec<String>,
    pub default_database: Option<i64>,
    pub prefix: String,
    pub max_write_pool_size: usize,
    pub max_read_pool_size: usize,
    pub connect_timeout: u64,
    pub send_timeout: u64,
    pub receive_timeout: u64,
    pub pool_timeout: u64,
    pub idle_timeout: u64,
    pub data_cache_ttl: Option<u64>,
}
