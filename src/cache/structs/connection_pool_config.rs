use crate::cache::enums::cache_engine::CacheEngine;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ConnectionPoolConfig {
    pub engine: CacheEngine,
    pub write_endpoints: Vec<String>,
    pub read_endpoints: Vec<String>,
    pub default_database: Option<i64>,
    pub max_write_pool_size: usize,
    pub max_read_pool_size: usize,
    pub connect_timeout: Duration,
    pub send_timeout: Duration,
    pub receive_timeout: Duration,
    pub pool_timeout: Duration,
    pub idle_timeout: Duration,
}
