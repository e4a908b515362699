use crate::cache::enums::cache_engine::CacheEngine;
use crate::cache::structs::connection_pool_config::ConnectionPoolConfig;
use crate::config::structs::cache_config::CacheConfig;
use std::time::Duration;

impl Default for ConnectionPoolConfig {
    fn default() -> Self {
        Self {
            engine: CacheEngine::redis,
            write_endpoints: Vec::new(),
            read_endpoints: Vec::new(),
            default_database: None,
            max_write_pool_size: 8,
            max_read_pool_size: 12,
            connect_timeout: Duration::from_millis(6000),
            send_timeout: Duration::from_millis(6000),
            receive_timeout: Duration::from_millis(6000),
            pool_timeout: Duration::from_millis(6000),
            idle_timeout: Duration::from_secs(60),
        }
    }
}

impl From<&CacheConfig> for ConnectionPoolConfig {
    fn from(config: &CacheConfig) -> Self {
        Self {
            engine: config.engine,
            write_endpoints: config.write_endpoints.clone(),
            read_endpoints: config.read_endpoints.clone(),
            default_database: config.default_database,
            max_write_pool_size: config.max_write_pool_size,
            max_read_pool_size: config.max_read_pool_size,
            connect_timeout: Duration::from_millis(config.connect_timeout),
            send_timeout: Duration::from_millis(config.send_timeout),
            receive_timeout: Duration::from_millis(config.receive_timeout),
            pool_timeout: Duration::from_millis(config.pool_timeout),
            idle_timeout: Duration::from_secs(config.idle_timeout),
        }
    }
}

impl ConnectionPoolConfig {
    /// Endpoints backing the read-only pool; the write endpoints when none are configured.
    pub fn effective_read_endpoints(&self) -> &[String] {
        if self.read_endpoints.is_empty() {
            &self.write_endpoints
        } else {
            &self.read_endpoints
        }
    }

    /// Upper bound for one command round trip on an established connection.
    pub fn command_timeout(&self) -> Duration {
        self.send_timeout + self.receive_timeout
    }
}
