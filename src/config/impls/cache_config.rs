use crate::cache::enums::cache_engine::CacheEngine;
use crate::config::structs::cache_config::CacheConfig;

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            engine: CacheEngine::redis,
            write_endpoints: vec!["127.0.0.1:6379".to_string()],
            read_endpoints: Vec::new(),
            default_database: None,
            prefix: String::new(),
            max_write_pool_size: 8,
            max_read_pool_size: 12,
            connect_timeout: 6000,
            send_timeout: 6000,
            receive_timeout: 6000,
            pool_timeout: 6000,
            idle_timeout: 60,
            data_cache_ttl: None,
        }
    }
}
