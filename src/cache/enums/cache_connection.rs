use crate::cache::structs::cache_connector_memory::CacheConnectorMemory;
use crate::cache::structs::cache_connector_redis::CacheConnectorRedis;

#[derive(Debug)]
pub enum CacheConnection {
    Redis(CacheConnectorRedis),
    Memory(CacheConnectorMemory),
}
