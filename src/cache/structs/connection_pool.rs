use crate::cache::structs::connection_pool_config::ConnectionPoolConfig;
use crate::cache::structs::memory_store::MemoryStore;
use crate::cache::structs::pool_shard::PoolShard;
use std::sync::Arc;

#[derive(Debug)]
pub struct ConnectionPool {
    pub(crate) config: ConnectionPoolConfig,
    pub(crate) write: Arc<PoolShard>,
    pub(crate) read: Arc<PoolShard>,
    pub(crate) memory: Option<Arc<MemoryStore>>,
}
