use crate::cache::enums::cache_connection::CacheConnection;
use crate::cache::structs::pool_shard::PoolShard;
use std::sync::Arc;
use tokio::sync::OwnedSemaphorePermit;

/// A connection checked out of a [`PoolShard`]. Dropping the guard returns the
/// connection to the shard it came from, or discards it when marked broken.
#[derive(Debug)]
pub struct PooledConnection {
    pub(crate) connection: Option<CacheConnection>,
    pub(crate) shard: Arc<PoolShard>,
    pub(crate) _permit: OwnedSemaphorePermit,
    pub(crate) broken: bool,
}
