use crate::cache::structs::connection_pool::ConnectionPool;
use std::sync::Arc;

/// Typed, prefix-namespaced access to the key-value store.
///
/// Every logical key is turned into a physical key by prepending `prefix`;
/// the same rule is used for storing, reading, removing and listing.
#[derive(Debug, Clone)]
pub struct CacheService {
    pub(crate) pool: Arc<ConnectionPool>,
    pub(crate) prefix: String,
}
