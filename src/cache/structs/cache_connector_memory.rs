use crate::cache::structs::memory_store::MemoryStore;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CacheConnectorMemory {
    pub(crate) store: Arc<MemoryStore>,
    pub(crate) endpoint: String,
}
