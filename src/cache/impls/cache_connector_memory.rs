use crate::cache::errors::CacheError;
use crate::cache::structs::cache_connector_memory::CacheConnectorMemory;
use crate::cache::structs::memory_store::MemoryStore;
use crate::cache::traits::cache_backend::CacheBackend;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;
use std::time::Duration;

impl CacheConnectorMemory {
    pub fn new(store: Arc<MemoryStore>, endpoint: &str) -> Self {
        Self {
            store,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl CacheBackend for CacheConnectorMemory {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn ping(&mut self) -> Result<(), CacheError> {
        Ok(())
    }

    async fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.store.get(key))
    }

    async fn set(&mut self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<(), CacheError> {
        self.store.set(key, value, ttl);
        debug!("[Memory] Set {}", key);
        Ok(())
    }

    async fn set_if_not_exists(&mut self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<bool, CacheError> {
        Ok(self.store.set_if_not_exists(key, value, ttl))
    }

    async fn increment_by(&mut self, key: &str, delta: i64) -> Result<i64, CacheError> {
        self.store.increment_by(key, delta)
    }

    async fn get_many(&mut self, keys: &[String]) -> Result<Vec<Option<Vec<u8>>>, CacheError> {
        Ok(keys.iter().map(|key| self.store.get(key)).collect())
    }

    async fn set_many(&mut self, entries: Vec<(String, Vec<u8>)>, ttl: Option<Duration>) -> Result<(), CacheError> {
        debug!("[Memory] Set {} keys", entries.len());
        self.store.set_many(entries, ttl);
        Ok(())
    }

    async fn exists(&mut self, key: &str) -> Result<bool, CacheError> {
        Ok(self.store.exists(key))
    }

    async fn remove(&mut self, key: &str) -> Result<bool, CacheError> {
        Ok(self.store.remove(key))
    }

    async fn remove_all(&mut self, keys: &[String]) -> Result<u64, CacheError> {
        Ok(self.store.remove_all(keys))
    }

    async fn keys(&mut self, pattern: &str) -> Result<Vec<String>, CacheError> {
        self.store.keys(pattern)
    }
}
