use crate::cache::enums::cache_connection::CacheConnection;
use crate::cache::enums::pool_kind::PoolKind;
use crate::cache::errors::CacheError;
use crate::cache::structs::pool_shard::PoolShard;
use crate::cache::structs::pooled_connection::PooledConnection;
use crate::cache::traits::cache_backend::CacheBackend;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OwnedSemaphorePermit;

impl PooledConnection {
    pub(crate) fn new(connection: CacheConnection, shard: Arc<PoolShard>, permit: OwnedSemaphorePermit) -> Self {
        Self {
            connection: Some(connection),
            shard,
            _permit: permit,
            broken: false,
        }
    }

    pub fn kind(&self) -> PoolKind {
        self.shard.kind
    }

    /// Keeps the connection out of the idle queue when it is released.
    pub fn mark_broken(&mut self) {
        self.broken = true;
    }

    pub fn is_broken(&self) -> bool {
        self.broken
    }

    fn connection(&mut self) -> Result<&mut CacheConnection, CacheError> {
        self.connection.as_mut().ok_or(CacheError::Closed)
    }

    fn track<T>(&mut self, result: Result<T, CacheError>) -> Result<T, CacheError> {
        if let Err(error) = &result
            && error.is_unavailable() {
                self.broken = true;
            }
        result
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        if let Some(connection) = self.connection.take() {
            if self.broken {
                debug!("[Pool] Discarding broken {:?} connection to {}", self.shard.kind, connection.endpoint());
            } else {
                self.shard.check_in(connection);
            }
        }
    }
}

#[async_trait]
impl CacheBackend for PooledConnection {
    fn endpoint(&self) -> &str {
        self.connection.as_ref().map_or("", |connection| connection.endpoint())
    }

    async fn ping(&mut self) -> Result<(), CacheError> {
        let result = self.connection()?.ping().await;
        self.track(result)
    }

    async fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let result = self.connection()?.get(key).await;
        self.track(result)
    }

    async fn set(&mut self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<(), CacheError> {
        let result = self.connection()?.set(key, value, ttl).await;
        self.track(result)
    }

    async fn set_if_not_exists(&mut self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<bool, CacheError> {
        let result = self.connection()?.set_if_not_exists(key, value, ttl).await;
        self.track(result)
    }

    async fn increment_by(&mut self, key: &str, delta: i64) -> Result<i64, CacheError> {
        let result = self.connection()?.increment_by(key, delta).await;
        self.track(result)
    }

    async fn get_many(&mut self, keys: &[String]) -> Result<Vec<Option<Vec<u8>>>, CacheError> {
        let result = self.connection()?.get_many(keys).await;
        self.track(result)
    }

    async fn set_many(&mut self, entries: Vec<(String, Vec<u8>)>, ttl: Option<Duration>) -> Result<(), CacheError> {
        let result = self.connection()?.set_many(entries, ttl).await;
        self.track(result)
    }

    async fn exists(&mut self, key: &str) -> Result<bool, CacheError> {
        let result = self.connection()?.exists(key).await;
        self.track(result)
    }

    async fn remove(&mut self, key: &str) -> Result<bool, CacheError> {
        let result = self.connection()?.remove(key).await;
        self.track(result)
    }

    async fn remove_all(&mut self, keys: &[String]) -> Result<u64, CacheError> {
        let result = self.connection()?.remove_all(keys).await;
        self.track(result)
    }

    async fn keys(&mut self, pattern: &str) -> Result<Vec<String>, CacheError> {
        let result = self.connection()?.keys(pattern).await;
        self.track(result)
    }
}
