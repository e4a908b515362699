use crate::cache::enums::cache_connection::CacheConnection;
use crate::cache::errors::CacheError;
use crate::cache::traits::cache_backend::CacheBackend;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
impl CacheBackend for CacheConnection {
    fn endpoint(&self) -> &str {
        match self {
            CacheConnection::Redis(redis) => redis.endpoint(),
            CacheConnection::Memory(memory) => memory.endpoint(),
        }
    }

    async fn ping(&mut self) -> Result<(), CacheError> {
        match self {
            CacheConnection::Redis(redis) => redis.ping().await,
            CacheConnection::Memory(memory) => memory.ping().await,
        }
    }

    async fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match self {
            CacheConnection::Redis(redis) => redis.get(key).await,
            CacheConnection::Memory(memory) => memory.get(key).await,
        }
    }

    async fn set(&mut self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<(), CacheError> {
        match self {
            CacheConnection::Redis(redis) => redis.set(key, value, ttl).await,
            CacheConnection::Memory(memory) => memory.set(key, value, ttl).await,
        }
    }

    async fn set_if_not_exists(&mut self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<bool, CacheError> {
        match self {
            CacheConnection::Redis(redis) => redis.set_if_not_exists(key, value, ttl).await,
            CacheConnection::Memory(memory) => memory.set_if_not_exists(key, value, ttl).await,
        }
    }

    async fn increment_by(&mut self, key: &str, delta: i64) -> Result<i64, CacheError> {
        match self {
            CacheConnection::Redis(redis) => redis.increment_by(key, delta).await,
            CacheConnection::Memory(memory) => memory.increment_by(key, delta).await,
        }
    }

    async fn get_many(&mut self, keys: &[String]) -> Result<Vec<Option<Vec<u8>>>, CacheError> {
        match self {
            CacheConnection::Redis(redis) => redis.get_many(keys).await,
            CacheConnection::Memory(memory) => memory.get_many(keys).await,
        }
    }

    async fn set_many(&mut self, entries: Vec<(String, Vec<u8>)>, ttl: Option<Duration>) -> Result<(), CacheError> {
        match self {
            CacheConnection::Redis(redis) => redis.set_many(entries, ttl).await,
            CacheConnection::Memory(memory) => memory.set_many(entries, ttl).await,
        }
    }

    async fn exists(&mut self, key: &str) -> Result<bool, CacheError> {
        match self {
            CacheConnection::Redis(redis) => redis.exists(key).await,
            CacheConnection::Memory(memory) => memory.exists(key).await,
        }
    }

    async fn remove(&mut self, key: &str) -> Result<bool, CacheError> {
        match self {
            CacheConnection::Redis(redis) => redis.remove(key).await,
            CacheConnection::Memory(memory) => memory.remove(key).await,
        }
    }

    async fn remove_all(&mut self, keys: &[String]) -> Result<u64, CacheError> {
        match self {
            CacheConnection::Redis(redis) => redis.remove_all(keys).await,
            CacheConnection::Memory(memory) => memory.remove_all(keys).await,
        }
    }

    async fn keys(&mut self, pattern: &str) -> Result<Vec<String>, CacheError> {
        match self {
            CacheConnection::Redis(redis) => redis.keys(pattern).await,
            CacheConnection::Memory(memory) => memory.keys(pattern).await,
        }
    }
}
