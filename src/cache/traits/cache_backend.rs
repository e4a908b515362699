use async_trait::async_trait;
use crate::cache::errors::CacheError;
use std::time::Duration;

/// Commands issued over a single pooled connection. Keys are physical keys;
/// prefixing happens one layer up in `CacheService`.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Endpoint this connection was opened against.
    fn endpoint(&self) -> &str;

    async fn ping(&mut self) -> Result<(), CacheError>;

    async fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Stores `value`, replacing any previous entry. `None` keeps the entry until removed.
    async fn set(&mut self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<(), CacheError>;

    /// Stores `value` only when `key` is absent. Returns whether it was stored.
    async fn set_if_not_exists(&mut self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<bool, CacheError>;

    /// Adds `delta` to the integer under `key` (absent counts as 0) and returns
    /// the new value. The entry keeps its expiry.
    async fn increment_by(&mut self, key: &str, delta: i64) -> Result<i64, CacheError>;

    /// Values in the order of `keys`, `None` where a key is absent.
    async fn get_many(&mut self, keys: &[String]) -> Result<Vec<Option<Vec<u8>>>, CacheError>;

    async fn set_many(&mut self, entries: Vec<(String, Vec<u8>)>, ttl: Option<Duration>) -> Result<(), CacheError>;

    async fn exists(&mut self, key: &str) -> Result<bool, CacheError>;

    async fn remove(&mut self, key: &str) -> Result<bool, CacheError>;

    async fn remove_all(&mut self, keys: &[String]) -> Result<u64, CacheError>;

    /// Physical keys matching a glob pattern (`*`, `?`, `[...]`, `\`).
    async fn keys(&mut self, pattern: &str) -> Result<Vec<String>, CacheError>;
}
