use crate::cache::errors::CacheError;
use crate::cache::impls::memory_store::escape_glob;
use crate::cache::structs::cache_service::CacheService;
use crate::cache::structs::connection_pool::ConnectionPool;
use crate::cache::structs::connection_pool_config::ConnectionPoolConfig;
use crate::cache::traits::cache_backend::CacheBackend;
use crate::config::structs::cache_config::CacheConfig;
use log::{debug, info};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

const LOG_PREFIX: &str = "[Cache]";

impl CacheService {
    pub fn new(pool: Arc<ConnectionPool>, prefix: &str) -> CacheService {
        CacheService {
            pool,
            prefix: prefix.to_string(),
        }
    }

    /// Builds the connection pool described by `config` and wraps it.
    pub fn from_config(config: &CacheConfig) -> Result<CacheService, CacheError> {
        let transaction = crate::utils::sentry_tracing::start_trace_transaction("cache_init", "cache");
        let result = ConnectionPool::new(ConnectionPoolConfig::from(config))
            .map(|pool| CacheService::new(Arc::new(pool), &config.prefix));
        if let Some(txn) = transaction {
            match &result {
                Ok(_) => txn.set_tag("result", "success"),
                Err(e) => txn.set_tag("result", format!("error: {:?}", e)),
            }
            txn.set_tag("engine", config.engine.to_string());
            txn.finish();
        }
        if result.is_ok() {
            info!("{} Service ready with prefix '{}'", LOG_PREFIX, config.prefix);
        }
        result
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn pool(&self) -> &Arc<ConnectionPool> {
        &self.pool
    }

    pub fn physical_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    pub async fn ping(&self) -> Result<(), CacheError> {
        let mut connection = self.pool.acquire(false).await?;
        connection.ping().await
    }

    /// Stores `value` under `key`, overwriting any previous entry.
    /// `None` (or a zero duration) keeps the entry until it is removed.
    pub async fn set<T: Serialize + ?Sized + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        let payload = serde_json::to_vec(value)?;
        let physical_key = self.physical_key(key);
        let mut connection = self.pool.acquire(false).await?;
        connection.set(&physical_key, payload, ttl).await
    }

    /// Cached value for `key`, or `T::default()` when the key is absent.
    pub async fn get<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, CacheError> {
        Ok(self.try_get(key).await?.unwrap_or_default())
    }

    pub async fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let physical_key = self.physical_key(key);
        let payload = {
            let mut connection = self.pool.acquire(true).await?;
            connection.get(&physical_key).await?
        };
        match payload {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub async fn contains_key(&self, key: &str) -> Result<bool, CacheError> {
        let physical_key = self.physical_key(key);
        let mut connection = self.pool.acquire(true).await?;
        connection.exists(&physical_key).await
    }

    pub async fn remove(&self, key: &str) -> Result<bool, CacheError> {
        let physical_key = self.physical_key(key);
        let mut connection = self.pool.acquire(false).await?;
        connection.remove(&physical_key).await
    }

    pub async fn remove_all<S: AsRef<str> + Sync>(&self, keys: &[S]) -> Result<u64, CacheError> {
        if keys.is_empty() {
            return Ok(0);
        }
        let physical_keys: Vec<String> = keys.iter().map(|key| self.physical_key(key.as_ref())).collect();
        let mut connection = self.pool.acquire(false).await?;
        connection.remove_all(&physical_keys).await
    }

    /// Stores `value` only when `key` is absent; returns whether it was stored.
    pub async fn set_if_not_exists<T: Serialize + ?Sized + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<bool, CacheError> {
        let payload = serde_json::to_vec(value)?;
        let physical_key = self.physical_key(key);
        let mut connection = self.pool.acquire(false).await?;
        connection.set_if_not_exists(&physical_key, payload, ttl).await
    }

    /// Atomically adds `delta` to the counter under `key`; an absent key starts at 0.
    /// The counter reads back through [`get`](Self::get) as any integer type.
    pub async fn increment_by(&self, key: &str, delta: i64) -> Result<i64, CacheError> {
        let physical_key = self.physical_key(key);
        let mut connection = self.pool.acquire(false).await?;
        connection.increment_by(&physical_key, delta).await
    }

    pub async fn increment(&self, key: &str) -> Result<i64, CacheError> {
        self.increment_by(key, 1).await
    }

    pub async fn decrement_by(&self, key: &str, delta: i64) -> Result<i64, CacheError> {
        let delta = delta
            .checked_neg()
            .ok_or_else(|| CacheError::Rejected(format!("cannot decrement '{}' by {}", key, delta)))?;
        self.increment_by(key, delta).await
    }

    pub async fn decrement(&self, key: &str) -> Result<i64, CacheError> {
        self.increment_by(key, -1).await
    }

    /// Values of `keys` in order, `None` for absent keys.
    pub async fn get_many<T: DeserializeOwned, S: AsRef<str> + Sync>(&self, keys: &[S]) -> Result<Vec<Option<T>>, CacheError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let physical_keys: Vec<String> = keys.iter().map(|key| self.physical_key(key.as_ref())).collect();
        let payloads = {
            let mut connection = self.pool.acquire(true).await?;
            connection.get_many(&physical_keys).await?
        };
        payloads
            .into_iter()
            .map(|payload| match payload {
                Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
                None => Ok(None),
            })
            .collect()
    }

    /// Stores every entry with the same `ttl`.
    pub async fn set_many<T: Serialize + Sync, S: AsRef<str> + Sync>(&self, entries: &[(S, T)], ttl: Option<Duration>) -> Result<(), CacheError> {
        if entries.is_empty() {
            return Ok(());
        }
        let mut payloads = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            payloads.push((self.physical_key(key.as_ref()), serde_json::to_vec(value)?));
        }
        let mut connection = self.pool.acquire(false).await?;
        connection.set_many(payloads, ttl).await
    }

    /// Removes every key matching `prefix + pattern_suffix`. Returns how many were removed.
    pub async fn remove_by_pattern(&self, pattern_suffix: &str) -> Result<u64, CacheError> {
        let pattern = format!("{}{}", escape_glob(&self.prefix), pattern_suffix);
        let mut connection = self.pool.acquire(false).await?;
        let physical_keys = connection.keys(&pattern).await?;
        if physical_keys.is_empty() {
            return Ok(0);
        }
        let removed = connection.remove_all(&physical_keys).await?;
        debug!("{} Removed {} keys matching '{}'", LOG_PREFIX, removed, pattern);
        Ok(removed)
    }

    /// Cache-aside read. The existence check and the population write are
    /// separate round trips: concurrent callers missing on the same key may
    /// each run `factory`, and the last write wins.
    pub async fn get_or_create<T, F, Fut>(&self, key: &str, factory: F, ttl: Option<Duration>) -> Result<T, CacheError>
    where
        T: Serialize + DeserializeOwned + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if self.contains_key(key).await?
            && let Some(value) = self.try_get(key).await? {
                return Ok(value);
            }
        debug!("{} Miss on '{}', creating value", LOG_PREFIX, key);
        let value = factory().await;
        self.set(key, &value, ttl).await?;
        Ok(value)
    }

    /// [`get_or_create`](Self::get_or_create) with a fallible factory. A
    /// factory error is returned as-is and nothing is stored.
    pub async fn try_get_or_create<T, E, F, Fut>(&self, key: &str, factory: F, ttl: Option<Duration>) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned + Sync,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if self.contains_key(key).await?
            && let Some(value) = self.try_get(key).await? {
                return Ok(value);
            }
        debug!("{} Miss on '{}', creating value", LOG_PREFIX, key);
        let value = factory().await?;
        self.set(key, &value, ttl).await?;
        Ok(value)
    }

    /// Logical keys matching `prefix + pattern_suffix`, prefix stripped.
    pub async fn list_keys(&self, pattern_suffix: &str) -> Result<Vec<String>, CacheError> {
        let pattern = format!("{}{}", escape_glob(&self.prefix), pattern_suffix);
        let physical_keys = {
            let mut connection = self.pool.acquire(true).await?;
            connection.keys(&pattern).await?
        };
        Ok(physical_keys
            .into_iter()
            .map(|key| match key.strip_prefix(self.prefix.as_str()) {
                Some(stripped) => stripped.to_string(),
                None => key,
            })
            .collect())
    }

    /// Closes the underlying pool. Called once, by the owner, at shutdown.
    pub fn close(&self) {
        self.pool.close();
    }
}
