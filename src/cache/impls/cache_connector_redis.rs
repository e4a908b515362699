use crate::cache::errors::CacheError;
use crate::cache::structs::cache_connector_redis::CacheConnectorRedis;
use crate::cache::traits::cache_backend::CacheBackend;
use async_trait::async_trait;
use log::debug;
use redis::FromRedisValue;
use std::time::Duration;
use tokio::time::timeout;

impl CacheConnectorRedis {
    pub async fn connect(
        endpoint: &str,
        default_database: Option<i64>,
        connect_timeout: Duration,
        command_timeout: Duration,
    ) -> Result<Self, CacheError> {
        let url = Self::connection_url(endpoint, default_database);
        let client = redis::Client::open(url.as_str())
            .map_err(|e| CacheError::Unavailable(format!("Failed to create Redis client for {}: {}", endpoint, e)))?;
        let connection = match timeout(connect_timeout, client.get_multiplexed_async_connection()).await {
            Ok(Ok(connection)) => connection,
            Ok(Err(e)) => {
                return Err(CacheError::Unavailable(format!("Failed to connect to Redis at {}: {}", endpoint, e)));
            }
            Err(_) => {
                return Err(CacheError::Unavailable(format!(
                    "Timed out connecting to Redis at {} after {:?}",
                    endpoint, connect_timeout
                )));
            }
        };
        Ok(Self {
            connection,
            endpoint: endpoint.to_string(),
            command_timeout,
        })
    }

    /// Accepts `host:port`, `password@host:port` or a full `redis://` URL.
    /// The default database is appended as the URL path unless a URL was given.
    pub fn connection_url(endpoint: &str, default_database: Option<i64>) -> String {
        if endpoint.contains("://") {
            return endpoint.to_string();
        }
        let authority = match endpoint.rsplit_once('@') {
            Some((password, host)) => format!(":{}@{}", password, host),
            None => endpoint.to_string(),
        };
        match default_database {
            Some(database) => format!("redis://{}/{}", authority, database),
            None => format!("redis://{}", authority),
        }
    }

    async fn run<T: FromRedisValue>(&mut self, command: redis::Cmd) -> Result<T, CacheError> {
        match timeout(self.command_timeout, command.query_async::<T>(&mut self.connection)).await {
            Ok(result) => result.map_err(CacheError::from),
            Err(_) => Err(CacheError::Unavailable(format!(
                "Redis command timed out after {:?} on {}",
                self.command_timeout, self.endpoint
            ))),
        }
    }
}

#[async_trait]
impl CacheBackend for CacheConnectorRedis {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn ping(&mut self) -> Result<(), CacheError> {
        self.run::<String>(redis::cmd("PING")).await?;
        Ok(())
    }

    async fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut command = redis::cmd("GET");
        command.arg(key);
        self.run::<Option<Vec<u8>>>(command).await
    }

    async fn set(&mut self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<(), CacheError> {
        let mut command = redis::cmd("SET");
        command.arg(key).arg(value);
        if let Some(ttl) = ttl
            && !ttl.is_zero() {
                command.arg("PX").arg(ttl.as_millis() as u64);
            }
        self.run::<()>(command).await?;
        debug!("[Redis] Set {}", key);
        Ok(())
    }

    async fn set_if_not_exists(&mut self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<bool, CacheError> {
        let mut command = redis::cmd("SET");
        command.arg(key).arg(value).arg("NX");
        if let Some(ttl) = ttl
            && !ttl.is_zero() {
                command.arg("PX").arg(ttl.as_millis() as u64);
            }
        Ok(self.run::<Option<String>>(command).await?.is_some())
    }

    async fn increment_by(&mut self, key: &str, delta: i64) -> Result<i64, CacheError> {
        let mut command = redis::cmd("INCRBY");
        command.arg(key).arg(delta);
        self.run::<i64>(command).await
    }

    async fn get_many(&mut self, keys: &[String]) -> Result<Vec<Option<Vec<u8>>>, CacheError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let mut command = redis::cmd("MGET");
        command.arg(keys);
        self.run::<Vec<Option<Vec<u8>>>>(command).await
    }

    async fn set_many(&mut self, entries: Vec<(String, Vec<u8>)>, ttl: Option<Duration>) -> Result<(), CacheError> {
        if entries.is_empty() {
            return Ok(());
        }
        let count = entries.len();
        let expiry = ttl.filter(|ttl| !ttl.is_zero()).map(|ttl| ttl.as_millis() as u64);
        let mut pipeline = redis::pipe();
        pipeline.atomic();
        for (key, value) in entries {
            pipeline.cmd("SET").arg(key).arg(value);
            if let Some(expiry) = expiry {
                pipeline.arg("PX").arg(expiry);
            }
            pipeline.ignore();
        }
        match timeout(self.command_timeout, pipeline.query_async::<()>(&mut self.connection)).await {
            Ok(result) => result.map_err(CacheError::from)?,
            Err(_) => {
                return Err(CacheError::Unavailable(format!(
                    "Redis pipeline timed out after {:?} on {}",
                    self.command_timeout, self.endpoint
                )));
            }
        }
        debug!("[Redis] Set {} keys", count);
        Ok(())
    }

    async fn exists(&mut self, key: &str) -> Result<bool, CacheError> {
        let mut command = redis::cmd("EXISTS");
        command.arg(key);
        Ok(self.run::<i64>(command).await? > 0)
    }

    async fn remove(&mut self, key: &str) -> Result<bool, CacheError> {
        let mut command = redis::cmd("DEL");
        command.arg(key);
        let removed = self.run::<i64>(command).await?;
        debug!("[Redis] Deleted {}", key);
        Ok(removed > 0)
    }

    async fn remove_all(&mut self, keys: &[String]) -> Result<u64, CacheError> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut command = redis::cmd("DEL");
        command.arg(keys);
        let removed = self.run::<i64>(command).await?;
        debug!("[Redis] Batch deleted {} of {} keys", removed, keys.len());
        Ok(removed.max(0) as u64)
    }

    async fn keys(&mut self, pattern: &str) -> Result<Vec<String>, CacheError> {
        let mut command = redis::cmd("KEYS");
        command.arg(pattern);
        self.run::<Vec<String>>(command).await
    }
}
