use crate::cache::enums::cache_connection::CacheConnection;
use crate::cache::enums::cache_engine::CacheEngine;
use crate::cache::enums::pool_kind::PoolKind;
use crate::cache::errors::CacheError;
use crate::cache::structs::cache_connector_memory::CacheConnectorMemory;
use crate::cache::structs::cache_connector_redis::CacheConnectorRedis;
use crate::cache::structs::connection_pool::ConnectionPool;
use crate::cache::structs::connection_pool_config::ConnectionPoolConfig;
use crate::cache::structs::memory_store::MemoryStore;
use crate::cache::structs::pool_shard::PoolShard;
use crate::cache::structs::pool_status::PoolStatus;
use crate::cache::structs::pooled_connection::PooledConnection;
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::time::timeout;

const LOG_PREFIX: &str = "[Pool]";

impl ConnectionPool {
    /// Validates the configuration and builds both shards. No connection is
    /// opened here; shards fill lazily on first acquisition.
    pub fn new(config: ConnectionPoolConfig) -> Result<ConnectionPool, CacheError> {
        if config.write_endpoints.is_empty() {
            return Err(CacheError::ConfigurationError(
                "at least one write endpoint is required".to_string(),
            ));
        }
        if config.max_write_pool_size == 0 || config.max_read_pool_size == 0 {
            return Err(CacheError::ConfigurationError(
                "pool sizes must be greater than zero".to_string(),
            ));
        }
        if config.engine == CacheEngine::redis {
            for endpoint in config.write_endpoints.iter().chain(config.effective_read_endpoints()) {
                let url = CacheConnectorRedis::connection_url(endpoint, config.default_database);
                redis::Client::open(url.as_str()).map_err(|e| {
                    CacheError::ConfigurationError(format!("invalid Redis endpoint '{}': {}", endpoint, e))
                })?;
            }
        }

        let write = Arc::new(PoolShard::new(
            PoolKind::Write,
            config.write_endpoints.clone(),
            config.max_write_pool_size,
            config.idle_timeout,
        ));
        let read = Arc::new(PoolShard::new(
            PoolKind::ReadOnly,
            config.effective_read_endpoints().to_vec(),
            config.max_read_pool_size,
            config.idle_timeout,
        ));
        let memory = match config.engine {
            CacheEngine::memory => Some(Arc::new(MemoryStore::default())),
            CacheEngine::redis => None,
        };
        info!(
            "{} {} pool ready: write {:?} (max {}), read {:?} (max {})",
            LOG_PREFIX,
            config.engine,
            write.endpoints,
            write.max_size,
            read.endpoints,
            read.max_size
        );
        Ok(ConnectionPool {
            config,
            write,
            read,
            memory,
        })
    }

    pub fn config(&self) -> &ConnectionPoolConfig {
        &self.config
    }

    /// Checks a connection out of the write pool, or the read-only pool when
    /// `read_only` is set. Waits up to `pool_timeout` for a free slot.
    pub async fn acquire(&self, read_only: bool) -> Result<PooledConnection, CacheError> {
        let shard = self.shard(read_only);
        let permit = match timeout(self.config.pool_timeout, shard.semaphore.clone().acquire_owned()).await {
            Ok(Ok(permit)) => permit,
            Ok(Err(_)) => return Err(CacheError::Closed),
            Err(_) => {
                warn!(
                    "{} {:?} pool exhausted after waiting {:?}",
                    LOG_PREFIX, shard.kind, self.config.pool_timeout
                );
                return Err(CacheError::PoolExhausted {
                    kind: shard.kind,
                    timeout: self.config.pool_timeout,
                });
            }
        };
        if let Some(connection) = shard.checkout_idle() {
            return Ok(PooledConnection::new(connection, shard.clone(), permit));
        }
        let endpoint = shard.next_endpoint();
        let connection = self.connect(endpoint).await?;
        debug!("{} Opened {:?} connection to {}", LOG_PREFIX, shard.kind, endpoint);
        Ok(PooledConnection::new(connection, shard.clone(), permit))
    }

    /// Returns a connection to the pool it was checked out of.
    pub fn release(&self, connection: PooledConnection) {
        drop(connection);
    }

    /// Drops idle connections older than the idle timeout; returns how many were dropped.
    pub fn evict_idle(&self) -> usize {
        self.write.evict_idle() + self.read.evict_idle()
    }

    pub fn status(&self, read_only: bool) -> PoolStatus {
        self.shard(read_only).status()
    }

    /// Closes both pools. Pending and future acquisitions fail with `Closed`.
    pub fn close(&self) {
        self.write.close();
        self.read.close();
        info!("{} {} pool closed", LOG_PREFIX, self.config.engine);
    }

    pub fn is_closed(&self) -> bool {
        self.write.semaphore.is_closed()
    }

    pub(crate) fn shard(&self, read_only: bool) -> &Arc<PoolShard> {
        if read_only { &self.read } else { &self.write }
    }

    async fn connect(&self, endpoint: &str) -> Result<CacheConnection, CacheError> {
        match self.config.engine {
            CacheEngine::redis => CacheConnectorRedis::connect(
                endpoint,
                self.config.default_database,
                self.config.connect_timeout,
                self.config.command_timeout(),
            )
            .await
            .map(CacheConnection::Redis),
            CacheEngine::memory => match &self.memory {
                Some(store) => Ok(CacheConnection::Memory(CacheConnectorMemory::new(store.clone(), endpoint))),
                None => Err(CacheError::Unavailable("memory store not initialised".to_string())),
            },
        }
    }
}
