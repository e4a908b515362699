//! Cache structures.

/// Settings for the write and read-only connection pools.
pub mod connection_pool_config;

/// Two-shard pool of cache connections.
pub mod connection_pool;

/// One side (write or read-only) of the connection pool.
pub mod pool_shard;

/// Checked-out connection guard.
pub mod pooled_connection;

/// Point-in-time pool occupancy.
pub mod pool_status;

/// Redis-specific connector.
pub mod cache_connector_redis;

/// In-process memory connector.
pub mod cache_connector_memory;

/// Shared storage behind the memory connector.
pub mod memory_store;

/// Prefixing cache-aside facade.
pub mod cache_service;
