//! Implementation blocks for cache structures.

/// Display and URL helpers for the cache engine.
pub mod cache_engine;

/// Engine dispatch for pooled connections.
pub mod cache_connection;

/// Defaults and configuration conversion for pool settings.
pub mod connection_pool_config;

/// Pool construction, acquisition and teardown.
pub mod connection_pool;

/// Idle queue and endpoint rotation per shard.
pub mod pool_shard;

/// Guard release and broken-connection tracking.
pub mod pooled_connection;

/// Redis connector commands.
pub mod cache_connector_redis;

/// Memory connector commands.
pub mod cache_connector_memory;

/// Expiry and glob matching for the memory store.
pub mod memory_store;

/// Prefixing and cache-aside operations.
pub mod cache_service;
