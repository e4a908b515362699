//! Key-value cache layer.
//!
//! This module owns everything that talks to the key-value store: a pooled
//! connection manager with separate write and read-only pools, the engine
//! connectors (Redis and an in-process memory store), and the
//! [`CacheService`](structs::cache_service::CacheService) facade that adds
//! key prefixing and cache-aside semantics on top of the pool.
//!
//! # Architecture
//!
//! - `CacheBackend` trait defines the per-connection command set
//! - Each engine has its own connector implementation
//! - `CacheConnection` dispatches to the connector of the configured engine
//! - `ConnectionPool` checks connections out of the write or read shard
//! - `CacheService` namespaces keys and serializes values
//!
//! # Example
//!
//! ```rust,ignore
//! use cached_repository::cache::structs::cache_service::CacheService;
//!
//! let cache = CacheService::from_config(&config)?;
//! cache.set("user:1", &user, None).await?;
//! let user: User = cache.get("user:1").await?;
//! ```

/// Cache engine and pool kind enumerations.
pub mod enums;

/// Error types for cache operations.
pub mod errors;

/// Implementation blocks for the cache structures.
pub mod impls;

/// Data structures for pools, connectors and the cache service.
pub mod structs;

/// Cache backend trait definitions.
pub mod traits;
