//! Cache enumeration types.

/// Supported cache engines (redis, memory).
pub mod cache_engine;

/// Engine-dispatching pooled connection.
pub mod cache_connection;

/// Write or read-only pool selector.
pub mod pool_kind;
