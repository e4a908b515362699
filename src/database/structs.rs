//! Database structures.

/// Dialect-aware SQL rendering.
pub mod query_builder;

/// Typed filter and ordering for one entity type.
pub mod query;

/// One named backend: pool, dialect and cache participation.
pub mod backend_context;

/// The set of configured backends.
pub mod backend_registry;

/// Application-facing repository bound to a current backend.
pub mod repository_router;

/// A transaction held open by a router.
pub mod open_transaction;

/// Paging input.
pub mod page_query_request;

/// Paging output.
pub mod page_result;
