//! # Cached Repository
//!
//! A data-access layer that routes typed CRUD and query operations to one of
//! several named SQL backends while caching results in a pooled key-value
//! store.
//!
//! ## Features
//!
//! - **Pooled cache client**: separate write and read-only pools with their own
//!   sizes, timeouts and idle eviction, over Redis or an in-process store
//! - **Cache service**: prefix-namespaced typed get/set and cache-aside
//!   `get_or_create`
//! - **Multi-backend routing**: SQLite, MySQL and PostgreSQL backends selected by
//!   name at runtime
//! - **Second-level data cache**: cached reads per backend, invalidated by every
//!   mutation on the same table
//! - **Transactions**: explicit begin/commit/rollback plus a `tran` wrapper that
//!   rolls back and returns the original error
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cached_repository::config::structs::configuration::Configuration;
//! use cached_repository::database::structs::backend_registry::BackendRegistry;
//! use cached_repository::database::structs::repository_router::RepositoryRouter;
//!
//! let config = Configuration::load_from_file("config.toml", false)?;
//! let registry = Arc::new(BackendRegistry::from_configuration(&config).await?);
//! let mut repository = RepositoryRouter::new(registry)?;
//! repository.use_backend("reporting")?;
//! let total = repository.count(&Query::<Order>::new()).await?;
//! ```

/// Pooled key-value cache and the cache service facade.
pub mod cache;

/// Configuration management module.
///
/// Handles loading, parsing, and validating configuration from TOML files.
pub mod config;

/// Backend registry, query engine and repository router.
pub mod database;

/// Console logging setup.
pub mod logging;

/// CLI argument parsing.
pub mod structs;

/// Sentry tracing helpers.
pub mod utils;
