//! Configuration data structures.
//!
//! Each struct corresponds to a section in the TOML configuration file.

/// Cache pool configuration (engine, endpoints, pool sizes, timeouts).
pub mod cache_config;

/// Root configuration structure containing all settings.
pub mod configuration;

/// Named SQL backend configuration.
pub mod database_config;

/// Sentry error reporting configuration.
pub mod sentry_config;
