/// Loading, saving and validation of the root configuration.
pub mod configuration;

/// Display and Error implementations for `ConfigurationError`.
pub mod configuration_error;

/// Defaults for the cache and database sections.
pub mod cache_config;

pub mod database_config;

pub mod sentry_config;
