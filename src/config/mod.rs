//! Configuration management module.
//!
//! This module handles loading, parsing and validating the application
//! configuration from TOML files.
//!
//! # Configuration Structure
//!
//! The configuration file (`config.toml`) contains sections for:
//! - **log_level**: Console log verbosity
//! - **cache**: Optional key-value cache pool (Redis or in-process memory)
//! - **database**: One entry per named SQL backend
//! - **sentry_config**: Error reporting configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use cached_repository::config::structs::configuration::Configuration;
//!
//! // Load configuration from file, creating a template when missing
//! let config = Configuration::load_from_file("config.toml", true)?;
//! config.validate()?;
//! ```

/// Configuration enumerations (error type).
pub mod enums;

/// Configuration data structures.
pub mod structs;

/// Implementation blocks for configuration loading/saving.
pub mod impls;

#[cfg(test)]
mod tests;
