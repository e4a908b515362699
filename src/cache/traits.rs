//! Cache trait definitions.

/// Command set every cache connection speaks.
pub mod cache_backend;
