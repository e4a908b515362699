use crate::cache::enums::pool_kind::PoolKind;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Pool exhausted: no {kind:?} connection available within {timeout:?}")]
    PoolExhausted {
        kind: PoolKind,
        timeout: Duration,
    },

    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    #[error("Command rejected: {0}")]
    Rejected(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Pool closed")]
    Closed,
}

impl From<redis::RedisError> for CacheError {
    fn from(error: redis::RedisError) -> Self {
        match error.kind() {
            redis::ErrorKind::Server(redis::ServerErrorKind::ResponseError) => CacheError::Rejected(error.to_string()),
            _ => CacheError::Unavailable(error.to_string()),
        }
    }
}

impl CacheError {
    /// Transport-level failures; the connection that produced one is not reused.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, CacheError::Unavailable(_))
    }
}
