use crate::cache::errors::CacheError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Backend not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("A transaction is already open on backend {0}")]
    TransactionAlreadyOpen(String),

    #[error("No transaction is open on backend {0}")]
    NoTransaction(String),
}
