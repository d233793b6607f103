use thiserror::Error;

/// Errors that can occur when talking to the cache store.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The cache backend could not be reached or rejected the operation.
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    /// A cached value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
