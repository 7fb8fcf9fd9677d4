use thiserror::Error;

/// Errors from the page cache.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A page could not be encoded for the cache or decoded from it.
    #[error("Cached page encoding failed: {0}")]
    Encoding(String),
}

pub type Result<T> = std::result::Result<T, CacheError>;
