use thiserror::Error;

/// A failure to reach or understand the remote catalog.
///
/// "No matching record" is never a transport error: sources report it as an
/// empty list or `None`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Catalog transport failed: {0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Result type for data source operations.
pub type Result<T> = std::result::Result<T, TransportError>;
