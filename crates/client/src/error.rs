//! Client error types.

use bookshelf_core::source::TransportError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Failures talking to the catalog API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection, timeout or body decoding failure.
    #[error("Catalog request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Any non-success status other than 404.
    #[error("Catalog returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Catalog has no {resource}")]
    NotFound { resource: String },
}

impl From<ClientError> for TransportError {
    fn from(err: ClientError) -> Self {
        TransportError::new(err.to_string())
    }
}
