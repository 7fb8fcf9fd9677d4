use thiserror::Error;

use crate::source::TransportError;

/// Why a page could not be rendered with data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The catalog could not be reached or answered garbage.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The request was valid but nothing matches it.
    #[error("No matching record: {0}")]
    NotFound(String),
    /// A route parameter is missing or malformed.
    #[error("Invalid route parameter: {0}")]
    Parameter(String),
}

impl RenderError {
    /// Parameter errors are shown as not-found, not as failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RenderError::NotFound(_) | RenderError::Parameter(_))
    }
}
