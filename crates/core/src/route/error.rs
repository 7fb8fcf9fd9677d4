use thiserror::Error;

use super::PageId;

/// Errors raised while registering routes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Page {0} is already registered")]
    DuplicatePage(PageId),
    #[error("Pattern {0} is already registered")]
    DuplicatePattern(String),
    #[error("Invalid route pattern: {0}")]
    InvalidPattern(String),
    #[error("Unknown fallback policy: {0}")]
    UnknownFallback(String),
}
