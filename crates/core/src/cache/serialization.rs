//! Pure functions for turning page results into cache bytes and back.
//!
//! JSON keeps cached values readable when inspecting the cache.

use crate::route::{PageProps, PageResult};

use super::{CacheError, Result};

/// Serializes a page result to JSON bytes.
pub fn serialize_page_result(result: &PageResult<PageProps>) -> Result<Vec<u8>> {
    serde_json::to_vec(result).map_err(|e| CacheError::Encoding(e.to_string()))
}

/// Deserializes JSON bytes to a page result.
pub fn deserialize_page_result(bytes: &[u8]) -> Result<PageResult<PageProps>> {
    serde_json::from_slice(bytes).map_err(|e| CacheError::Encoding(e.to_string()))
}
