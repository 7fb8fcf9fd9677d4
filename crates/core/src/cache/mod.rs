mod error;
mod keys;
mod patterns;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{page_key, page_pattern};
pub use patterns::pattern_matches;
pub use serialization::{deserialize_page_result, serialize_page_result};
pub use traits::Cache;
