//! The data source seam between page loaders and the remote catalog.

mod error;
mod traits;

pub use error::{Result, TransportError};
pub use traits::BookSource;
