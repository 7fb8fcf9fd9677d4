//! bookshelf_client - HTTP client for the remote book catalog.
//!
//! [`CatalogClient`] implements [`bookshelf_core::source::BookSource`] over
//! the catalog's JSON API. [`SearchSession`] drives the deferred search page
//! on the client side.

pub mod client;
pub mod error;
pub mod search;

pub use client::CatalogClient;
pub use error::{ClientError, Result};
pub use search::{SearchSession, SearchTicket};
