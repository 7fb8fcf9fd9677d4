//! Functional core for bookshelf.
//!
//! Pure types and functions shared by the server and the client: book
//! records, route descriptors, the fallback state machine, layouts, views
//! and cache key/serialization helpers. Nothing here performs I/O; the
//! [`source::BookSource`] and [`cache::Cache`] traits are the seams the
//! imperative shell implements.

pub mod book;
pub mod cache;
pub mod layout;
pub mod render;
pub mod route;
pub mod source;
pub mod view;
