mod types;

pub use types::{BookId, BookRecord};
