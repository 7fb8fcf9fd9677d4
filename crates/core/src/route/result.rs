use serde::{Deserialize, Serialize};

use crate::book::BookRecord;

/// Outcome of loading a page's data for one render cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PageResult<T> {
    Props(T),
    NotFound,
    Redirect(String),
}

impl<T> PageResult<T> {
    pub fn props(&self) -> Option<&T> {
        match self {
            PageResult::Props(props) => Some(props),
            _ => None,
        }
    }

    /// `Some(props)` becomes `Props`, `None` becomes `NotFound`.
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(PageResult::NotFound, PageResult::Props)
    }
}

/// Data handed to each page view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageProps {
    Home {
        all_books: Vec<BookRecord>,
        recommended_books: Vec<BookRecord>,
    },
    Book {
        book: BookRecord,
    },
    Search {
        query: String,
        books: Vec<BookRecord>,
    },
}
