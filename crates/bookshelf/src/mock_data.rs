//! In-process book catalog used by `--demo`.

use async_trait::async_trait;
use rand::seq::SliceRandom;

use bookshelf_core::book::{BookId, BookRecord};
use bookshelf_core::source::{BookSource, Result};

/// Number of books in a recommendation list.
const RECOMMENDATION_COUNT: usize = 3;

/// Serves a fixed set of books without a remote catalog.
#[derive(Debug, Clone)]
pub struct DemoCatalog {
    books: Vec<BookRecord>,
}

impl DemoCatalog {
    pub fn new() -> Self {
        Self {
            books: generate_mock_books(),
        }
    }
}

impl Default for DemoCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookSource for DemoCatalog {
    async fn fetch_books(&self, query: Option<&str>) -> Result<Vec<BookRecord>> {
        let query = query.map(str::trim).unwrap_or_default();
        Ok(self
            .books
            .iter()
            .filter(|book| book.matches(query))
            .cloned()
            .collect())
    }

    async fn fetch_one_book(&self, id: BookId) -> Result<Option<BookRecord>> {
        Ok(self.books.iter().find(|book| book.id == id).cloned())
    }

    async fn fetch_random_books(&self) -> Result<Vec<BookRecord>> {
        let mut books = self.books.clone();
        books.shuffle(&mut rand::rng());
        books.truncate(RECOMMENDATION_COUNT);
        Ok(books)
    }
}

/// Generates the demo catalog.
pub fn generate_mock_books() -> Vec<BookRecord> {
    vec![
        BookRecord::new(1, "Dune")
            .with_subtitle("The first book of the Dune saga")
            .with_description("A desert planet, a noble family and the spice that everyone wants.")
            .with_credits("Frank Herbert", "Chilton Books"),
        BookRecord::new(2, "The Left Hand of Darkness")
            .with_description("An envoy learns the politics of a planet without fixed sexes.")
            .with_credits("Ursula K. Le Guin", "Ace Books"),
        BookRecord::new(3, "Emma")
            .with_subtitle("A novel")
            .with_description("A matchmaker who misreads everyone, herself included.")
            .with_credits("Jane Austen", "John Murray"),
        BookRecord::new(4, "The Rust Programming Language")
            .with_description("The official book on Rust.")
            .with_credits("Steve Klabnik, Carol Nichols", "No Starch Press"),
        BookRecord::new(5, "Structure and Interpretation of Computer Programs")
            .with_credits("Harold Abelson, Gerald Jay Sussman", "MIT Press"),
        BookRecord::new(6, "Persuasion")
            .with_description("Eight years later, a second chance.")
            .with_credits("Jane Austen", "John Murray"),
    ]
}
