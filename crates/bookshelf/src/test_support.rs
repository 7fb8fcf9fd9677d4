//! In-process catalog double shared by the server tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bookshelf_core::book::{BookId, BookRecord};
use bookshelf_core::source::{BookSource, Result, TransportError};
use tokio::sync::oneshot;

/// Serves a fixed catalog, counts calls and fails on demand.
#[derive(Debug, Default)]
pub struct FakeCatalog {
    books: Mutex<Vec<BookRecord>>,
    list_calls: AtomicUsize,
    one_calls: AtomicUsize,
    random_calls: AtomicUsize,
    fail_list: AtomicBool,
    fail_one: AtomicBool,
    fail_random: AtomicBool,
    one_gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl FakeCatalog {
    /// Catalog with books 1 to 4.
    pub fn new() -> Self {
        Self::with_books(vec![
            BookRecord::new(1, "Dune").with_credits("Frank Herbert", "Chilton"),
            BookRecord::new(2, "Dune Messiah").with_credits("Frank Herbert", "Putnam"),
            BookRecord::new(3, "Emma").with_credits("Jane Austen", "John Murray"),
            BookRecord::new(4, "Persuasion").with_credits("Jane Austen", "John Murray"),
        ])
    }

    pub fn with_books(books: Vec<BookRecord>) -> Self {
        Self {
            books: Mutex::new(books),
            ..Self::default()
        }
    }

    pub fn book(&self, id: BookId) -> Option<BookRecord> {
        self.books.lock().unwrap().iter().find(|b| b.id == id).cloned()
    }

    /// Drops a book from the catalog, as if it had been unpublished.
    pub fn remove_book(&self, id: BookId) {
        self.books.lock().unwrap().retain(|b| b.id != id);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn one_calls(&self) -> usize {
        self.one_calls.load(Ordering::SeqCst)
    }

    pub fn random_calls(&self) -> usize {
        self.random_calls.load(Ordering::SeqCst)
    }

    pub fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn fail_one(&self, fail: bool) {
        self.fail_one.store(fail, Ordering::SeqCst);
    }

    pub fn fail_random(&self, fail: bool) {
        self.fail_random.store(fail, Ordering::SeqCst);
    }

    /// Makes the next single-book lookup wait until the sender fires.
    pub fn hold_next_lookup(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.one_gate.lock().unwrap() = Some(rx);
        tx
    }
}

#[async_trait]
impl BookSource for FakeCatalog {
    async fn fetch_books(&self, query: Option<&str>) -> Result<Vec<BookRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(TransportError::new("catalog offline"));
        }
        let q = query.unwrap_or_default();
        let books = self.books.lock().unwrap();
        Ok(books.iter().filter(|b| b.matches(q)).cloned().collect())
    }

    async fn fetch_one_book(&self, id: BookId) -> Result<Option<BookRecord>> {
        self.one_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.one_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.fail_one.load(Ordering::SeqCst) {
            return Err(TransportError::new("catalog offline"));
        }
        Ok(self.book(id))
    }

    async fn fetch_random_books(&self) -> Result<Vec<BookRecord>> {
        self.random_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_random.load(Ordering::SeqCst) {
            return Err(TransportError::new("catalog offline"));
        }
        let books = self.books.lock().unwrap();
        Ok(books.iter().rev().take(2).cloned().collect())
    }
}
