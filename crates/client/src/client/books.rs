//! Book catalog operations.

use async_trait::async_trait;
use bookshelf_core::book::{BookId, BookRecord};
use bookshelf_core::source::{self, BookSource, TransportError};

use super::CatalogClient;
use crate::error::{ClientError, Result};

impl CatalogClient {
    /// List books. An empty or missing query lists the whole catalog.
    pub async fn list_books(&self, query: Option<&str>) -> Result<Vec<BookRecord>> {
        let mut request = self.client.get(self.url("/books"));
        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            request = request.query(&[("q", q)]);
        }
        let response = request.send().await?;
        self.handle_response(response, "books").await
    }

    /// Get book by ID. A 404 from the catalog is `Ok(None)`.
    pub async fn get_book(&self, id: BookId) -> Result<Option<BookRecord>> {
        let response = self
            .client
            .get(self.url(&format!("/books/{}", id)))
            .send()
            .await?;
        match self.handle_response(response, "book").await {
            Ok(book) => Ok(Some(book)),
            Err(ClientError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// List a random selection of books.
    pub async fn random_books(&self) -> Result<Vec<BookRecord>> {
        let response = self.client.get(self.url("/books/random")).send().await?;
        self.handle_response(response, "random books").await
    }
}

#[async_trait]
impl BookSource for CatalogClient {
    async fn fetch_books(&self, query: Option<&str>) -> source::Result<Vec<BookRecord>> {
        self.list_books(query).await.map_err(|err| {
            tracing::warn!(error = %err, query = ?query, "Catalog search failed");
            TransportError::from(err)
        })
    }

    async fn fetch_one_book(&self, id: BookId) -> source::Result<Option<BookRecord>> {
        self.get_book(id).await.map_err(|err| {
            tracing::warn!(error = %err, book_id = id, "Catalog lookup failed");
            TransportError::from(err)
        })
    }

    async fn fetch_random_books(&self) -> source::Result<Vec<BookRecord>> {
        self.random_books().await.map_err(|err| {
            tracing::warn!(error = %err, "Catalog recommendation fetch failed");
            TransportError::from(err)
        })
    }
}
