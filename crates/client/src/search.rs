//! Client-side driver for the deferred search page.
//!
//! The search page ships without data. Whenever the observed `q` changes,
//! the session resets to `Idle`, starts a new generation and (for a
//! non-empty query) moves to `Loading`. A fetch only applies its result if
//! its generation is still current, so a slow response for an old query can
//! never overwrite the results of a newer one.

use std::sync::Arc;

use bookshelf_core::book::BookRecord;
use bookshelf_core::render::{PageState, RenderError};
use bookshelf_core::source::BookSource;
use tokio::sync::RwLock;

/// Permission to run the fetch for one observed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    query: String,
}

impl SearchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug, Default)]
struct Inner {
    generation: u64,
    query: Option<String>,
    state: PageState<Vec<BookRecord>>,
}

/// Reactive search state for one client session.
pub struct SearchSession<S: BookSource + ?Sized> {
    source: Arc<S>,
    inner: Arc<RwLock<Inner>>,
}

impl<S: BookSource + ?Sized> Clone for SearchSession<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: BookSource + ?Sized> SearchSession<S> {
    /// A fresh session in the `Idle` state.
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            inner: Arc::new(RwLock::new(Inner::default())),
        }
    }

    pub async fn state(&self) -> PageState<Vec<BookRecord>> {
        self.inner.read().await.state.clone()
    }

    pub async fn query(&self) -> Option<String> {
        self.inner.read().await.query.clone()
    }

    pub async fn generation(&self) -> u64 {
        self.inner.read().await.generation
    }

    /// Records the current value of `q`.
    ///
    /// Returns a ticket when a fetch should start. An unchanged query is
    /// ignored. A changed query invalidates every outstanding ticket; an
    /// empty one leaves the session `Idle`.
    pub async fn observe_query(&self, query: Option<&str>) -> Option<SearchTicket> {
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        let mut inner = self.inner.write().await;

        if inner.query.as_deref() == query {
            return None;
        }

        inner.generation += 1;
        inner.query = query.map(str::to_string);
        let previous = std::mem::take(&mut inner.state);
        inner.state = previous.reset();

        let query = query?.to_string();
        let idle = std::mem::take(&mut inner.state);
        match idle.begin() {
            Ok(loading) => inner.state = loading,
            Err(err) => {
                // Unreachable: the state was reset just above.
                tracing::error!(error = %err, "Search session failed to start loading");
                return None;
            }
        }

        tracing::debug!(generation = inner.generation, query = %query, "Search started");
        Some(SearchTicket {
            generation: inner.generation,
            query,
        })
    }

    /// Runs the fetch for `ticket` and applies the result if the ticket is
    /// still current. Returns whether the result was applied.
    pub async fn run(&self, ticket: SearchTicket) -> bool {
        let outcome = self
            .source
            .fetch_books(Some(&ticket.query))
            .await
            .map(Some)
            .map_err(RenderError::from);

        let mut inner = self.inner.write().await;
        if inner.generation != ticket.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = inner.generation,
                query = %ticket.query,
                "Discarding superseded search result"
            );
            return false;
        }

        if let Err(err) = &outcome {
            tracing::warn!(error = %err, query = %ticket.query, "Search failed");
        }

        let loading = std::mem::take(&mut inner.state);
        match loading.complete(outcome) {
            Ok(settled) => {
                inner.state = settled;
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "Search session received a result out of order");
                false
            }
        }
    }

    /// Observes `query` and, if that starts a fetch, waits for it.
    pub async fn navigate(&self, query: Option<&str>) -> PageState<Vec<BookRecord>> {
        if let Some(ticket) = self.observe_query(query).await {
            self.run(ticket).await;
        }
        self.state().await
    }
}
