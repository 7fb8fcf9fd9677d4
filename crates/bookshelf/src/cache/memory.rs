//! In-memory page cache with LRU eviction.
//!
//! Entries carry an optional expiry and are treated as absent once it has
//! passed (lazy expiration on read).

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use bookshelf_core::cache::{pattern_matches, Cache, Result};

#[derive(Debug, Clone)]
struct CachedPage {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CachedPage {
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now > at)
    }
}

/// Thread-safe LRU cache shared by all request handlers.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    pages: Arc<RwLock<LruCache<String, CachedPage>>>,
}

impl MemoryCache {
    /// Creates a cache holding at most `max_entries` pages (at least one).
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            pages: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }

    /// Number of stored entries, expired ones included until they are read.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.pages.read().await.len()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // `LruCache::get` updates recency, so it needs the write lock.
        let mut pages = self.pages.write().await;

        let now = Instant::now();
        match pages.get(key) {
            Some(page) if page.is_expired(now) => {
                pages.pop(key);
                Ok(None)
            }
            Some(page) => Ok(Some(page.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut pages = self.pages.write().await;
        pages.put(key.to_string(), CachedPage::new(value.to_vec(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut pages = self.pages.write().await;
        pages.pop(key);
        Ok(())
    }

    async fn delete_pattern(&self, pattern: &str) -> Result<usize> {
        let mut pages = self.pages.write().await;
        let matching: Vec<String> = pages
            .iter()
            .map(|(key, _)| key)
            .filter(|key| pattern_matches(pattern, key))
            .cloned()
            .collect();
        for key in &matching {
            pages.pop(key);
        }
        Ok(matching.len())
    }
}
