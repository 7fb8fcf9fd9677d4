//! Rendering-mode resolver.
//!
//! Turns a matched route and its parameters into a [`Resolution`] according
//! to the route's [`RenderMode`]:
//!
//! - **Static**: cache-aside over the page cache. Enumerated parameter
//!   combinations are computed by [`Resolver::prerender`]; everything else
//!   goes through the route's [`FallbackPolicy`].
//! - **PerRequest**: the loader runs on every request and nothing is cached.
//! - **Deferred**: the page ships `Idle`; data is produced by
//!   [`Resolver::settle`] once the client asks for it.
//!
//! Computations are shared per cache key, so concurrent requests for the
//! same page never load it twice. Each one runs on its own task and finishes
//! even when every request waiting on it has gone away.

mod resolution;

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{join_all, BoxFuture, FutureExt, Shared};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

use bookshelf_core::cache::{
    deserialize_page_result, page_key, page_pattern, serialize_page_result, Cache,
};
use bookshelf_core::render::{Phase, RenderError};
use bookshelf_core::route::{
    FallbackPolicy, PageId, PageProps, PageResult, RenderMode, RouteDescriptor, RouteParams,
};

pub use resolution::Resolution;

use crate::pages::PageRegistry;

type SharedResolution = Shared<BoxFuture<'static, Resolution>>;

/// Counters reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolverStats {
    pub precomputed: usize,
    pub in_flight: usize,
}

/// A running computation. Only the one registered under its key may write
/// the cache.
struct InFlight {
    id: u64,
    computation: SharedResolution,
}

struct Inner {
    pages: PageRegistry,
    cache: Arc<dyn Cache>,
    /// Cache keys of the enumerated parameter combinations.
    precomputed: RwLock<HashSet<String>>,
    /// Computations currently running, by cache key.
    in_flight: Mutex<HashMap<String, InFlight>>,
    next_computation: AtomicU64,
}

/// Resolves page requests. Cheap to clone.
#[derive(Clone)]
pub struct Resolver {
    inner: Arc<Inner>,
}

impl Resolver {
    pub fn new(pages: PageRegistry, cache: Arc<dyn Cache>) -> Self {
        Self {
            inner: Arc::new(Inner {
                pages,
                cache,
                precomputed: RwLock::new(HashSet::new()),
                in_flight: Mutex::new(HashMap::new()),
                next_computation: AtomicU64::new(0),
            }),
        }
    }

    pub fn pages(&self) -> &PageRegistry {
        &self.inner.pages
    }

    /// Resolves the initial render of a page. Never waits on a placeholder
    /// computation.
    pub async fn resolve(&self, route: &RouteDescriptor, params: &RouteParams) -> Resolution {
        match route.mode() {
            RenderMode::PerRequest => Resolution::from_outcome(self.load(route, params).await),
            RenderMode::Deferred { .. } => Resolution::idle(),
            RenderMode::Static { fallback, .. } => {
                let params = route.significant_params(params);
                if let Err(err) = validate(route, &params) {
                    return Resolution::from_outcome(Err(err));
                }

                let key = page_key(route, &params);
                if let Some(result) = self.cached(&key).await {
                    return Resolution::from_outcome(Ok(result));
                }

                if self.is_precomputed(&key).await {
                    tracing::debug!(key = %key, "Recomputing enumerated page");
                    return self.computation(route, &params, &key).await.await;
                }

                match fallback {
                    FallbackPolicy::NotFound => Resolution::not_found(),
                    FallbackPolicy::Blocking => self.computation(route, &params, &key).await.await,
                    FallbackPolicy::Placeholder => {
                        // Keeps running on its own task.
                        let _ = self.computation(route, &params, &key).await;
                        tracing::debug!(key = %key, "Serving placeholder");
                        Resolution::loading()
                    }
                }
            }
        }
    }

    /// Resolves a page to a terminal state.
    ///
    /// Waits for a running computation of the same page, or computes it.
    /// Deferred routes stay `Idle` until their trigger parameter is present.
    pub async fn settle(&self, route: &RouteDescriptor, params: &RouteParams) -> Resolution {
        match route.mode() {
            RenderMode::PerRequest => Resolution::from_outcome(self.load(route, params).await),
            RenderMode::Deferred { trigger } => {
                let triggered = params
                    .get(trigger)
                    .is_some_and(|value| !value.trim().is_empty());
                if !triggered {
                    return Resolution::idle();
                }
                Resolution::from_outcome(self.load(route, params).await)
            }
            RenderMode::Static { fallback, .. } => {
                let params = route.significant_params(params);
                if let Err(err) = validate(route, &params) {
                    return Resolution::from_outcome(Err(err));
                }

                let key = page_key(route, &params);
                if let Some(result) = self.cached(&key).await {
                    return Resolution::from_outcome(Ok(result));
                }

                if *fallback == FallbackPolicy::NotFound && !self.is_precomputed(&key).await {
                    return Resolution::not_found();
                }

                self.computation(route, &params, &key).await.await
            }
        }
    }

    /// Computes every enumerated combination of every static route.
    ///
    /// Returns how many pages settled on something other than `Error`.
    pub async fn prerender(&self) -> usize {
        let mut computations = Vec::new();

        for route in self.inner.pages.routes().iter() {
            if !matches!(route.mode(), RenderMode::Static { .. }) {
                continue;
            }
            let Some(loader) = self.inner.pages.loader(route.page()) else {
                continue;
            };

            let paths = match loader.static_paths().await {
                Ok(paths) => paths,
                Err(err) => {
                    tracing::warn!(page = %route.page(), error = %err, "Failed to enumerate static paths");
                    continue;
                }
            };

            for params in paths {
                let key = page_key(route, &params);
                self.inner.precomputed.write().await.insert(key.clone());
                computations.push(self.computation(route, &params, &key).await);
            }
        }

        let total = computations.len();
        let rendered = join_all(computations)
            .await
            .iter()
            .filter(|resolution| resolution.phase() != Some(Phase::Error))
            .count();

        tracing::info!(rendered, total, "Prerendered static pages");
        rendered
    }

    /// Drops the cached page for `params` and computes it again.
    ///
    /// A computation already running for the page is superseded, not joined:
    /// it may have read the catalog before the change being published. Pages
    /// that settle `Ready` join the enumerated set. Returns `None` for routes
    /// that are not precomputed.
    pub async fn revalidate(
        &self,
        route: &RouteDescriptor,
        params: &RouteParams,
    ) -> Option<Resolution> {
        if !matches!(route.mode(), RenderMode::Static { .. }) {
            return None;
        }

        let params = route.significant_params(params);
        if let Err(err) = validate(route, &params) {
            return Some(Resolution::from_outcome(Err(err)));
        }

        let key = page_key(route, &params);
        if let Err(err) = self.inner.cache.delete(&key).await {
            tracing::warn!(key = %key, error = %err, "Failed to drop cached page");
        }

        tracing::info!(key = %key, "Revalidating page");
        let resolution = self.start_computation(route, &params, &key, true).await.await;
        if resolution.phase() == Some(Phase::Ready) {
            self.inner.precomputed.write().await.insert(key);
        }
        Some(resolution)
    }

    /// Drops every cached page of `page`. Returns how many were dropped.
    pub async fn purge(&self, page: PageId) -> usize {
        match self.inner.cache.delete_pattern(&page_pattern(page)).await {
            Ok(count) => {
                tracing::info!(page = %page, count, "Purged cached pages");
                count
            }
            Err(err) => {
                tracing::warn!(page = %page, error = %err, "Failed to purge cached pages");
                0
            }
        }
    }

    pub async fn stats(&self) -> ResolverStats {
        ResolverStats {
            precomputed: self.inner.precomputed.read().await.len(),
            in_flight: self.inner.in_flight.lock().await.len(),
        }
    }

    async fn is_precomputed(&self, key: &str) -> bool {
        self.inner.precomputed.read().await.contains(key)
    }

    /// Returns the running computation for `key`, starting one if needed.
    async fn computation(
        &self,
        route: &RouteDescriptor,
        params: &RouteParams,
        key: &str,
    ) -> SharedResolution {
        self.start_computation(route, params, key, false).await
    }

    /// Starts a computation for `key` on its own task. Unless `supersede` is
    /// set, a computation already running for `key` is returned instead.
    async fn start_computation(
        &self,
        route: &RouteDescriptor,
        params: &RouteParams,
        key: &str,
        supersede: bool,
    ) -> SharedResolution {
        let mut in_flight = self.inner.in_flight.lock().await;
        if !supersede {
            if let Some(running) = in_flight.get(key) {
                tracing::trace!(key = %key, "Joining in-flight computation");
                return running.computation.clone();
            }
        }

        let id = self.inner.next_computation.fetch_add(1, Ordering::Relaxed);
        let resolver = self.clone();
        let route = route.clone();
        let params = params.clone();
        let owned_key = key.to_string();
        let computation = async move { resolver.compute_and_store(&route, &params, &owned_key, id).await }
            .boxed()
            .shared();

        let running = InFlight {
            id,
            computation: computation.clone(),
        };
        if let Some(previous) = in_flight.insert(key.to_string(), running) {
            tracing::debug!(key = %key, superseded = previous.id, "Superseding in-flight computation");
        }
        tokio::spawn(computation.clone());
        computation
    }

    /// Loads the page, then caches a successful result and retires the
    /// in-flight entry if computation `id` still owns `key`. Both happen under
    /// the in-flight lock so no request falls between the two.
    async fn compute_and_store(
        &self,
        route: &RouteDescriptor,
        params: &RouteParams,
        key: &str,
        id: u64,
    ) -> Resolution {
        let outcome = self.load(route, params).await;

        let mut in_flight = self.inner.in_flight.lock().await;
        if !in_flight.get(key).is_some_and(|running| running.id == id) {
            tracing::debug!(key = %key, id, "Computation superseded, not caching");
            return Resolution::from_outcome(outcome);
        }

        match &outcome {
            Ok(result) => self.store(key, result, revalidate_after(route)).await,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Page computation failed, not caching");
            }
        }

        in_flight.remove(key);
        Resolution::from_outcome(outcome)
    }

    async fn load(
        &self,
        route: &RouteDescriptor,
        params: &RouteParams,
    ) -> Result<PageResult<PageProps>, RenderError> {
        let Some(loader) = self.inner.pages.loader(route.page()) else {
            return Err(RenderError::NotFound(format!("no loader for {}", route.page())));
        };
        loader.load(params).await
    }

    async fn cached(&self, key: &str) -> Option<PageResult<PageProps>> {
        match self.inner.cache.get(key).await {
            Ok(Some(bytes)) => match deserialize_page_result(&bytes) {
                Ok(result) => {
                    tracing::trace!(key = %key, "Cache hit for page");
                    Some(result)
                }
                Err(err) => {
                    // Treat as a miss.
                    tracing::warn!(key = %key, error = %err, "Cached page deserialization failed");
                    None
                }
            },
            Ok(None) => {
                tracing::trace!(key = %key, "Cache miss for page");
                None
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Cache read failed");
                None
            }
        }
    }

    async fn store(&self, key: &str, result: &PageResult<PageProps>, ttl: Option<Duration>) {
        let bytes = match serialize_page_result(result) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Failed to serialize page");
                return;
            }
        };
        if let Err(err) = self.inner.cache.set(key, &bytes, ttl).await {
            tracing::warn!(key = %key, error = %err, "Failed to cache page");
        }
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("pages", &self.inner.pages)
            .finish_non_exhaustive()
    }
}

fn validate(route: &RouteDescriptor, params: &RouteParams) -> Result<(), RenderError> {
    for name in route.required_params() {
        params.require(name)?;
    }
    Ok(())
}

fn revalidate_after(route: &RouteDescriptor) -> Option<Duration> {
    match route.mode() {
        RenderMode::Static { revalidate, .. } => *revalidate,
        RenderMode::PerRequest | RenderMode::Deferred { .. } => None,
    }
}
