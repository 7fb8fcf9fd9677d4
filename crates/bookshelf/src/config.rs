use std::{env, fmt, str::FromStr, time::Duration};

use bookshelf_client::client::DEFAULT_CATALOG_URL;
use bookshelf_core::route::{FallbackPolicy, RenderMode};

/// Build profile for the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeRenderMode {
    /// Precomputed once at startup.
    Static,
    /// Loaded on every request.
    PerRequest,
}

impl FromStr for HomeRenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(HomeRenderMode::Static),
            "per-request" | "per_request" | "ssr" => Ok(HomeRenderMode::PerRequest),
            other => Err(format!("unknown home render mode: {other}")),
        }
    }
}

impl fmt::Display for HomeRenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeRenderMode::Static => f.write_str("static"),
            HomeRenderMode::PerRequest => f.write_str("per-request"),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Catalog API base URL (default: "http://localhost:12345")
    pub catalog_url: String,
    /// Catalog request timeout in seconds (default: 10)
    pub catalog_timeout_seconds: u64,
    /// Maximum number of cached pages (default: 1,000)
    pub cache_max_entries: usize,
    /// Seconds a precomputed page stays fresh; 0 keeps it until revalidated (default: 0)
    pub revalidate_seconds: u64,
    /// How the home page is produced (default: static)
    pub home_mode: HomeRenderMode,
    /// What `/book/{id}` does for ids that were not precomputed (default: placeholder)
    pub book_fallback: FallbackPolicy,
    /// `lang` attribute of rendered documents (default: "ko")
    pub lang: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CATALOG_API_URL` - Catalog API base URL
    /// - `CATALOG_TIMEOUT_SECONDS` - Catalog request timeout (default: 10)
    /// - `CACHE_MAX_ENTRIES` - Maximum cached pages (default: 1,000)
    /// - `REVALIDATE_SECONDS` - Freshness of precomputed pages (default: 0, never stale)
    /// - `HOME_RENDER_MODE` - `static` or `per-request` (default: static)
    /// - `BOOK_FALLBACK` - `false`, `blocking` or `true` (default: true)
    /// - `DOCUMENT_LANG` - Document language (default: "ko")
    pub fn from_env() -> Self {
        Self {
            catalog_url: env::var("CATALOG_API_URL")
                .unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_string()),
            catalog_timeout_seconds: parse_env("CATALOG_TIMEOUT_SECONDS").unwrap_or(10),
            cache_max_entries: parse_env("CACHE_MAX_ENTRIES").unwrap_or(1_000),
            revalidate_seconds: parse_env("REVALIDATE_SECONDS").unwrap_or(0),
            home_mode: parse_env("HOME_RENDER_MODE").unwrap_or(HomeRenderMode::Static),
            book_fallback: parse_env("BOOK_FALLBACK").unwrap_or(FallbackPolicy::Placeholder),
            lang: env::var("DOCUMENT_LANG").unwrap_or_else(|_| "ko".to_string()),
        }
    }

    /// Get the catalog timeout as a Duration.
    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog_timeout_seconds)
    }

    /// Get the revalidation window, `None` when pages never go stale.
    pub fn revalidate(&self) -> Option<Duration> {
        (self.revalidate_seconds > 0).then(|| Duration::from_secs(self.revalidate_seconds))
    }

    /// Rendering mode of `/`.
    pub fn home_render_mode(&self) -> RenderMode {
        match self.home_mode {
            HomeRenderMode::Static => RenderMode::Static {
                fallback: FallbackPolicy::Blocking,
                revalidate: self.revalidate(),
            },
            HomeRenderMode::PerRequest => RenderMode::PerRequest,
        }
    }

    /// Rendering mode of `/book/{id}`.
    pub fn book_render_mode(&self) -> RenderMode {
        RenderMode::Static {
            fallback: self.book_fallback,
            revalidate: self.revalidate(),
        }
    }
}

fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(variable = name, value = %raw, "Ignoring unparsable setting");
            None
        }
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        catalog_url: "http://catalog.invalid".to_string(),
        catalog_timeout_seconds: 1,
        cache_max_entries: 100,
        revalidate_seconds: 0,
        home_mode: HomeRenderMode::Static,
        book_fallback: FallbackPolicy::Placeholder,
        lang: "ko".to_string(),
    }
}
