use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{RouteError, RouteParams};

/// Identity of a page component. Layouts and loaders are keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageId {
    Home,
    Book,
    Search,
}

impl PageId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::Book => "book",
            PageId::Search => "search",
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a precomputed-once route does for parameters it did not enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Respond with the not-found page.
    NotFound,
    /// Compute the page synchronously, then cache it.
    Blocking,
    /// Serve a loading placeholder and compute the page in the background.
    Placeholder,
}

impl fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FallbackPolicy::NotFound => "false",
            FallbackPolicy::Blocking => "blocking",
            FallbackPolicy::Placeholder => "true",
        };
        f.write_str(s)
    }
}

impl FromStr for FallbackPolicy {
    type Err = RouteError;

    /// Accepts the textual forms `false`, `blocking` and `true`, plus the
    /// variant names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "false" | "not_found" | "not-found" => Ok(FallbackPolicy::NotFound),
            "blocking" => Ok(FallbackPolicy::Blocking),
            "true" | "placeholder" => Ok(FallbackPolicy::Placeholder),
            other => Err(RouteError::UnknownFallback(other.to_string())),
        }
    }
}

/// Strategy that produces a route's initial data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderMode {
    /// Precomputed once and reused. `revalidate` bounds how long a cached
    /// result stays fresh; `None` keeps it until explicitly revalidated.
    Static {
        fallback: FallbackPolicy,
        revalidate: Option<Duration>,
    },
    /// Loaded again for every request, never cached.
    PerRequest,
    /// Shipped without data; the client fetches once `trigger` is present
    /// in the query string.
    Deferred { trigger: String },
}

impl RenderMode {
    /// Precomputed-once with no expiry.
    pub fn precomputed(fallback: FallbackPolicy) -> Self {
        RenderMode::Static {
            fallback,
            revalidate: None,
        }
    }

    pub fn deferred(trigger: impl Into<String>) -> Self {
        RenderMode::Deferred {
            trigger: trigger.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RenderMode::Static { .. } => "static",
            RenderMode::PerRequest => "per_request",
            RenderMode::Deferred { .. } => "deferred",
        }
    }
}

/// A registered route. Immutable once built, so a route never changes mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    page: PageId,
    pattern: String,
    segments: Vec<Segment>,
    mode: RenderMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

impl RouteDescriptor {
    /// Parses `pattern` (e.g. `/book/{id}`) and builds the descriptor.
    ///
    /// Every `{name}` segment becomes a required parameter.
    pub fn new(page: PageId, pattern: &str, mode: RenderMode) -> Result<Self, RouteError> {
        if !pattern.starts_with('/') {
            return Err(RouteError::InvalidPattern(pattern.to_string()));
        }

        let mut segments = Vec::new();
        for raw in pattern.split('/').filter(|s| !s.is_empty()) {
            let segment = match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) if !name.is_empty() && !name.contains(['{', '}']) => {
                    Segment::Param(name.to_string())
                }
                Some(_) => return Err(RouteError::InvalidPattern(pattern.to_string())),
                None if raw.contains(['{', '}']) => {
                    return Err(RouteError::InvalidPattern(pattern.to_string()))
                }
                None => Segment::Literal(raw.to_string()),
            };
            segments.push(segment);
        }

        Ok(Self {
            page,
            pattern: pattern.to_string(),
            segments,
            mode,
        })
    }

    pub fn page(&self) -> PageId {
        self.page
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn mode(&self) -> &RenderMode {
        &self.mode
    }

    /// Names of the parameters captured from the path.
    pub fn required_params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Matches a request path (without query string) against this route.
    pub fn match_path(&self, path: &str) -> Option<RouteParams> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => params.insert(name.clone(), part),
            }
        }
        Some(params)
    }

    /// Builds the concrete path for `params`, or `None` if one is missing.
    pub fn path_for(&self, params: &RouteParams) -> Option<String> {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(literal) => path.push_str(literal),
                Segment::Param(name) => path.push_str(params.get(name)?),
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        Some(path)
    }

    /// Keeps only the parameters that identify a page of this route.
    pub fn significant_params(&self, params: &RouteParams) -> RouteParams {
        let mut significant = RouteParams::new();
        for name in self.required_params() {
            if let Some(value) = params.get(name) {
                significant.insert(name, value);
            }
        }
        if let RenderMode::Deferred { trigger } = &self.mode {
            if let Some(value) = params.get(trigger) {
                significant.insert(trigger.clone(), value);
            }
        }
        significant
    }
}
