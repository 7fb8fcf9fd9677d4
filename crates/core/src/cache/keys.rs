use crate::route::{PageId, RouteDescriptor, RouteParams};

/// Returns the cache key for one page of a route.
///
/// Only the parameters that identify the page take part, so unrelated query
/// values never split the cache.
///
/// # Examples
///
/// ```
/// use bookshelf_core::cache::page_key;
/// use bookshelf_core::route::{FallbackPolicy, PageId, RenderMode, RouteDescriptor, RouteParams};
///
/// let route = RouteDescriptor::new(
///     PageId::Book,
///     "/book/{id}",
///     RenderMode::precomputed(FallbackPolicy::Placeholder),
/// )
/// .unwrap();
/// let params = RouteParams::from_pairs([("id", "1"), ("ref", "mail")]);
/// assert_eq!(page_key(&route, &params), "page:book:id=1");
/// ```
pub fn page_key(route: &RouteDescriptor, params: &RouteParams) -> String {
    format!("page:{}:{}", route.page(), route.significant_params(params))
}

/// Returns the pattern matching every cached page of `page`.
pub fn page_pattern(page: PageId) -> String {
    format!("page:{page}:*")
}
