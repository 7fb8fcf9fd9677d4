use std::collections::HashSet;

use super::{PageId, RouteDescriptor, RouteError, RouteParams};

/// Collects route descriptors before the table is frozen.
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    routes: Vec<RouteDescriptor>,
}

impl RouteTableBuilder {
    /// Adds a route. Each page and each pattern may be registered once.
    pub fn register(mut self, route: RouteDescriptor) -> Result<Self, RouteError> {
        if self.routes.iter().any(|r| r.page() == route.page()) {
            return Err(RouteError::DuplicatePage(route.page()));
        }
        if self.routes.iter().any(|r| r.pattern() == route.pattern()) {
            return Err(RouteError::DuplicatePattern(route.pattern().to_string()));
        }
        self.routes.push(route);
        Ok(self)
    }

    pub fn build(self) -> RouteTable {
        RouteTable {
            routes: self.routes,
        }
    }
}

/// Registered routes. There is no way to add or change a route once built.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    pub fn get(&self, page: PageId) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|r| r.page() == page)
    }

    /// Finds the route for `path` and extracts its parameters.
    ///
    /// Anything after `?` is ignored; query values are merged by the caller.
    pub fn match_path(&self, path: &str) -> Option<(&RouteDescriptor, RouteParams)> {
        let path = path.split('?').next().unwrap_or_default();
        self.routes
            .iter()
            .find_map(|route| route.match_path(path).map(|params| (route, params)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }

    pub fn pages(&self) -> HashSet<PageId> {
        self.routes.iter().map(RouteDescriptor::page).collect()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{FallbackPolicy, RenderMode};

    fn table() -> RouteTable {
        RouteTable::builder()
            .register(RouteDescriptor::new(PageId::Home, "/", RenderMode::PerRequest).unwrap())
            .unwrap()
            .register(
                RouteDescriptor::new(
                    PageId::Book,
                    "/book/{id}",
                    RenderMode::precomputed(FallbackPolicy::Placeholder),
                )
                .unwrap(),
            )
            .unwrap()
            .register(
                RouteDescriptor::new(PageId::Search, "/search", RenderMode::deferred("q")).unwrap(),
            )
            .unwrap()
            .build()
    }

    #[test]
    fn test_match_path() {
        let table = table();

        let (route, params) = table.match_path("/book/7").unwrap();
        assert_eq!(route.page(), PageId::Book);
        assert_eq!(params.get("id"), Some("7"));

        let (route, params) = table.match_path("/search?q=dune").unwrap();
        assert_eq!(route.page(), PageId::Search);
        assert!(params.is_empty());

        assert_eq!(table.match_path("/").unwrap().0.page(), PageId::Home);
        assert!(table.match_path("/authors/1").is_none());
    }

    #[test]
    fn test_duplicate_page_rejected() {
        let result = RouteTable::builder()
            .register(RouteDescriptor::new(PageId::Home, "/", RenderMode::PerRequest).unwrap())
            .unwrap()
            .register(RouteDescriptor::new(PageId::Home, "/home", RenderMode::PerRequest).unwrap());

        assert_eq!(result.unwrap_err(), RouteError::DuplicatePage(PageId::Home));
    }

    #[test]
    fn test_duplicate_pattern_rejected() {
        let result = RouteTable::builder()
            .register(RouteDescriptor::new(PageId::Home, "/", RenderMode::PerRequest).unwrap())
            .unwrap()
            .register(RouteDescriptor::new(PageId::Search, "/", RenderMode::PerRequest).unwrap());

        assert_eq!(
            result.unwrap_err(),
            RouteError::DuplicatePattern("/".to_string())
        );
    }

    #[test]
    fn test_get_by_page() {
        let table = table();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get(PageId::Search).unwrap().pattern(), "/search");
        assert_eq!(table.pages().len(), 3);
    }
}
