use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use maud::Markup;

use crate::route::PageId;

/// Wraps rendered page markup in a shell.
pub type LayoutFn = Arc<dyn Fn(Markup) -> Markup + Send + Sync>;

/// Per-page layout declarations plus the global shell.
///
/// Populated at startup. Pages without a declaration render bare inside
/// the global shell.
#[derive(Clone)]
pub struct LayoutRegistry {
    global: LayoutFn,
    pages: HashMap<PageId, LayoutFn>,
}

impl LayoutRegistry {
    pub fn new(global: impl Fn(Markup) -> Markup + Send + Sync + 'static) -> Self {
        Self {
            global: Arc::new(global),
            pages: HashMap::new(),
        }
    }

    /// Declares the layout for `page`, replacing any previous declaration.
    pub fn with_layout(
        mut self,
        page: PageId,
        layout: impl Fn(Markup) -> Markup + Send + Sync + 'static,
    ) -> Self {
        self.pages.insert(page, Arc::new(layout));
        self
    }

    pub fn has_layout(&self, page: PageId) -> bool {
        self.pages.contains_key(&page)
    }

    /// Builds the final markup: global shell, then the page's own layout,
    /// then the page body.
    pub fn compose(&self, page: PageId, body: Markup) -> Markup {
        let wrapped = match self.pages.get(&page) {
            Some(layout) => layout(body),
            None => body,
        };
        (self.global)(wrapped)
    }
}

impl Default for LayoutRegistry {
    /// A registry whose global shell is the identity.
    fn default() -> Self {
        Self::new(|page| page)
    }
}

impl fmt::Debug for LayoutRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pages: Vec<_> = self.pages.keys().collect();
        pages.sort();
        f.debug_struct("LayoutRegistry")
            .field("pages", &pages)
            .finish_non_exhaustive()
    }
}
