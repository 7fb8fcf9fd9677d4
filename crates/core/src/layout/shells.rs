//! The site's shells and their registration.

use maud::{html, Markup};

use crate::route::PageId;

use super::LayoutRegistry;

pub const GLOBAL_SHELL_CLASS: &str = "global-shell";
pub const SEARCHABLE_SHELL_CLASS: &str = "searchable-shell";

/// Header linking home, with the page in `main`.
pub fn global_shell(page: Markup) -> Markup {
    html! {
        div class=(GLOBAL_SHELL_CLASS) {
            header {
                a href="/" { "ONEBITE BOOKS" }
            }
            main { (page) }
        }
    }
}

/// Search bar above the page. Submits `q` to `/search`.
pub fn searchable_shell(page: Markup) -> Markup {
    html! {
        div class=(SEARCHABLE_SHELL_CLASS) {
            form.searchbar action="/search" method="get" {
                input name="q" placeholder="Search books";
                button type="submit" { "Search" }
            }
            (page)
        }
    }
}

/// Layouts used by the site: the searchable shell on the home and search
/// pages, nothing extra on the book page.
pub fn site_layouts() -> LayoutRegistry {
    LayoutRegistry::new(global_shell)
        .with_layout(PageId::Home, searchable_shell)
        .with_layout(PageId::Search, searchable_shell)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> Markup {
        html! { div.content { "page" } }
    }

    #[test]
    fn test_global_always_outside_searchable() {
        let layouts = site_layouts();

        for page in [PageId::Home, PageId::Search] {
            let html = layouts.compose(page, content()).into_string();

            let global = html.find(GLOBAL_SHELL_CLASS).unwrap();
            let searchable = html.find(SEARCHABLE_SHELL_CLASS).unwrap();
            let content = html.find(r#"class="content""#).unwrap();
            assert!(global < searchable, "{page}: global shell must be outermost");
            assert!(searchable < content, "{page}: content must be innermost");
        }
    }

    #[test]
    fn test_book_page_has_global_shell_only() {
        let html = site_layouts().compose(PageId::Book, content()).into_string();

        assert!(html.starts_with(r#"<div class="global-shell">"#));
        assert!(!html.contains(SEARCHABLE_SHELL_CLASS));
        assert!(html.contains(r#"<main><div class="content">page</div></main>"#));
    }

    #[test]
    fn test_searchbar_submits_query() {
        let html = searchable_shell(html! {}).into_string();
        assert!(html.contains(r#"action="/search""#));
        assert!(html.contains(r#"name="q""#));
    }

    #[test]
    fn test_page_markup_is_not_escaped_twice() {
        let html = global_shell(html! { b { "<raw>" } }).into_string();
        assert!(html.contains("<b>&lt;raw&gt;</b>"));
    }
}
