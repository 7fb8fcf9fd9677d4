//! Page views: pure functions from page state to markup.

mod books;

pub use books::{book_detail, book_item, book_list};

use maud::{html, Markup};

use crate::book::BookRecord;
use crate::render::PageState;
use crate::route::{PageId, PageProps};

pub const LOADING_MESSAGE: &str = "Loading...";
pub const NOT_FOUND_MESSAGE: &str = "The page you are looking for does not exist.";
pub const ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Renders the body of `page` for its current state.
///
/// Placeholder states render their literal messages; `Idle` renders the
/// page without data.
pub fn page_body(page: PageId, state: &PageState<PageProps>) -> Markup {
    match state {
        PageState::Idle => idle_body(page),
        PageState::Loading => message("loading", LOADING_MESSAGE),
        PageState::NotFound => message("not-found", NOT_FOUND_MESSAGE),
        PageState::Error => message("error", ERROR_MESSAGE),
        PageState::Ready(props) => ready_body(props),
    }
}

/// Document title for a page in its current state.
pub fn page_title(state: &PageState<PageProps>) -> String {
    match state.data() {
        Some(PageProps::Book { book }) => format!("{} | ONEBITE BOOKS", book.title),
        Some(PageProps::Search { query, .. }) => format!("{query} | ONEBITE BOOKS"),
        _ => "ONEBITE BOOKS".to_string(),
    }
}

fn idle_body(page: PageId) -> Markup {
    match page {
        PageId::Search => search_results(&[]),
        PageId::Home | PageId::Book => html! {},
    }
}

fn ready_body(props: &PageProps) -> Markup {
    match props {
        PageProps::Home {
            all_books,
            recommended_books,
        } => html! {
            div.home {
                section {
                    h3 { "Recommended books" }
                    (book_list(recommended_books))
                }
                section {
                    h3 { "All books" }
                    (book_list(all_books))
                }
            }
        },
        PageProps::Book { book } => book_detail(book),
        PageProps::Search { books, .. } => search_results(books),
    }
}

fn search_results(books: &[BookRecord]) -> Markup {
    html! {
        div.search-results { (book_list(books)) }
    }
}

fn message(class: &'static str, text: &'static str) -> Markup {
    html! { p class=(class) { (text) } }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home_props() -> PageProps {
        PageProps::Home {
            all_books: vec![BookRecord::new(1, "Dune"), BookRecord::new(2, "Emma")],
            recommended_books: vec![BookRecord::new(3, "Ulysses")],
        }
    }

    fn render(page: PageId, state: &PageState<PageProps>) -> String {
        page_body(page, state).into_string()
    }

    #[test]
    fn test_placeholder_messages() {
        assert_eq!(
            render(PageId::Book, &PageState::Loading),
            r#"<p class="loading">Loading...</p>"#
        );
        assert_eq!(
            render(PageId::Book, &PageState::NotFound),
            format!(r#"<p class="not-found">{NOT_FOUND_MESSAGE}</p>"#)
        );
        assert_eq!(
            render(PageId::Book, &PageState::Error),
            format!(r#"<p class="error">{ERROR_MESSAGE}</p>"#)
        );
    }

    #[test]
    fn test_home_lists_both_sections() {
        let html = render(PageId::Home, &PageState::Ready(home_props()));

        let recommended = html.find("Recommended books").unwrap();
        let ulysses = html.find("Ulysses").unwrap();
        let all = html.find("All books").unwrap();
        let dune = html.find("Dune").unwrap();
        assert!(recommended < ulysses && ulysses < all && all < dune);
    }

    #[test]
    fn test_idle_search_is_empty_list() {
        assert_eq!(
            render(PageId::Search, &PageState::Idle),
            r#"<div class="search-results"></div>"#
        );
        assert_eq!(render(PageId::Home, &PageState::Idle), "");
    }

    #[test]
    fn test_titles() {
        let book = PageState::Ready(PageProps::Book {
            book: BookRecord::new(1, "Dune"),
        });
        assert_eq!(page_title(&book), "Dune | ONEBITE BOOKS");
        assert_eq!(page_title(&PageState::Loading), "ONEBITE BOOKS");
    }
}
