use maud::{html, Markup};

use crate::book::BookRecord;

/// A linked summary card for a book.
pub fn book_item(book: &BookRecord) -> Markup {
    html! {
        a.book-item href={ "/book/" (book.id) } {
            img src=(book.cover_img_url) alt=(book.title);
            div {
                div.title { (book.title) }
                div.subtitle { (book.subtitle) }
                br;
                div.author { (book.author) " | " (book.publisher) }
            }
        }
    }
}

pub fn book_list(books: &[BookRecord]) -> Markup {
    html! {
        @for book in books {
            (book_item(book))
        }
    }
}

/// Full page for a single book.
pub fn book_detail(book: &BookRecord) -> Markup {
    html! {
        div.book-detail {
            div.cover-img-container style={ "background-image: url('" (book.cover_img_url) "')" } {
                img src=(book.cover_img_url);
            }
            div.title { (book.title) }
            div.subtitle { (book.subtitle) }
            div.author { (book.author) " | " (book.publisher) }
            div.description { (book.description) }
        }
    }
}
