use serde::{Deserialize, Serialize};

/// Identifier the catalog API assigns to a book.
pub type BookId = u64;

/// A single book as returned by the remote catalog.
///
/// Field names on the wire follow the catalog API (`subTitle`, `coverImgUrl`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    pub id: BookId,
    pub title: String,
    #[serde(rename = "subTitle", default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub cover_img_url: String,
}

impl BookRecord {
    /// Creates a book with the given ID and title and empty details.
    pub fn new(id: BookId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            subtitle: String::new(),
            description: String::new(),
            author: String::new(),
            publisher: String::new(),
            cover_img_url: String::new(),
        }
    }

    /// Sets the subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets author and publisher.
    pub fn with_credits(mut self, author: impl Into<String>, publisher: impl Into<String>) -> Self {
        self.author = author.into();
        self.publisher = publisher.into();
        self
    }

    /// Sets the cover image URL.
    pub fn with_cover(mut self, url: impl Into<String>) -> Self {
        self.cover_img_url = url.into();
        self
    }

    /// Returns true if the title, subtitle or author contains `query`
    /// (case-insensitive).
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        [&self.title, &self.subtitle, &self.author]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}
