pub mod data;
pub mod error;
pub mod health;
pub mod pages;
pub mod revalidate;

pub use error::AppError;

/// Path of the data endpoint that settles the page at `path`.
pub fn data_path(path: &str) -> String {
    match path {
        "/" => "/_data".to_string(),
        path => format!("/_data{path}"),
    }
}
