use std::time::Duration;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{
        data::{page_data, root_data},
        health::{healthz, livez},
        pages::{book, home, search},
        revalidate::revalidate,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(home))
        .route("/book/{id}", get(book))
        .route("/search", get(search))
        // Settled page data for placeholders and deferred pages
        .route("/_data", get(root_data))
        .route("/_data/{*path}", get(page_data))
        .route("/api/revalidate", post(revalidate))
        // Probes
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use bookshelf_core::layout::{GLOBAL_SHELL_CLASS, SEARCHABLE_SHELL_CLASS};
    use bookshelf_core::view::{ERROR_MESSAGE, LOADING_MESSAGE, NOT_FOUND_MESSAGE};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::config::test_config;
    use crate::test_support::FakeCatalog;

    async fn app_with(catalog: Arc<FakeCatalog>) -> Router {
        let state = AppState::new(test_config(), catalog).unwrap();
        state.resolver.prerender().await;
        create_app(state)
    }

    async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, String) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn get_page(app: &Router, uri: &str) -> (StatusCode, String) {
        send(app, Method::GET, uri).await
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = send(app, Method::GET, uri).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    #[tokio::test]
    async fn test_enumerated_book_is_ready() {
        let app = app_with(Arc::new(FakeCatalog::new())).await;

        let (status, html) = get_page(&app, "/book/1").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(r#"data-phase="ready""#));
        assert!(html.contains("<title>Dune | ONEBITE BOOKS</title>"));
        assert!(html.contains(r#"<html lang="ko">"#));
        assert!(!html.contains("data-source"));
    }

    #[tokio::test]
    async fn test_unknown_book_loads_then_not_found() {
        let app = app_with(Arc::new(FakeCatalog::new())).await;

        let (status, html) = get_page(&app, "/book/999").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(LOADING_MESSAGE));
        assert!(html.contains(r#"data-source="/_data/book/999""#));

        let (status, json) = get_json(&app, "/_data/book/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["kind"], "page");
        assert_eq!(json["value"]["phase"], "not_found");

        let (status, html) = get_page(&app, "/book/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(html.contains(NOT_FOUND_MESSAGE));
    }

    #[tokio::test]
    async fn test_placeholder_book_becomes_ready() {
        let app = app_with(Arc::new(FakeCatalog::new())).await;

        let (_, html) = get_page(&app, "/book/4").await;
        assert!(html.contains(LOADING_MESSAGE));

        let (status, json) = get_json(&app, "/_data/book/4").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["value"]["data"]["book"]["title"], "Persuasion");

        let (status, html) = get_page(&app, "/book/4").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Persuasion"));
        assert!(!html.contains(LOADING_MESSAGE));
    }

    #[tokio::test]
    async fn test_search_ships_idle_then_settles() {
        let app = app_with(Arc::new(FakeCatalog::new())).await;

        let (status, html) = get_page(&app, "/search?q=dune").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(r#"data-phase="idle""#));
        assert!(html.contains(r#"data-source="/_data/search?q=dune""#));
        assert!(html.contains("search-results"));

        let (status, json) = get_json(&app, "/_data/search?q=dune").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["value"]["phase"], "ready");
        assert_eq!(json["value"]["data"]["books"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_pages_without_data_fetch_their_data_source() {
        let app = app_with(Arc::new(FakeCatalog::new())).await;

        for uri in ["/book/999", "/search?q=dune"] {
            let (_, html) = get_page(&app, uri).await;
            assert!(html.contains(r#"<script id="settle-page">"#), "{uri}");
            assert!(html.contains("fetch(body.dataset.source"), "{uri}");
            assert!(html.contains(r#"<div id="page">"#), "{uri}");
        }

        for uri in ["/book/1", "/search"] {
            let (_, html) = get_page(&app, uri).await;
            assert!(!html.contains("<script"), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_settled_data_carries_page_markup() {
        let app = app_with(Arc::new(FakeCatalog::new())).await;

        let (status, json) = get_json(&app, "/_data/book/4").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["title"], "Persuasion | ONEBITE BOOKS");
        let html = json["html"].as_str().unwrap();
        assert!(html.starts_with(r#"<div class="global-shell">"#));
        assert!(html.contains("Persuasion"));
        assert!(!html.contains(LOADING_MESSAGE));

        let (_, json) = get_json(&app, "/_data/search?q=dune").await;
        let html = json["html"].as_str().unwrap();
        assert!(html.contains(SEARCHABLE_SHELL_CLASS));
        assert!(html.contains(r#"href="/book/1""#));
    }

    #[tokio::test]
    async fn test_search_without_query_stays_idle() {
        let app = app_with(Arc::new(FakeCatalog::new())).await;

        let (status, html) = get_page(&app, "/search").await;
        assert_eq!(status, StatusCode::OK);
        assert!(!html.contains("data-source"));

        let (_, json) = get_json(&app, "/_data/search").await;
        assert_eq!(json["value"]["phase"], "idle");
    }

    #[tokio::test]
    async fn test_search_with_no_match_is_ready() {
        let app = app_with(Arc::new(FakeCatalog::new())).await;

        let (status, json) = get_json(&app, "/_data/search?q=tolkien").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["value"]["phase"], "ready");
        assert!(json["value"]["data"]["books"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_home_error_when_recommendations_fail() {
        let catalog = Arc::new(FakeCatalog::new());
        catalog.fail_random(true);
        let app = app_with(catalog).await;

        let (status, html) = get_page(&app, "/").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(html.contains(ERROR_MESSAGE));
        assert!(!html.contains(NOT_FOUND_MESSAGE));
    }

    #[tokio::test]
    async fn test_home_wraps_global_outside_searchable_shell() {
        let app = app_with(Arc::new(FakeCatalog::new())).await;

        let (status, html) = get_page(&app, "/").await;
        assert_eq!(status, StatusCode::OK);

        let global = html.find(GLOBAL_SHELL_CLASS).unwrap();
        let searchable = html.find(SEARCHABLE_SHELL_CLASS).unwrap();
        let content = html.find("Recommended books").unwrap();
        assert!(global < searchable);
        assert!(searchable < content);
    }

    #[tokio::test]
    async fn test_book_page_has_no_search_bar() {
        let app = app_with(Arc::new(FakeCatalog::new())).await;

        let (_, html) = get_page(&app, "/book/2").await;

        assert!(html.contains(GLOBAL_SHELL_CLASS));
        assert!(!html.contains(SEARCHABLE_SHELL_CLASS));
    }

    #[tokio::test]
    async fn test_data_for_unknown_path() {
        let app = app_with(Arc::new(FakeCatalog::new())).await;

        let (status, json) = get_json(&app, "/_data/authors/1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "no page at /authors/1");
    }

    #[tokio::test]
    async fn test_home_data() {
        let app = app_with(Arc::new(FakeCatalog::new())).await;

        let (status, json) = get_json(&app, "/_data").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["value"]["data"]["page"], "home");
    }

    #[tokio::test]
    async fn test_revalidate_path() {
        let catalog = Arc::new(FakeCatalog::new());
        let app = app_with(catalog.clone()).await;

        let (status, body) = send(&app, Method::POST, "/api/revalidate?path=/book/2").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["revalidated"], "/book/2");
        assert_eq!(json["phase"], "ready");
        assert_eq!(catalog.one_calls(), 4);
    }

    #[tokio::test]
    async fn test_revalidate_rejects_deferred_and_unknown() {
        let app = app_with(Arc::new(FakeCatalog::new())).await;

        let (status, _) = send(&app, Method::POST, "/api/revalidate?path=/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::POST, "/api/revalidate?path=/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::POST, "/api/revalidate").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_revalidate_page_purges() {
        let app = app_with(Arc::new(FakeCatalog::new())).await;

        let (status, body) = send(&app, Method::POST, "/api/revalidate?page=book").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["purged"], 3);

        // Enumerated pages are recomputed on demand.
        let (status, _) = get_page(&app, "/book/1").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_probes() {
        let app = app_with(Arc::new(FakeCatalog::new())).await;

        let (status, _) = get_page(&app, "/livez").await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = get_json(&app, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["precomputed"], 4);
        assert_eq!(json["in_flight"], 0);
    }
}
