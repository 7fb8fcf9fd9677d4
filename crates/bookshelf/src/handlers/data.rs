//! Settled page states for clients that received a page without data.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use bookshelf_core::render::phase_to_status_code;
use bookshelf_core::view::page_title;
use serde::Serialize;

use super::{pages::render_body, AppError};
use crate::{resolver::Resolution, state::AppState};

/// A settled resolution plus the markup the client swaps into `#page`.
#[derive(Debug, Serialize)]
pub struct SettledPage {
    #[serde(flatten)]
    resolution: Resolution,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

/// GET /_data
pub async fn root_data(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<(StatusCode, Json<SettledPage>), AppError> {
    settle_path(&state, "/", query).await
}

/// GET /_data/{*path}
///
/// Waits for the page at `/{path}` to settle. Query parameters are passed to
/// the page unless the path already provides them.
pub async fn page_data(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<(StatusCode, Json<SettledPage>), AppError> {
    let path = format!("/{}", path.trim_start_matches('/'));
    settle_path(&state, &path, query).await
}

async fn settle_path(
    state: &AppState,
    path: &str,
    query: HashMap<String, String>,
) -> Result<(StatusCode, Json<SettledPage>), AppError> {
    let Some((route, mut params)) = state.resolver.pages().routes().match_path(path) else {
        return Err(AppError::not_found(format!("no page at {path}")));
    };
    params.merge_missing(query);

    let resolution = state.resolver.settle(route, &params).await;
    let status = resolution
        .phase()
        .map(phase_to_status_code)
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::OK);

    let (html, title) = match &resolution {
        Resolution::Page(page_state) => (
            Some(render_body(state, route.page(), page_state)),
            Some(page_title(page_state)),
        ),
        Resolution::Redirect(_) => (None, None),
    };

    tracing::debug!(path = %path, status = %status, "Settled page data");
    Ok((
        status,
        Json(SettledPage {
            resolution,
            html,
            title,
        }),
    ))
}
