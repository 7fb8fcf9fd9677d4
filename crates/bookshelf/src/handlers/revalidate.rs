use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use bookshelf_core::route::PageId;

use super::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RevalidateQuery {
    /// Concrete path of one precomputed page, e.g. `/book/2`.
    pub path: Option<String>,
    /// Page whose cached entries are all dropped.
    pub page: Option<PageId>,
}

/// POST /api/revalidate?path=<path> | ?page=<page>
///
/// With `path`, drops the cached page and recomputes it. With `page`, drops
/// every cached entry of that page; they are recomputed on the next request.
pub async fn revalidate(
    State(state): State<AppState>,
    Query(query): Query<RevalidateQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    if let Some(path) = query.path {
        let Some((route, params)) = state.resolver.pages().routes().match_path(&path) else {
            return Err(AppError::not_found(format!("no page at {path}")));
        };
        let Some(resolution) = state.resolver.revalidate(route, &params).await else {
            return Err(AppError::bad_request(format!(
                "{path} is rendered {}, nothing to revalidate",
                route.mode().name()
            )));
        };
        return Ok(Json(serde_json::json!({
            "revalidated": path,
            "phase": resolution.phase(),
        })));
    }

    if let Some(page) = query.page {
        let purged = state.resolver.purge(page).await;
        return Ok(Json(serde_json::json!({
            "page": page,
            "purged": purged,
        })));
    }

    Err(AppError::bad_request("expected a `path` or `page` parameter"))
}
