use std::collections::HashMap;

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use bookshelf_core::render::{phase_to_status_code, PageState, Phase};
use bookshelf_core::route::{PageId, PageProps, RenderMode, RouteDescriptor, RouteParams};
use bookshelf_core::view::{page_body, page_title};

use super::{data_path, AppError};
use crate::{resolver::Resolution, state::AppState};

/// HTML document around a composed page.
#[derive(Template)]
#[template(path = "document.html")]
struct DocumentTemplate<'a> {
    lang: &'a str,
    title: String,
    body: String,
    phase: Phase,
    /// Where the client fetches the settled page, for pages without data.
    data_source: Option<String>,
}

/// GET /
pub async fn home(State(state): State<AppState>) -> Result<Response, AppError> {
    render_page(&state, PageId::Home, RouteParams::new()).await
}

/// GET /book/{id}
pub async fn book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    render_page(&state, PageId::Book, RouteParams::from_pairs([("id", id)])).await
}

/// GET /search?q=
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    render_page(&state, PageId::Search, RouteParams::from_pairs(query)).await
}

async fn render_page(
    state: &AppState,
    page: PageId,
    params: RouteParams,
) -> Result<Response, AppError> {
    let route = state
        .resolver
        .pages()
        .route(page)
        .ok_or_else(|| anyhow::anyhow!("no route registered for {page}"))?;

    let page_state = match state.resolver.resolve(route, &params).await {
        Resolution::Page(page_state) => page_state,
        Resolution::Redirect(location) => {
            tracing::debug!(page = %page, location = %location, "Redirecting");
            return Ok(Redirect::temporary(&location).into_response());
        }
    };

    let phase = page_state.phase();
    let document = DocumentTemplate {
        lang: &state.config.lang,
        title: page_title(&page_state),
        body: render_body(state, page, &page_state),
        phase,
        data_source: data_source(route, &params, phase),
    };
    let html = document.render()?;

    tracing::debug!(page = %page, mode = route.mode().name(), phase = %phase, "Rendered page");
    let status =
        StatusCode::from_u16(phase_to_status_code(phase)).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    Ok((status, Html(html)).into_response())
}

/// The page body inside its layouts, as served in `#page`.
pub(crate) fn render_body(
    state: &AppState,
    page: PageId,
    page_state: &PageState<PageProps>,
) -> String {
    state
        .layouts
        .compose(page, page_body(page, page_state))
        .into_string()
}

/// Data endpoint for a page shipped without its data: a placeholder, or a
/// deferred page whose trigger is present.
fn data_source(route: &RouteDescriptor, params: &RouteParams, phase: Phase) -> Option<String> {
    let path = route.path_for(params)?;
    match (route.mode(), phase) {
        (RenderMode::Static { .. }, Phase::Loading) => Some(data_path(&path)),
        (RenderMode::Deferred { trigger }, Phase::Idle) => {
            let value = params.get(trigger).map(str::trim).filter(|v| !v.is_empty())?;
            Some(format!(
                "{}?{}={}",
                data_path(&path),
                trigger,
                urlencoding::encode(value)
            ))
        }
        _ => None,
    }
}
