//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Resolver counters (fast, passive)

use axum::{extract::State, http::StatusCode, Json};

use crate::{resolver::ResolverStats, state::AppState};

/// GET /livez - Basic liveness probe.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Number of enumerated pages and running computations.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Json<ResolverStats> {
    Json(state.resolver.stats().await)
}
