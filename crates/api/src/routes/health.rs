use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// `GET /health` payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Post types the drip gate is enforced on.
    pub gated_post_types: Vec<String>,
    /// Entries currently held in the permalink cache.
    pub cached_permalinks: usize,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = drippress_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: drippress_core::plugin::VERSION,
        db_healthy,
        gated_post_types: state.config.supported_post_types.clone(),
        cached_permalinks: state.permalinks.len().await,
    })
}

/// Mount `/health` at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
