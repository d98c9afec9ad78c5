//! Route definitions for admin endpoints, mounted at `/api/v1/admin`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// ```text
/// GET    /posts/{id}/drip  -> get_drip
/// PUT    /posts/{id}/drip  -> put_drip
/// DELETE /posts/{id}/drip  -> delete_drip
/// POST   /deactivate       -> deactivate_plugin
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/posts/{id}/drip",
            get(admin::get_drip)
                .put(admin::put_drip)
                .delete(admin::delete_drip),
        )
        .route("/deactivate", post(admin::deactivate_plugin))
}
