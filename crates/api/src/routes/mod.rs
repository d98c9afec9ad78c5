pub mod admin;
pub mod ajax;
pub mod front_end;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/posts/{id}/drip          get, set, remove drip delay (admin only)
/// /admin/deactivate               run deactivation (POST, admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/admin", admin::router())
}
