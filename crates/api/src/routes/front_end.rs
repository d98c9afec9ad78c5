//! Public reading routes, mounted at the root.

use axum::routing::get;
use axum::Router;

use crate::handlers::front_end;
use crate::state::AppState;

/// ```text
/// GET  /posts         -> list_posts
/// GET  /read/{slug}   -> render_page
/// POST /read/{slug}   -> submit_completion
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(front_end::list_posts))
        .route(
            "/read/{slug}",
            get(front_end::render_page).post(front_end::submit_completion),
        )
}
