use axum::routing::get;
use axum::Router;

use crate::handlers::ajax;
use crate::state::AppState;

/// Async endpoint routes mounted at `/ajax`.
///
/// ```text
/// GET /status/{post_id}  -> get_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/status/{post_id}", get(ajax::get_status))
}
