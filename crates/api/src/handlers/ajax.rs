//! Handlers behind the URL advertised to front-end scripts.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use drippress_core::error::CoreError;
use drippress_core::progress::ContentStatus;
use drippress_core::types::DbId;
use drippress_db::repositories::{PostRepo, UserProgressRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /ajax/status/{post_id}
///
/// The authenticated reader's completion status for a post.
pub async fn get_status(
    user: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if PostRepo::find_slug(&state.pool, post_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id: post_id,
        }));
    }

    let completed_at =
        UserProgressRepo::find_completed_at(&state.pool, user.user_id, post_id).await?;

    Ok(Json(DataResponse {
        data: ContentStatus::new(post_id, completed_at),
    }))
}
