//! Admin endpoints: per-post drip settings and plugin deactivation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use drippress_core::drip::validate_drip_count;
use drippress_core::error::CoreError;
use drippress_core::types::DbId;
use drippress_db::models::drip_setting::UpsertDripSetting;
use drippress_db::repositories::{DripSettingRepo, PostRepo};
use drippress_events::bus::{EVENT_DRIP_SETTING_REMOVED, EVENT_DRIP_SETTING_UPDATED};
use drippress_events::DripEvent;

use crate::deactivate::deactivate;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

async fn ensure_post_exists(state: &AppState, post_id: DbId) -> AppResult<()> {
    match PostRepo::find_slug(&state.pool, post_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id: post_id,
        })),
    }
}

// ---------------------------------------------------------------------------
// Drip settings
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/posts/{id}/drip
pub async fn get_drip(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_post_exists(&state, post_id).await?;

    let setting = DripSettingRepo::find_for_post(&state.pool, post_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DripSetting",
            id: post_id,
        }))?;

    Ok(Json(DataResponse { data: setting }))
}

/// PUT /api/v1/admin/posts/{id}/drip
///
/// Create or replace the drip delay of a post.
pub async fn put_drip(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
    Json(input): Json<UpsertDripSetting>,
) -> AppResult<impl IntoResponse> {
    validate_drip_count(input.drip_count)?;
    ensure_post_exists(&state, post_id).await?;

    let setting = DripSettingRepo::upsert(&state.pool, post_id, &input).await?;

    state.event_bus.publish(
        DripEvent::new(EVENT_DRIP_SETTING_UPDATED)
            .with_source("post", post_id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({
                "drip_count": setting.drip_count,
                "drip_interval": setting.drip_interval,
            })),
    );

    tracing::info!(
        post_id,
        drip_count = setting.drip_count,
        drip_interval = %setting.drip_interval,
        user_id = admin.user_id,
        "Drip setting saved",
    );

    Ok(Json(DataResponse { data: setting }))
}

/// DELETE /api/v1/admin/posts/{id}/drip
pub async fn delete_drip(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let removed = DripSettingRepo::delete(&state.pool, post_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "DripSetting",
            id: post_id,
        }));
    }

    state.event_bus.publish(
        DripEvent::new(EVENT_DRIP_SETTING_REMOVED)
            .with_source("post", post_id)
            .with_actor(admin.user_id),
    );

    tracing::info!(post_id, user_id = admin.user_id, "Drip setting removed");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Deactivation
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/deactivate
///
/// Run the deactivation listeners and flush cached permalinks. Stored data
/// is not touched.
pub async fn deactivate_plugin(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let report = deactivate(&state, Some(admin.user_id)).await;
    Ok(Json(DataResponse { data: report }))
}
