//! Handlers for the public reading pages and the completion form.

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, Query, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use chrono::Utc;
use drippress_core::error::CoreError;
use drippress_core::formatting::sanitize_redirect_url;
use drippress_core::plugin::NONCE_ACTION_STATUS;
use drippress_core::query::{remove_drip_from_queries, PostQuery};
use drippress_core::submission::{evaluate_submission, CompletionForm, SubmissionOutcome};
use drippress_core::types::DbId;
use drippress_db::models::post::Post;
use drippress_db::repositories::{PostRepo, UserProgressRepo};
use drippress_events::DripEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Viewer;
use crate::middleware::context::SubmissionContext;
use crate::permalink::site_root;
use crate::render::render_post_page;
use crate::response::DataResponse;
use crate::state::AppState;

/// Load a post by slug. Unpublished posts are only visible to admins.
async fn load_visible_post(state: &AppState, slug: &str, viewer: &Viewer) -> AppResult<Post> {
    let post = PostRepo::find_by_slug(&state.pool, slug).await?;
    match post {
        Some(post) if post.is_published() || viewer.is_admin() => Ok(post),
        _ => Err(AppError::Core(CoreError::SlugNotFound {
            entity: "Post",
            slug: slug.to_string(),
        })),
    }
}

/// GET /read/{slug}
///
/// Render the post page with the completion shortcode expanded and the drip
/// gate applied for the current viewer.
pub async fn render_page(
    viewer: Viewer,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Html<String>> {
    let post = load_visible_post(&state, &slug, &viewer).await?;
    let html = render_post_page(&state, &post, viewer.user_id()).await?;
    Ok(Html(html))
}

/// POST /read/{slug}
///
/// Target of the completion button. A valid submission records the
/// completion and redirects to the post's permalink; anything the guards
/// skip renders the page exactly as a GET would. A body that does not decode
/// as a form is treated as an empty form.
pub async fn submit_completion(
    viewer: Viewer,
    SubmissionContext(ctx): SubmissionContext,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    form: Result<Form<CompletionForm>, FormRejection>,
) -> AppResult<Response> {
    let form = form.map(|Form(form)| form).unwrap_or_else(|rejection| {
        tracing::debug!(error = %rejection, slug = %slug, "Completion form not decodable");
        CompletionForm::default()
    });

    let now = Utc::now();
    let nonce_user = viewer.id_or_zero();

    let outcome = evaluate_submission(&ctx, &form, |nonce| {
        state.nonces.verify(nonce, NONCE_ACTION_STATUS, nonce_user, now)
    });

    match outcome {
        SubmissionOutcome::Complete { post_id, user_id } => {
            let location = record_completion(&state, &viewer, post_id, user_id).await?;
            return Ok((StatusCode::FOUND, [(LOCATION, location)]).into_response());
        }
        SubmissionOutcome::NonceFailed => return Err(AppError::NonceFailed),
        SubmissionOutcome::Skipped(reason) => {
            tracing::debug!(?reason, slug = %slug, "Completion form skipped");
        }
        SubmissionOutcome::MissingIds => {
            tracing::debug!(slug = %slug, "Completion form missing post or user id");
        }
    }

    render_page(viewer, State(state), Path(slug))
        .await
        .map(IntoResponse::into_response)
}

/// Persist a completion, announce it, and work out where to send the reader.
async fn record_completion(
    state: &AppState,
    viewer: &Viewer,
    post_id: DbId,
    user_id: DbId,
) -> AppResult<String> {
    let progress = UserProgressRepo::mark_completed(&state.pool, user_id, post_id).await?;

    let mut event = DripEvent::progress_completed(post_id, user_id);
    if let Some(actor) = viewer.user_id() {
        event = event.with_actor(actor);
    }
    state.event_bus.publish(event);

    tracing::info!(
        post_id,
        user_id,
        completed_at = %progress.completed_at,
        "Post marked completed",
    );

    let site_url = &state.config.site_url;
    let target = state
        .permalinks
        .permalink(&state.pool, site_url, post_id)
        .await?
        .unwrap_or_else(|| site_root(site_url));
    Ok(sanitize_redirect_url(&target))
}

/// GET /posts
///
/// List published posts, newest first.
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<PostQuery>,
) -> AppResult<impl IntoResponse> {
    let query = remove_drip_from_queries(params.clamped(), false);
    let posts = PostRepo::list_published(
        &state.pool,
        query.post_type.as_deref(),
        query.limit,
        query.offset,
    )
    .await?;

    Ok(Json(DataResponse { data: posts }))
}
