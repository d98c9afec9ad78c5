//! Server-side rendering of a single post page.
//!
//! The body goes through shortcode expansion first, then the drip gate, and
//! is wrapped in a document carrying the front-end asset tags.

use chrono::Utc;
use drippress_core::assets::AssetManifest;
use drippress_core::drip::DripSetting;
use drippress_core::formatting::esc_html;
use drippress_core::gate::{drip_control, GateRequest};
use drippress_core::plugin::{NONCE_ACTION_STATUS, SHORTCODE_DRIP_COMPLETE};
use drippress_core::shortcode::{
    expand_shortcodes, shortcode_completed, CompleteShortcodeArgs, CompletionView,
};
use drippress_core::types::{DbId, Timestamp};
use drippress_db::models::post::Post;
use drippress_db::repositories::{DripSettingRepo, UserProgressRepo, UserRepo};

use crate::error::AppResult;
use crate::state::AppState;

/// Everything the page template needs once the database work is done.
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    pub post: &'a Post,
    pub viewer_id: Option<DbId>,
    pub completed_at: Option<Timestamp>,
    pub drip: Option<DripSetting>,
    pub signup: Option<Timestamp>,
    pub nonce: String,
    pub now: Timestamp,
}

/// Load the viewer-specific state for `post` and render the page.
pub async fn render_post_page(
    state: &AppState,
    post: &Post,
    viewer_id: Option<DbId>,
) -> AppResult<String> {
    let now = Utc::now();

    let drip = DripSettingRepo::find_for_post(&state.pool, post.id)
        .await?
        .map(|row| row.to_setting())
        .transpose()?;

    let (completed_at, signup) = match viewer_id {
        Some(user_id) => (
            UserProgressRepo::find_completed_at(&state.pool, user_id, post.id).await?,
            UserRepo::find_signup_date(&state.pool, user_id).await?,
        ),
        None => (None, None),
    };

    let nonce = state
        .nonces
        .create(NONCE_ACTION_STATUS, viewer_id.unwrap_or(0), now);

    let ctx = PageContext {
        post,
        viewer_id,
        completed_at,
        drip,
        signup,
        nonce,
        now,
    };
    Ok(render_page(state, &ctx))
}

/// Produce the full HTML document for a prepared page.
pub fn render_page(state: &AppState, ctx: &PageContext<'_>) -> String {
    let config = &state.config;
    let manifest = AssetManifest::build(
        config.script_debug,
        &config.assets_url,
        &config.ajax_url(),
        &config.jquery_url,
        ctx.now,
    );

    let body = render_body(state, ctx);
    let title = esc_html(&ctx.post.title);
    let post_type = esc_html(&ctx.post.post_type);

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\" />\n\
         <title>{title}</title>\n\
         {head}\
         </head>\n\
         <body class=\"single single-{post_type}\">\n\
         <article id=\"post-{id}\" class=\"post-{id} type-{post_type}\">\n\
         <h1 class=\"entry-title\">{title}</h1>\n\
         <div class=\"entry-content\">\n{body}\n</div>\n\
         </article>\n\
         {footer}\
         </body>\n\
         </html>\n",
        head = manifest.head_tags(),
        footer = manifest.footer_tags(),
        id = ctx.post.id,
    )
}

/// Expand the completion shortcode, then run the result through the gate.
pub fn render_body(state: &AppState, ctx: &PageContext<'_>) -> String {
    let view = CompletionView {
        viewer_id: ctx.viewer_id,
        post_id: ctx.post.id,
        completed_at: ctx.completed_at,
        nonce: &ctx.nonce,
    };

    let expanded = expand_shortcodes(&ctx.post.content, SHORTCODE_DRIP_COMPLETE, |attrs, _| {
        shortcode_completed(&view, &CompleteShortcodeArgs::from_attrs(attrs))
    });

    let request = GateRequest {
        logged_in: ctx.viewer_id.is_some(),
        post_status: &ctx.post.status,
        post_type: &ctx.post.post_type,
        drip: ctx.drip.as_ref(),
        signup: ctx.signup,
        now: ctx.now,
    };

    drip_control(
        expanded,
        &request,
        &state.config.supported_post_types,
        &state.hooks,
    )
}
