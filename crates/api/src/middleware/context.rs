//! Derives the [`RequestContext`] a completion form post is evaluated in.
//!
//! | Flag             | Set when                                                         |
//! |------------------|------------------------------------------------------------------|
//! | `is_admin`       | path is under `/api/v1/admin`                                    |
//! | `doing_autosave` | `x-drippress-autosave` header present                            |
//! | `doing_ajax`     | path is under `/ajax` or `x-requested-with: XMLHttpRequest`       |
//! | `doing_cron`     | `x-drippress-cron` header present                                |

use std::convert::Infallible;

use axum::extract::{FromRequestParts, OriginalUri};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use drippress_core::submission::RequestContext;

use crate::state::AppState;

pub const ADMIN_PATH_PREFIX: &str = "/api/v1/admin";
pub const AJAX_PATH_PREFIX: &str = "/ajax";
pub const HEADER_AUTOSAVE: &str = "x-drippress-autosave";
pub const HEADER_CRON: &str = "x-drippress-cron";

/// Extractor wrapper around [`RequestContext`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionContext(pub RequestContext);

/// Build the context from a request path and its headers.
pub fn context_for(path: &str, headers: &HeaderMap) -> RequestContext {
    let requested_with_xhr = headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"));

    RequestContext {
        is_admin: under(path, ADMIN_PATH_PREFIX),
        doing_autosave: headers.contains_key(HEADER_AUTOSAVE),
        doing_ajax: under(path, AJAX_PATH_PREFIX) || requested_with_xhr,
        doing_cron: headers.contains_key(HEADER_CRON),
    }
}

fn under(path: &str, prefix: &str) -> bool {
    path == prefix || path.starts_with(&format!("{prefix}/"))
}

impl FromRequestParts<AppState> for SubmissionContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Nested routers see a stripped URI; prefer the original.
        let path = parts
            .extensions
            .get::<OriginalUri>()
            .map(|uri| uri.0.path().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        Ok(SubmissionContext(context_for(&path, &parts.headers)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn front_end_post_has_no_flags() {
        let ctx = context_for("/read/lesson-1", &HeaderMap::new());
        assert_eq!(ctx, RequestContext::default());
    }

    #[test]
    fn admin_and_ajax_paths_are_flagged() {
        assert!(context_for("/api/v1/admin/deactivate", &HeaderMap::new()).is_admin);
        assert!(context_for("/ajax/status/3", &HeaderMap::new()).doing_ajax);
        assert!(!context_for("/ajaxish", &HeaderMap::new()).doing_ajax);
    }

    #[test]
    fn headers_set_flags() {
        let mut headers = HeaderMap::new();
        headers.insert("x-requested-with", HeaderValue::from_static("xmlhttprequest"));
        headers.insert(HEADER_AUTOSAVE, HeaderValue::from_static("1"));
        headers.insert(HEADER_CRON, HeaderValue::from_static("1"));

        let ctx = context_for("/read/lesson-1", &headers);
        assert!(ctx.doing_ajax);
        assert!(ctx.doing_autosave);
        assert!(ctx.doing_cron);
        assert!(!ctx.is_admin);
    }
}
