//! Validation of the "mark completed" form post.
//!
//! [`evaluate_submission`] walks the guard sequence and reports what the
//! request handler should do; it performs no I/O itself. Only a bad nonce is
//! fatal. Every other gap is a silent no-op and the page renders normally.

use serde::Deserialize;

use crate::nonce::NonceVerdict;
use crate::plugin::BUTTON_VALUE_COMPLETE;
use crate::types::DbId;

/// Raw form fields as posted. Everything is optional at this boundary;
/// [`evaluate_submission`] decides what is usable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionForm {
    #[serde(rename = "dppress-prompt-button")]
    pub button: Option<String>,
    #[serde(rename = "dppress_nonce_status_name")]
    pub nonce: Option<String>,
    #[serde(rename = "dppress-prompt-post-id")]
    pub post_id: Option<String>,
    #[serde(rename = "dppress-prompt-user-id")]
    pub user_id: Option<String>,
}

/// Where a request is coming from. Completion writes only happen on plain
/// front-end page requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub is_admin: bool,
    pub doing_autosave: bool,
    pub doing_ajax: bool,
    pub doing_cron: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AdminContext,
    Autosave,
    Async,
    Scheduled,
    NotCompleteButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Not a completion submission; carry on rendering.
    Skipped(SkipReason),
    /// The anti-forgery check failed; the request must stop here.
    NonceFailed,
    /// A completion submission without both ids; carry on rendering.
    MissingIds,
    /// Record completion of `post_id` for `user_id`, then redirect.
    Complete { post_id: DbId, user_id: DbId },
}

/// Walk the guard sequence for a completion form post.
///
/// `verify_nonce` is only called once the button check has passed.
pub fn evaluate_submission<F>(
    ctx: &RequestContext,
    form: &CompletionForm,
    verify_nonce: F,
) -> SubmissionOutcome
where
    F: FnOnce(&str) -> NonceVerdict,
{
    if ctx.is_admin {
        return SubmissionOutcome::Skipped(SkipReason::AdminContext);
    }
    if ctx.doing_autosave {
        return SubmissionOutcome::Skipped(SkipReason::Autosave);
    }
    if ctx.doing_ajax {
        return SubmissionOutcome::Skipped(SkipReason::Async);
    }
    if ctx.doing_cron {
        return SubmissionOutcome::Skipped(SkipReason::Scheduled);
    }

    match form.button.as_deref().map(str::trim) {
        Some(BUTTON_VALUE_COMPLETE) => {}
        _ => return SubmissionOutcome::Skipped(SkipReason::NotCompleteButton),
    }

    let nonce_ok = match form.nonce.as_deref() {
        Some(nonce) if !is_empty_field(Some(nonce)) => verify_nonce(nonce).is_valid(),
        _ => false,
    };
    if !nonce_ok {
        return SubmissionOutcome::NonceFailed;
    }

    if is_empty_field(form.post_id.as_deref()) || is_empty_field(form.user_id.as_deref()) {
        return SubmissionOutcome::MissingIds;
    }

    SubmissionOutcome::Complete {
        post_id: absint(form.post_id.as_deref().unwrap_or_default()),
        user_id: absint(form.user_id.as_deref().unwrap_or_default()),
    }
}

/// A posted field counts as empty when absent, blank, or the string `"0"`.
pub fn is_empty_field(value: Option<&str>) -> bool {
    matches!(value, None | Some("") | Some("0"))
}

/// Convert a posted value to a non-negative integer.
///
/// Leading whitespace is skipped, an optional sign is dropped, and digits are
/// read up to the first non-digit. Text without leading digits yields 0 and
/// overlong numbers saturate.
pub fn absint(value: &str) -> DbId {
    let s = value.trim_start();
    let s = s.strip_prefix(['-', '+']).unwrap_or(s);
    s.bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{FIELD_NONCE, FIELD_PROMPT_BUTTON, FIELD_PROMPT_POST_ID, FIELD_PROMPT_USER_ID};
    use assert_matches::assert_matches;

    fn valid_form() -> CompletionForm {
        CompletionForm {
            button: Some("complete".into()),
            nonce: Some("abcdef0123".into()),
            post_id: Some("42".into()),
            user_id: Some("7".into()),
        }
    }

    fn accept(_: &str) -> NonceVerdict {
        NonceVerdict::Fresh
    }

    fn reject(_: &str) -> NonceVerdict {
        NonceVerdict::Invalid
    }

    #[test]
    fn valid_submission_completes() {
        let outcome = evaluate_submission(&RequestContext::default(), &valid_form(), accept);
        assert_eq!(
            outcome,
            SubmissionOutcome::Complete {
                post_id: 42,
                user_id: 7
            }
        );
    }

    #[test]
    fn background_contexts_are_skipped_before_anything_else() {
        let cases = [
            (
                RequestContext {
                    is_admin: true,
                    ..Default::default()
                },
                SkipReason::AdminContext,
            ),
            (
                RequestContext {
                    doing_autosave: true,
                    ..Default::default()
                },
                SkipReason::Autosave,
            ),
            (
                RequestContext {
                    doing_ajax: true,
                    ..Default::default()
                },
                SkipReason::Async,
            ),
            (
                RequestContext {
                    doing_cron: true,
                    ..Default::default()
                },
                SkipReason::Scheduled,
            ),
        ];
        for (ctx, reason) in cases {
            // The nonce is never consulted, so a rejecting verifier changes nothing.
            assert_eq!(
                evaluate_submission(&ctx, &valid_form(), reject),
                SubmissionOutcome::Skipped(reason)
            );
        }
    }

    #[test]
    fn missing_or_wrong_button_is_a_no_op() {
        for button in [None, Some(""), Some("completed"), Some("COMPLETE")] {
            let form = CompletionForm {
                button: button.map(String::from),
                ..valid_form()
            };
            assert_eq!(
                evaluate_submission(&RequestContext::default(), &form, reject),
                SubmissionOutcome::Skipped(SkipReason::NotCompleteButton)
            );
        }
    }

    #[test]
    fn button_value_is_trimmed() {
        let form = CompletionForm {
            button: Some("  complete \n".into()),
            ..valid_form()
        };
        assert_matches!(
            evaluate_submission(&RequestContext::default(), &form, accept),
            SubmissionOutcome::Complete { .. }
        );
    }

    #[test]
    fn bad_or_missing_nonce_is_fatal() {
        assert_eq!(
            evaluate_submission(&RequestContext::default(), &valid_form(), reject),
            SubmissionOutcome::NonceFailed
        );
        let form = CompletionForm {
            nonce: None,
            ..valid_form()
        };
        assert_eq!(
            evaluate_submission(&RequestContext::default(), &form, accept),
            SubmissionOutcome::NonceFailed
        );
    }

    #[test]
    fn nonce_is_checked_before_ids() {
        let form = CompletionForm {
            post_id: None,
            ..valid_form()
        };
        assert_eq!(
            evaluate_submission(&RequestContext::default(), &form, reject),
            SubmissionOutcome::NonceFailed
        );
    }

    #[test]
    fn missing_ids_return_silently() {
        for (post, user) in [(None, Some("7")), (Some("42"), None), (Some("0"), Some("7"))] {
            let form = CompletionForm {
                post_id: post.map(String::from),
                user_id: user.map(String::from),
                ..valid_form()
            };
            assert_eq!(
                evaluate_submission(&RequestContext::default(), &form, accept),
                SubmissionOutcome::MissingIds
            );
        }
    }

    #[test]
    fn ids_are_normalized_to_non_negative_integers() {
        let form = CompletionForm {
            post_id: Some("-42".into()),
            user_id: Some(" 7abc".into()),
            ..valid_form()
        };
        assert_eq!(
            evaluate_submission(&RequestContext::default(), &form, accept),
            SubmissionOutcome::Complete {
                post_id: 42,
                user_id: 7
            }
        );
    }

    #[test]
    fn absint_edge_cases() {
        assert_eq!(absint("17"), 17);
        assert_eq!(absint("+17"), 17);
        assert_eq!(absint("abc"), 0);
        assert_eq!(absint(""), 0);
        assert_eq!(absint("12.9"), 12);
        assert_eq!(absint("99999999999999999999999"), i64::MAX);
    }

    #[test]
    fn form_field_names_match_plugin_constants() {
        let posted = serde_json::json!({
            FIELD_PROMPT_BUTTON: "complete",
            FIELD_NONCE: "abcdef0123",
            FIELD_PROMPT_POST_ID: "12",
            FIELD_PROMPT_USER_ID: "7",
        });

        let form: CompletionForm = serde_json::from_value(posted).unwrap();
        assert_eq!(form.button.as_deref(), Some("complete"));
        assert_eq!(form.nonce.as_deref(), Some("abcdef0123"));
        assert_eq!(form.post_id.as_deref(), Some("12"));
        assert_eq!(form.user_id.as_deref(), Some("7"));
    }
}
