//! The content gate: decide whether a rendered post body reaches the reader
//! or is replaced by a "not available yet" message.
//!
//! Every check that cannot be made (anonymous reader, missing dates, an
//! unsupported post) lets the content through. Only a comparison that
//! positively says "not yet" withholds it.

use crate::drip::{compare_drip_signup_dates, DripSetting};
use crate::formatting::{autop, esc_attr};
use crate::hooks::HookRegistry;
use crate::plugin::{DEFAULT_PENDING_MESSAGE, HOOK_PENDING_MESSAGE_FORMAT};
use crate::post_types::{confirm_supported_type, is_published};
use crate::types::Timestamp;

/// Everything the gate needs to know about one render.
#[derive(Debug, Clone, Copy)]
pub struct GateRequest<'a> {
    pub logged_in: bool,
    pub post_status: &'a str,
    pub post_type: &'a str,
    pub drip: Option<&'a DripSetting>,
    /// The reader's reference date (signup).
    pub signup: Option<Timestamp>,
    pub now: Timestamp,
}

/// Why the gate let content through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassReason {
    NotLoggedIn,
    NotPublished,
    UnsupportedType,
    MissingData,
    Available,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    PassThrough(PassReason),
    /// Content is withheld; `message` is the raw (unformatted) explanation.
    Withhold { message: String },
}

/// Run the gate checks in order and report the decision.
pub fn evaluate(req: &GateRequest<'_>, supported_types: &[String]) -> GateDecision {
    if !req.logged_in {
        return GateDecision::PassThrough(PassReason::NotLoggedIn);
    }
    if !is_published(req.post_status) {
        return GateDecision::PassThrough(PassReason::NotPublished);
    }
    if !confirm_supported_type(req.post_type, supported_types) {
        return GateDecision::PassThrough(PassReason::UnsupportedType);
    }

    let Some(comparison) = compare_drip_signup_dates(req.drip, req.signup, req.now) else {
        return GateDecision::PassThrough(PassReason::MissingData);
    };

    if comparison.display {
        return GateDecision::PassThrough(PassReason::Available);
    }

    let message = comparison
        .message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_PENDING_MESSAGE.to_string());
    GateDecision::Withhold { message }
}

/// Filter a rendered post body through the gate.
///
/// Withheld content is replaced by the escaped, paragraph-formatted message
/// after it has passed through the pending-message filter chain.
pub fn drip_control(
    content: String,
    req: &GateRequest<'_>,
    supported_types: &[String],
    hooks: &HookRegistry,
) -> String {
    match evaluate(req, supported_types) {
        GateDecision::PassThrough(_) => content,
        GateDecision::Withhold { message } => {
            hooks.apply_filters(HOOK_PENDING_MESSAGE_FORMAT, autop(&esc_attr(&message)))
        }
    }
}
