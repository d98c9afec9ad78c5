//! Plugin-wide identifiers: version, hook and nonce prefixes, form field
//! names, and the default strings shown to readers.
//!
//! Every other module refers to these instead of spelling the literals out,
//! so the wire names of the completion form live in exactly one place.

/// Version string used for cache-busting asset URLs.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prefix for every extensibility hook name.
pub const HOOK_PREFIX: &str = "dppress_";

/// Prefix for nonce field and action names.
pub const NONCE_PREFIX: &str = "dppress_nonce_";

// ---------------------------------------------------------------------------
// Completion form
// ---------------------------------------------------------------------------

/// Name of the submit button on the completion form.
pub const FIELD_PROMPT_BUTTON: &str = "dppress-prompt-button";

/// Hidden field carrying the post being completed.
pub const FIELD_PROMPT_POST_ID: &str = "dppress-prompt-post-id";

/// Hidden field carrying the user completing the post.
pub const FIELD_PROMPT_USER_ID: &str = "dppress-prompt-user-id";

/// Hidden field carrying the anti-forgery nonce.
pub const FIELD_NONCE: &str = "dppress_nonce_status_name";

/// Action name the completion nonce is bound to.
pub const NONCE_ACTION_STATUS: &str = "dppress_nonce_status_action";

/// The only button value that triggers a completion write.
pub const BUTTON_VALUE_COMPLETE: &str = "complete";

// ---------------------------------------------------------------------------
// Shortcode
// ---------------------------------------------------------------------------

/// Tag name of the completion shortcode.
pub const SHORTCODE_DRIP_COMPLETE: &str = "drip-complete";

/// Button label used when the shortcode has no `label` attribute.
pub const DEFAULT_COMPLETE_LABEL: &str = "Mark Completed";

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Message shown in place of gated content when no better one exists.
pub const DEFAULT_PENDING_MESSAGE: &str = "This content is not available.";

/// Fatal message returned when the completion nonce does not verify.
pub const NONCE_FAILED_MESSAGE: &str = "Nonce failed. Why?";

// ---------------------------------------------------------------------------
// Hook names
// ---------------------------------------------------------------------------

/// Action fired while the plugin is being deactivated.
pub const HOOK_DEACTIVATE_PROCESS: &str = "dppress_deactivate_process";

/// Filter applied to the formatted pending message.
pub const HOOK_PENDING_MESSAGE_FORMAT: &str = "dppress_drip_pending_message_format";

/// Build a hook name from the plugin prefix.
pub fn hook_name(suffix: &str) -> String {
    format!("{HOOK_PREFIX}{suffix}")
}

/// Build a nonce field or action name from the nonce prefix.
pub fn nonce_name(suffix: &str) -> String {
    format!("{NONCE_PREFIX}{suffix}")
}
