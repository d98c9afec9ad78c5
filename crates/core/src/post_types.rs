//! Post type and status rules for drip gating.

/// Status a post must have before any gating applies.
pub const STATUS_PUBLISH: &str = "publish";

/// Post type supported when nothing else is configured.
pub const DEFAULT_SUPPORTED_TYPE: &str = "post";

/// Check whether `post_type` is one of the configured drip-enabled types.
///
/// An empty type is never supported, even if the configured list happens
/// to contain an empty entry.
pub fn confirm_supported_type(post_type: &str, supported: &[String]) -> bool {
    !post_type.is_empty() && supported.iter().any(|t| t == post_type)
}

/// Parse a comma-separated list of post types, dropping blanks and
/// duplicates while keeping the first-seen order.
pub fn parse_supported_types(raw: &str) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for t in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !types.iter().any(|existing| existing == t) {
            types.push(t.to_string());
        }
    }
    types
}

/// Whether a post status counts as published.
pub fn is_published(status: &str) -> bool {
    status == STATUS_PUBLISH
}
