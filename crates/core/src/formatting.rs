//! HTML output helpers: escaping, paragraph formatting, and the markup of
//! the completion button and completion message.

use crate::plugin::{
    BUTTON_VALUE_COMPLETE, FIELD_NONCE, FIELD_PROMPT_BUTTON, FIELD_PROMPT_POST_ID,
    FIELD_PROMPT_USER_ID,
};
use crate::types::DbId;

/// Class list of the block that replaces the button once a post is completed.
pub const COMPLETED_MESSAGE_CLASS: &str = "dppress-message dppress-message-completed";

// ---------------------------------------------------------------------------
// Escaping
// ---------------------------------------------------------------------------

/// Escape text for inclusion in HTML element content.
pub fn esc_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Escape text for inclusion in a double-quoted HTML attribute.
pub fn esc_attr(text: &str) -> String {
    esc_html(text)
}

/// Strip characters that have no business in a `Location` header.
pub fn sanitize_redirect_url(url: &str) -> String {
    url.chars()
        .filter(|c| !c.is_control() && !c.is_whitespace())
        .collect()
}

// ---------------------------------------------------------------------------
// Paragraphs
// ---------------------------------------------------------------------------

/// Wrap blank-line separated blocks in `<p>` tags, turning single newlines
/// inside a block into `<br />`.
///
/// Returns an empty string for whitespace-only input.
pub fn autop(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut out = String::new();
    for block in normalized.split("\n\n") {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }
        let lines: Vec<&str> = block.lines().map(str::trim).collect();
        out.push_str("<p>");
        out.push_str(&lines.join("<br />\n"));
        out.push_str("</p>\n");
    }
    out
}

// ---------------------------------------------------------------------------
// Completion markup
// ---------------------------------------------------------------------------

/// Render the "mark completed" form for `post_id` on behalf of `user_id`.
///
/// The form posts back to the page it is rendered on.
pub fn get_shortcode_completed_button(
    post_id: DbId,
    user_id: DbId,
    label: &str,
    nonce: &str,
) -> String {
    format!(
        concat!(
            "<div class=\"dppress-prompt-wrap\">",
            "<form class=\"dppress-prompt-form\" method=\"post\">",
            "<input type=\"hidden\" name=\"{nonce_field}\" value=\"{nonce}\" />",
            "<input type=\"hidden\" name=\"{post_field}\" value=\"{post_id}\" />",
            "<input type=\"hidden\" name=\"{user_field}\" value=\"{user_id}\" />",
            "<button type=\"submit\" class=\"dppress-prompt-button\" name=\"{button_field}\" value=\"{button_value}\">{label}</button>",
            "</form>",
            "</div>"
        ),
        nonce_field = FIELD_NONCE,
        nonce = esc_attr(nonce),
        post_field = FIELD_PROMPT_POST_ID,
        post_id = post_id,
        user_field = FIELD_PROMPT_USER_ID,
        user_id = user_id,
        button_field = FIELD_PROMPT_BUTTON,
        button_value = BUTTON_VALUE_COMPLETE,
        label = esc_html(label),
    )
}

/// Wrap an already formatted completion message in its status block.
pub fn completed_message_block(message: &str) -> String {
    format!(
        "<p class=\"{COMPLETED_MESSAGE_CLASS}\">{}</p>",
        esc_html(message)
    )
}
