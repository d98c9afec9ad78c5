//! Shortcode expansion and the `[drip-complete]` renderer.
//!
//! Post bodies may contain `[drip-complete label="..."]`. At render time
//! each occurrence is replaced by either the reader's completion message or
//! the "mark completed" button.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::formatting::{completed_message_block, get_shortcode_completed_button};
use crate::plugin::DEFAULT_COMPLETE_LABEL;
use crate::progress::get_completed_message;
use crate::types::{DbId, Timestamp};

/// Regex pattern matching one opening shortcode tag.
///
/// Groups: 1 escape bracket, 2 tag name, 3 attribute text, 4 self-closing
/// slash, 5 trailing escape bracket. The name must be followed by
/// whitespace, `/` or `]`, so `[drip-completed]` never matches as
/// `drip-complete`.
pub const SHORTCODE_PATTERN: &str = r"\[(\[?)([\w-]+)(\s[^\]]*?)?(/)?\](\]?)";

/// Regex pattern matching one attribute: `name="v"`, `name='v'`, `name=v`,
/// or a double-quoted, single-quoted or bare positional value.
pub const ATTRIBUTE_PATTERN: &str = r#"([\w-]+)\s*=\s*"([^"]*)"(?:\s|$)|([\w-]+)\s*=\s*'([^']*)'(?:\s|$)|([\w-]+)\s*=\s*([^\s'"]+)(?:\s|$)|"([^"]*)"(?:\s|$)|'([^']*)'(?:\s|$)|(\S+)(?:\s|$)"#;

static SHORTCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SHORTCODE_PATTERN).expect("valid regex"));

static ATTRIBUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ATTRIBUTE_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Attribute parsing
// ---------------------------------------------------------------------------

/// Attributes of one shortcode occurrence. Names are lowercased; positional
/// values are keyed by their index (`"0"`, `"1"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcodeAttrs(BTreeMap<String, String>);

impl ShortcodeAttrs {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parse the attribute text between the tag name and the closing bracket.
///
/// Accepts `name="v"`, `name='v'`, `name=v` and bare positional values.
pub fn parse_attributes(text: &str) -> ShortcodeAttrs {
    let mut attrs = BTreeMap::new();
    let mut positional = 0usize;

    for caps in ATTRIBUTE_RE.captures_iter(text) {
        let named = [(1, 2), (3, 4), (5, 6)]
            .into_iter()
            .find_map(|(n, v)| Some((caps.get(n)?, caps.get(v)?)));

        if let Some((name, value)) = named {
            attrs.insert(name.as_str().to_lowercase(), value.as_str().to_string());
        } else if let Some(value) = [7, 8, 9].into_iter().find_map(|i| caps.get(i)) {
            attrs.insert(positional.to_string(), value.as_str().to_string());
            positional += 1;
        }
    }

    ShortcodeAttrs(attrs)
}

// ---------------------------------------------------------------------------
// Expansion
// ---------------------------------------------------------------------------

/// Replace every `[tag ...]` (or `[tag ...]inner[/tag]`) in `content` with
/// the output of `render`. `[[tag]]` is an escape and renders as `[tag]`.
pub fn expand_shortcodes<F>(content: &str, tag: &str, mut render: F) -> String
where
    F: FnMut(&ShortcodeAttrs, Option<&str>) -> String,
{
    let closing = format!("[/{tag}]");
    let mut out = String::with_capacity(content.len());
    let mut copied = 0;
    let mut pos = 0;

    while let Some(caps) = SHORTCODE_RE.captures_at(content, pos) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(2)) else {
            break;
        };

        // A foreign tag may still enclose ours; resume one byte later.
        if name.as_str() != tag {
            pos = whole.start() + 1;
            continue;
        }

        out.push_str(&content[copied..whole.start()]);
        let (open, trail) = (group(&caps, 1), group(&caps, 5));
        let mut end = whole.end();

        if !open.is_empty() && !trail.is_empty() {
            out.push_str(&whole.as_str()[1..whole.len() - 1]);
        } else {
            let attrs = parse_attributes(group(&caps, 3));
            let mut inner = None;
            if caps.get(4).is_none() {
                if let Some(offset) = content[end..].find(&closing) {
                    inner = Some(&content[end..end + offset]);
                    end += offset + closing.len();
                }
            }
            out.push_str(open);
            out.push_str(&render(&attrs, inner));
            out.push_str(trail);
        }

        copied = end;
        pos = end;
    }

    out.push_str(&content[copied..]);
    out
}

fn group<'h>(caps: &Captures<'h>, index: usize) -> &'h str {
    caps.get(index).map_or("", |m| m.as_str())
}

// ---------------------------------------------------------------------------
// [drip-complete]
// ---------------------------------------------------------------------------

/// Typed attributes of the completion shortcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteShortcodeArgs {
    pub label: String,
}

impl CompleteShortcodeArgs {
    /// Pick out the known attributes, falling back to defaults. A blank
    /// label is treated as missing.
    pub fn from_attrs(attrs: &ShortcodeAttrs) -> Self {
        let label = attrs
            .get("label")
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_COMPLETE_LABEL)
            .to_string();
        Self { label }
    }
}

/// Per-render state the completion shortcode depends on.
#[derive(Debug, Clone, Copy)]
pub struct CompletionView<'a> {
    /// The logged-in reader, if any.
    pub viewer_id: Option<DbId>,
    pub post_id: DbId,
    /// When the reader completed the post, if they have.
    pub completed_at: Option<Timestamp>,
    /// Nonce to embed in the button form.
    pub nonce: &'a str,
}

/// Render one `[drip-complete]` occurrence.
///
/// Anonymous readers get nothing; readers who completed the post get the
/// completion message; everyone else gets the button.
pub fn shortcode_completed(view: &CompletionView<'_>, args: &CompleteShortcodeArgs) -> String {
    let Some(viewer_id) = view.viewer_id else {
        return String::new();
    };

    if let Some(completed_at) = view.completed_at {
        return completed_message_block(&get_completed_message(completed_at));
    }

    get_shortcode_completed_button(view.post_id, viewer_id, &args.label, view.nonce)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::SHORTCODE_DRIP_COMPLETE;
    use chrono::TimeZone;

    #[test]
    fn parses_quoted_and_bare_attributes() {
        let attrs = parse_attributes(r#"label="Done it" Class='x y' size=3 extra"#);
        assert_eq!(attrs.get("label"), Some("Done it"));
        assert_eq!(attrs.get("class"), Some("x y"));
        assert_eq!(attrs.get("size"), Some("3"));
        assert_eq!(attrs.get("0"), Some("extra"));
        assert_eq!(attrs.len(), 4);
    }

    #[test]
    fn parses_empty_attribute_text() {
        assert!(parse_attributes("   ").is_empty());
    }

    #[test]
    fn label_defaults_when_missing_or_blank() {
        assert_eq!(
            CompleteShortcodeArgs::from_attrs(&parse_attributes("")).label,
            "Mark Completed"
        );
        assert_eq!(
            CompleteShortcodeArgs::from_attrs(&parse_attributes(r#"label="  ""#)).label,
            "Mark Completed"
        );
        assert_eq!(
            CompleteShortcodeArgs::from_attrs(&parse_attributes(r#"label="Finished""#)).label,
            "Finished"
        );
    }

    #[test]
    fn expands_every_occurrence() {
        let out = expand_shortcodes(
            r#"a [drip-complete] b [drip-complete label="X"/] c"#,
            SHORTCODE_DRIP_COMPLETE,
            |attrs, _| format!("<{}>", attrs.get("label").unwrap_or("-")),
        );
        assert_eq!(out, "a <-> b <X> c");
    }

    #[test]
    fn enclosing_form_consumes_inner_content() {
        let out = expand_shortcodes(
            "x [drip-complete]ignored[/drip-complete] y",
            SHORTCODE_DRIP_COMPLETE,
            |_, inner| format!("({})", inner.unwrap_or("")),
        );
        assert_eq!(out, "x (ignored) y");
    }

    #[test]
    fn leaves_other_tags_and_escapes_alone() {
        let out = expand_shortcodes(
            "[drip-completed] [[drip-complete]] [drip-complete",
            SHORTCODE_DRIP_COMPLETE,
            |_, _| "R".to_string(),
        );
        assert_eq!(out, "[drip-completed] [drip-complete] [drip-complete");
    }

    #[test]
    fn self_closing_slash_may_follow_whitespace() {
        let out = expand_shortcodes(
            "[drip-complete label='Done' /] [drip-complete/]",
            SHORTCODE_DRIP_COMPLETE,
            |attrs, inner| format!("<{}:{}>", attrs.get("label").unwrap_or("-"), inner.is_some()),
        );
        assert_eq!(out, "<Done:false> <-:false>");
    }

    #[test]
    fn expands_inside_a_foreign_bracketed_tag() {
        let out = expand_shortcodes(
            "[note see [drip-complete]] after",
            SHORTCODE_DRIP_COMPLETE,
            |_, _| "R".to_string(),
        );
        assert_eq!(out, "[note see R] after");
    }

    #[test]
    fn attribute_values_may_contain_slashes() {
        let out = expand_shortcodes(
            "[drip-complete label=a/b]",
            SHORTCODE_DRIP_COMPLETE,
            |attrs, _| attrs.get("label").unwrap_or("-").to_string(),
        );
        assert_eq!(out, "a/b");
    }

    #[test]
    fn positional_values_keep_their_order() {
        let attrs = parse_attributes(r#""first one" 'second' third"#);
        assert_eq!(attrs.get("0"), Some("first one"));
        assert_eq!(attrs.get("1"), Some("second"));
        assert_eq!(attrs.get("2"), Some("third"));
    }

    fn view(viewer_id: Option<DbId>, completed_at: Option<Timestamp>) -> CompletionView<'static> {
        CompletionView {
            viewer_id,
            post_id: 42,
            completed_at,
            nonce: "0123456789",
        }
    }

    fn args() -> CompleteShortcodeArgs {
        CompleteShortcodeArgs {
            label: DEFAULT_COMPLETE_LABEL.to_string(),
        }
    }

    #[test]
    fn anonymous_reader_gets_nothing() {
        assert_eq!(shortcode_completed(&view(None, None), &args()), "");
    }

    #[test]
    fn completed_reader_gets_message_not_button() {
        let at = chrono::Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap();
        let html = shortcode_completed(&view(Some(7), Some(at)), &args());
        assert!(html.starts_with("<p class=\"dppress-message dppress-message-completed\">"));
        assert!(html.contains("You completed this on March 5, 2026."));
        assert!(!html.contains("<button"));
    }

    #[test]
    fn pending_reader_gets_button_bound_to_post_and_viewer() {
        let html = shortcode_completed(&view(Some(7), None), &args());
        assert!(html.contains(r#"name="dppress-prompt-post-id" value="42""#));
        assert!(html.contains(r#"name="dppress-prompt-user-id" value="7""#));
        assert!(html.contains(">Mark Completed</button>"));
    }
}
