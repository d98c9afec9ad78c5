//! Per-reader completion state for a post.

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// Display format for completion dates, e.g. `March 5, 2026`.
pub const COMPLETED_DATE_FORMAT: &str = "%B %-d, %Y";

/// A reader's completion status for one post, as reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentStatus {
    pub post_id: DbId,
    pub completed: bool,
    pub completed_at: Option<Timestamp>,
}

impl ContentStatus {
    pub fn new(post_id: DbId, completed_at: Option<Timestamp>) -> Self {
        Self {
            post_id,
            completed: completed_at.is_some(),
            completed_at,
        }
    }
}

/// Message shown to a reader who has already completed a post.
pub fn get_completed_message(completed_at: Timestamp) -> String {
    format!(
        "You completed this on {}.",
        completed_at.format(COMPLETED_DATE_FORMAT)
    )
}
