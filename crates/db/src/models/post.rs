//! Post entity model and DTOs.

use drippress_core::post_types;
use drippress_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub post_type: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Post {
    pub fn is_published(&self) -> bool {
        post_types::is_published(&self.status)
    }
}

/// Listing view of a post (no body).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostSummary {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub post_type: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new post.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePost {
    pub slug: String,
    pub title: String,
    pub content: Option<String>,
    pub post_type: Option<String>,
    pub status: Option<String>,
}
