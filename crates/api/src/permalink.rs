//! Public URL lookups for posts.
//!
//! Building a permalink needs the post's slug, so resolved URLs are kept in
//! memory. Deactivation flushes the whole cache.

use std::collections::HashMap;

use drippress_core::types::DbId;
use drippress_db::repositories::PostRepo;
use sqlx::PgPool;
use tokio::sync::RwLock;

/// Public URL of the post with `slug`.
pub fn permalink_for(site_url: &str, slug: &str) -> String {
    format!("{}/read/{slug}", site_url.trim_end_matches('/'))
}

/// Where readers go when a post has no permalink.
pub fn site_root(site_url: &str) -> String {
    format!("{}/", site_url.trim_end_matches('/'))
}

/// In-memory post id to permalink cache.
#[derive(Debug, Default)]
pub struct PermalinkCache {
    entries: RwLock<HashMap<DbId, String>>,
}

impl PermalinkCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the permalink of `post_id`, or `None` when the post does not
    /// exist.
    pub async fn permalink(
        &self,
        pool: &PgPool,
        site_url: &str,
        post_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        if let Some(url) = self.entries.read().await.get(&post_id) {
            return Ok(Some(url.clone()));
        }

        let Some(slug) = PostRepo::find_slug(pool, post_id).await? else {
            return Ok(None);
        };

        let url = permalink_for(site_url, &slug);
        self.entries.write().await.insert(post_id, url.clone());
        Ok(Some(url))
    }

    /// Seed an entry without a database lookup.
    pub async fn remember(&self, post_id: DbId, url: String) {
        self.entries.write().await.insert(post_id, url);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every cached URL. Returns how many entries were removed.
    pub async fn flush(&self) -> usize {
        let mut entries = self.entries.write().await;
        let removed = entries.len();
        entries.clear();
        removed
    }
}
