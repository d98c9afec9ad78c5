//! Repository for the `posts` table.

use drippress_core::types::DbId;
use sqlx::PgPool;

use crate::models::post::{CreatePost, Post, PostSummary};

const COLUMNS: &str = "id, slug, title, content, post_type, status, created_at, updated_at";

const SUMMARY_COLUMNS: &str = "id, slug, title, post_type, created_at";

/// Provides CRUD operations for posts.
pub struct PostRepo;

impl PostRepo {
    /// Insert a new post, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePost) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO posts (slug, title, content, post_type, status) \
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, 'post'), COALESCE($5, 'draft')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.post_type)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a post by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a post by its URL slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE slug = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Look up only the slug of a post, for building permalinks.
    pub async fn find_slug(pool: &PgPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT slug FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List published posts, newest first, optionally restricted to a type.
    pub async fn list_published(
        pool: &PgPool,
        post_type: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM posts \
             WHERE status = 'publish' AND ($1::TEXT IS NULL OR post_type = $1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, PostSummary>(&query)
            .bind(post_type)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
