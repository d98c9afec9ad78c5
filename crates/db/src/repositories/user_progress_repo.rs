//! Repository for the `user_progress` table.

use drippress_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user_progress::UserProgress;

const COLUMNS: &str = "id, user_id, post_id, completed_at, created_at, updated_at";

/// Reads and writes per-(user, post) completion flags.
pub struct UserProgressRepo;

impl UserProgressRepo {
    /// When `user_id` completed `post_id`, if they have.
    pub async fn find_completed_at(
        pool: &PgPool,
        user_id: DbId,
        post_id: DbId,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        sqlx::query_scalar::<_, Timestamp>(
            "SELECT completed_at FROM user_progress WHERE user_id = $1 AND post_id = $2",
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_optional(pool)
        .await
    }

    /// Mark `post_id` completed for `user_id`. A repeat submission overwrites
    /// the completion time; the last write wins.
    pub async fn mark_completed(
        pool: &PgPool,
        user_id: DbId,
        post_id: DbId,
    ) -> Result<UserProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_progress (user_id, post_id, completed_at) \
             VALUES ($1, $2, NOW()) \
             ON CONFLICT ON CONSTRAINT uq_user_progress_user_post DO UPDATE SET \
                completed_at = EXCLUDED.completed_at \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserProgress>(&query)
            .bind(user_id)
            .bind(post_id)
            .fetch_one(pool)
            .await
    }

    /// All completion records of a user, most recent first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_progress WHERE user_id = $1 \
             ORDER BY completed_at DESC, id DESC"
        );
        sqlx::query_as::<_, UserProgress>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
