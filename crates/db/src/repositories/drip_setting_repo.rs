//! Repository for the `post_drip_settings` table.

use drippress_core::types::DbId;
use sqlx::PgPool;

use crate::models::drip_setting::{PostDripSetting, UpsertDripSetting};

const COLUMNS: &str = "post_id, drip_count, drip_interval, created_at, updated_at";

/// Provides read/write access to per-post drip delays.
pub struct DripSettingRepo;

impl DripSettingRepo {
    /// Find the drip setting of a post, if it has one.
    pub async fn find_for_post(
        pool: &PgPool,
        post_id: DbId,
    ) -> Result<Option<PostDripSetting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM post_drip_settings WHERE post_id = $1");
        sqlx::query_as::<_, PostDripSetting>(&query)
            .bind(post_id)
            .fetch_optional(pool)
            .await
    }

    /// Create or replace the drip setting of a post.
    pub async fn upsert(
        pool: &PgPool,
        post_id: DbId,
        input: &UpsertDripSetting,
    ) -> Result<PostDripSetting, sqlx::Error> {
        let query = format!(
            "INSERT INTO post_drip_settings (post_id, drip_count, drip_interval) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (post_id) DO UPDATE SET \
                drip_count = EXCLUDED.drip_count, \
                drip_interval = EXCLUDED.drip_interval \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PostDripSetting>(&query)
            .bind(post_id)
            .bind(input.drip_count)
            .bind(input.drip_interval.as_str())
            .fetch_one(pool)
            .await
    }

    /// Remove the drip setting of a post. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, post_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM post_drip_settings WHERE post_id = $1")
            .bind(post_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
