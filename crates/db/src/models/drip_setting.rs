//! Per-post drip delay model and DTOs.

use drippress_core::drip::{DripInterval, DripSetting};
use drippress_core::error::CoreError;
use drippress_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `post_drip_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostDripSetting {
    pub post_id: DbId,
    pub drip_count: i32,
    pub drip_interval: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PostDripSetting {
    /// Convert the stored row into the domain setting.
    pub fn to_setting(&self) -> Result<DripSetting, CoreError> {
        Ok(DripSetting {
            count: self.drip_count,
            interval: DripInterval::parse(&self.drip_interval)?,
        })
    }
}

/// DTO for setting (creating or replacing) a post's drip delay.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertDripSetting {
    pub drip_count: i32,
    pub drip_interval: DripInterval,
}
