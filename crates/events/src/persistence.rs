//! Writes the event log.
//!
//! [`EventPersistence::run`] drains an [`EventBus`](crate::bus::EventBus)
//! subscription into the `events` table until the bus is dropped, then
//! reports what it wrote as a [`PersistenceSummary`].

use drippress_core::types::DbId;
use drippress_db::repositories::EventRepo;
use drippress_db::DbPool;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::bus::DripEvent;

/// Counts reported when the persistence loop stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PersistenceSummary {
    /// Rows written to `events`.
    pub persisted: u64,
    /// Inserts that failed and were dropped.
    pub failed: u64,
    /// Events the receiver lagged past and never saw.
    pub missed: u64,
}

/// Background service that persists events to the database.
pub struct EventPersistence;

impl EventPersistence {
    /// Run the persistence loop until the channel closes.
    pub async fn run(
        pool: DbPool,
        mut receiver: broadcast::Receiver<DripEvent>,
    ) -> PersistenceSummary {
        let mut summary = PersistenceSummary::default();

        loop {
            match receiver.recv().await {
                Ok(event) => match Self::persist(&pool, &event).await {
                    Ok(id) => {
                        summary.persisted += 1;
                        tracing::debug!(
                            event_id = id,
                            event_type = %event.event_type,
                            post_id = ?event.source_entity_id,
                            actor_user_id = ?event.actor_user_id,
                            "Event logged",
                        );
                    }
                    Err(e) => {
                        summary.failed += 1;
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            post_id = ?event.source_entity_id,
                            "Failed to persist event",
                        );
                    }
                },
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    summary.missed += n;
                    tracing::warn!(missed = n, "Event log fell behind the bus");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }

        tracing::info!(
            persisted = summary.persisted,
            failed = summary.failed,
            missed = summary.missed,
            "Event bus closed, event log stopped",
        );
        summary
    }

    /// Write a single event to the `events` table.
    pub async fn persist(pool: &DbPool, event: &DripEvent) -> Result<DbId, sqlx::Error> {
        EventRepo::insert(
            pool,
            &event.event_type,
            event.source_entity_type.as_deref(),
            event.source_entity_id,
            event.actor_user_id,
            &event.payload,
        )
        .await
    }
}
