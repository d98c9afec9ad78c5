//! Plugin deactivation.
//!
//! Deactivating notifies listeners and drops cached URLs. Stored drip
//! settings and completion records are left in place.

use drippress_core::plugin::HOOK_DEACTIVATE_PROCESS;
use drippress_core::types::DbId;
use drippress_events::bus::{DripEvent, EVENT_PLUGIN_DEACTIVATED};
use serde::Serialize;

use crate::state::AppState;

/// What a deactivation run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeactivationReport {
    /// Number of `dppress_deactivate_process` listeners invoked.
    pub listeners_run: usize,
    /// Number of cached permalinks dropped.
    pub permalinks_flushed: usize,
}

/// Run the deactivation listeners, announce the deactivation, then flush the
/// permalink cache.
pub async fn deactivate(state: &AppState, actor: Option<DbId>) -> DeactivationReport {
    let listeners_run = state.hooks.do_action(HOOK_DEACTIVATE_PROCESS);

    let mut event = DripEvent::new(EVENT_PLUGIN_DEACTIVATED)
        .with_payload(serde_json::json!({ "listeners_run": listeners_run }));
    if let Some(user_id) = actor {
        event = event.with_actor(user_id);
    }
    state.event_bus.publish(event);

    let permalinks_flushed = state.permalinks.flush().await;

    tracing::info!(
        listeners_run,
        permalinks_flushed,
        actor_user_id = ?actor,
        "Plugin deactivated",
    );

    DeactivationReport {
        listeners_run,
        permalinks_flushed,
    }
}
