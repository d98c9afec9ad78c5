use std::sync::Arc;

use drippress_core::hooks::HookRegistry;
use drippress_core::nonce::NonceSigner;

use crate::config::ServerConfig;
use crate::permalink::PermalinkCache;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: drippress_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Centralized event bus for publishing drip and progress events.
    pub event_bus: Arc<drippress_events::EventBus>,
    /// Filters and actions registered at startup. Read-only once serving.
    pub hooks: Arc<HookRegistry>,
    /// Signs and checks completion-form nonces.
    pub nonces: Arc<NonceSigner>,
    /// Post id to public URL lookups.
    pub permalinks: Arc<PermalinkCache>,
}
