//! DripPress event bus and event log.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`DripEvent`] -- the event envelope (completion recorded, drip settings
//!   changed, plugin deactivated).
//! - [`EventPersistence`] -- background service that writes every event to
//!   the `events` table.

pub mod bus;
pub mod persistence;

pub use bus::{DripEvent, EventBus};
pub use persistence::{EventPersistence, PersistenceSummary};
