//! Built-in hook registrations.

use drippress_core::hooks::{HookRegistry, DEFAULT_PRIORITY};
use drippress_core::plugin::HOOK_DEACTIVATE_PROCESS;

/// Build the registry the server starts with.
///
/// Only a logging listener is registered on deactivation; extensions add
/// their own callbacks before the registry is frozen into `AppState`.
pub fn default_hooks() -> HookRegistry {
    let mut hooks = HookRegistry::new();
    hooks.add_action(HOOK_DEACTIVATE_PROCESS, DEFAULT_PRIORITY, || {
        tracing::info!("Deactivation listeners running");
    });
    hooks
}
