//! Domain logic for the DripPress content-gating service.
//!
//! Everything in this crate is pure: it never touches the database or the
//! network, so the API layer, the repositories and the tests can all share
//! the same rules.

pub mod assets;
pub mod drip;
pub mod error;
pub mod formatting;
pub mod gate;
pub mod hooks;
pub mod nonce;
pub mod plugin;
pub mod post_types;
pub mod progress;
pub mod query;
pub mod roles;
pub mod shortcode;
pub mod submission;
pub mod types;
