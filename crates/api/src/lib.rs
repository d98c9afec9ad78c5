//! DripPress API server library.
//!
//! Exposes the building blocks (config, state, error handling, extractors,
//! page rendering, routes) so integration tests and the binary entrypoint
//! can both access them.

pub mod auth;
pub mod config;
pub mod deactivate;
pub mod error;
pub mod handlers;
pub mod hooks;
pub mod middleware;
pub mod permalink;
pub mod render;
pub mod response;
pub mod routes;
pub mod state;
