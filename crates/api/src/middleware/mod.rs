//! Request extractors for identity, authorization and request context.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`auth::Viewer`] -- The reader if a valid token is present, anonymous otherwise.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`context::SubmissionContext`] -- Which request contexts skip form handling.

pub mod auth;
pub mod context;
pub mod rbac;
