//! Role name constants matching the `role` claim of access tokens.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUBSCRIBER: &str = "subscriber";
