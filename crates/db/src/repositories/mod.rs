//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod drip_setting_repo;
pub mod event_repo;
pub mod post_repo;
pub mod user_progress_repo;
pub mod user_repo;

pub use drip_setting_repo::DripSettingRepo;
pub use event_repo::EventRepo;
pub use post_repo::PostRepo;
pub use user_progress_repo::UserProgressRepo;
pub use user_repo::UserRepo;
