//! Reducers
//!
//! One pure reducer per slice plus the root reducer that routes to them.

pub mod app_reducer;
pub mod auth_reducer;
pub mod notifications_reducer;
pub mod posts_reducer;
pub mod social_reducer;
pub mod stories_reducer;

pub use app_reducer::reduce;
