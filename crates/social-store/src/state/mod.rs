//! Application state
//!
//! One field per slice. The store hands out immutable snapshots of this
//! struct; it is only ever replaced, never edited in place.

mod auth;
mod notifications;
mod posts;
mod social;
mod stories;

pub use auth::AuthState;
pub use notifications::NotificationsState;
pub use posts::PostsState;
pub use social::SocialState;
pub use stories::StoriesState;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub posts: PostsState,
    pub notifications: NotificationsState,
    pub auth: AuthState,
    pub stories: StoriesState,
    pub social: SocialState,
}
