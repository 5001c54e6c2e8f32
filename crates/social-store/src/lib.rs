//! Client-side state core for the social-feed app
//!
//! One [`Store`] holds the [`AppState`] (posts, notifications, auth,
//! stories and social graph slices). Everything that changes state goes through
//! [`Store::dispatch`]:
//!
//! ```text
//! UI / thunk / realtime worker
//!          │ Action
//!          ▼
//!   middleware chain ──(consumed)──▶ dropped
//!          │
//!          ▼
//!   root reducer ──▶ new AppState ──▶ listeners
//! ```
//!
//! Async work lives in [`thunks`]; speculative writes and their rollback in
//! [`optimistic`]; feed paging in [`pagination`]; push notifications in
//! [`realtime`].

pub mod actions;
pub mod domain_models;
pub mod error;
pub mod list_ops;
pub mod logger;
pub mod middleware;
pub mod optimistic;
pub mod pagination;
pub mod realtime;
pub mod reducers;
pub mod state;
pub mod store;
pub mod thunks;
pub mod validation;

#[cfg(test)]
mod testing;

pub use actions::{Action, RawActionError};
pub use error::{ChannelError, ThunkError, ValidationErrors};
pub use state::AppState;
pub use store::{Store, Subscription};
