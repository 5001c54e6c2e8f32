//! Async action creators
//!
//! Each creator returns a thunk: a closure taking a [`Store`] handle and
//! returning a boxed future. Run one with [`Store::thunk`]:
//!
//! ```rust,ignore
//! let state = store.thunk(toggle_reaction(api.clone(), post_id, ReactionKind::Like)).await?;
//! ```
//!
//! Thunks validate input first, then orchestrate the network collaborator
//! and dispatch plain actions. Every failure sets the addressed slice's
//! `error` before the thunk returns `Err`.

pub mod auth;
pub mod notifications;
pub mod posts;
pub mod stories;

pub use auth::{load_current_user, login, logout, signup};
pub use notifications::{
    delete_notification, fetch_notifications, mark_all_notifications_read, mark_notification_read,
};
pub use posts::{
    add_comment, block_user, create_post, delete_post, edit_post, fetch_feed, fetch_post,
    load_more, refresh_feed, toggle_reaction, unblock_user,
};
pub use stories::{create_story, delete_story, fetch_stories};

use crate::error::ThunkError;
use crate::store::Store;
use serde::de::DeserializeOwned;
use serde_json::Value;
use social_api::ApiClient;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// BoxFuture type alias for thunk futures
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub type ThunkResult<T> = Result<T, ThunkError>;

/// Shared network collaborator handed to every thunk
pub type SharedApi = Arc<dyn ApiClient>;

/// Decode `value[key]` when the payload wraps the entity, else `value` itself
pub(crate) fn decode_field<T: DeserializeOwned>(mut value: Value, key: &str) -> ThunkResult<T> {
    let inner = if value.get(key).is_some() {
        value[key].take()
    } else {
        value
    };
    Ok(serde_json::from_value(inner)?)
}

/// Like [`decode_field`], but a single-row array yields its first row
pub(crate) fn decode_row<T: DeserializeOwned>(value: Value, key: &str) -> ThunkResult<T> {
    match value {
        Value::Array(mut rows) if !rows.is_empty() => Ok(serde_json::from_value(rows.remove(0))?),
        Value::Array(_) => Err(ThunkError::Decode("empty result".to_string())),
        other => decode_field(other, key),
    }
}

/// Run `f` as a thunk bound to `store`
pub(crate) fn boxed<T, F, Fut>(f: F) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<T>>
where
    F: FnOnce(Store) -> Fut + Send + 'static,
    Fut: Future<Output = ThunkResult<T>> + Send + 'static,
{
    move |store| Box::pin(f(store))
}
