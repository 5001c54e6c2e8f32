//! Cursor pagination for the post feeds
//!
//! A fetch without a cursor is a fresh load that replaces the list; a fetch
//! with a cursor appends. Appends are serialized per feed: one is ignored
//! while the feed is loading, when `has_more` is false, or when the cursor
//! is not the feed's current one. A response that arrives after the feed
//! switched or its cursor moved is discarded.
//!
//! A fresh load leaves the current list on screen until its page lands, so
//! a failed switch keeps the previous feed. When two fresh loads overlap,
//! the one started last wins.

use crate::actions::{Action, PostsAction};
use crate::domain_models::{FeedKind, Post};
use crate::error::ThunkError;
use crate::store::Store;
use serde::Deserialize;
use serde_json::Value;
use social_api::{ApiClient, Method};

/// One page as returned by the feed endpoints
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page {
    pub posts: Vec<Post>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl Page {
    /// Accepts `{posts, next_cursor, has_more}` or a bare post array
    pub fn from_value(value: Value) -> Result<Self, ThunkError> {
        if value.is_array() {
            let posts: Vec<Post> = serde_json::from_value(value)?;
            return Ok(Page {
                posts,
                next_cursor: None,
                has_more: false,
            });
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Fetch one page of `feed` and merge it into the posts slice
///
/// Returns `Ok(None)` when the request was gated or its response discarded
/// as stale.
pub async fn fetch_page(
    store: &Store,
    api: &dyn ApiClient,
    feed: FeedKind,
    cursor: Option<String>,
    limit: usize,
) -> Result<Option<Page>, ThunkError> {
    let appending = cursor.is_some();

    if appending {
        let state = store.get_state();
        let posts = &state.posts;
        if posts.feed != feed || !posts.has_more || posts.loading || posts.cursor != cursor {
            log::debug!(
                "Ignoring load more on {} (has_more={}, loading={})",
                feed,
                posts.has_more,
                posts.loading
            );
            return Ok(None);
        }
        store.dispatch(Action::Posts(PostsAction::SetLoading(true)));
    } else {
        store.dispatch(Action::Posts(PostsAction::BeginFeedLoad(feed.clone())));
    }

    let path = feed.page_path(limit, cursor.as_deref());
    let result = match api.request(Method::Get, &path, None).await {
        Ok(value) => Page::from_value(value),
        Err(err) => Err(err.into()),
    };

    {
        let state = store.get_state();
        let stale = if appending {
            state.posts.feed != feed || state.posts.cursor != cursor
        } else {
            state.posts.pending_feed.as_ref() != Some(&feed)
        };
        if stale {
            log::debug!("Discarding stale page of {} at cursor {:?}", feed, cursor);
            return Ok(None);
        }
    }

    match result {
        Ok(page) => {
            log::debug!(
                "Loaded {} posts for {} (has_more={})",
                page.posts.len(),
                feed,
                page.has_more
            );
            if appending {
                store.dispatch(Action::Posts(PostsAction::AppendPosts(page.posts.clone())));
            } else {
                store.dispatch(Action::Posts(PostsAction::SetFeed(feed.clone())));
                store.dispatch(Action::Posts(PostsAction::SetPosts(page.posts.clone())));
            }
            store.dispatch(Action::Posts(PostsAction::SetCursor(page.next_cursor.clone())));
            store.dispatch(Action::Posts(PostsAction::SetHasMore(page.has_more)));
            store.dispatch(Action::Posts(PostsAction::ClearError));
            store.dispatch(Action::Posts(PostsAction::SetLoading(false)));
            Ok(Some(page))
        }
        Err(err) => {
            log::warn!("Failed to load {}: {}", feed, err);
            store.dispatch(Action::Posts(PostsAction::SetError(Some(err.user_message()))));
            store.dispatch(Action::Posts(PostsAction::SetLoading(false)));
            Err(err)
        }
    }
}

/// Append the next page of the current feed
pub async fn load_more(
    store: &Store,
    api: &dyn ApiClient,
    limit: usize,
) -> Result<Option<Page>, ThunkError> {
    let (feed, cursor) = {
        let state = store.get_state();
        if !state.posts.has_more {
            log::debug!("No more posts for {}", state.posts.feed);
            return Ok(None);
        }
        (state.posts.feed.clone(), state.posts.cursor.clone())
    };

    match cursor {
        Some(cursor) => fetch_page(store, api, feed, Some(cursor), limit).await,
        None => {
            log::debug!("No cursor for {}, nothing to continue from", feed);
            Ok(None)
        }
    }
}
