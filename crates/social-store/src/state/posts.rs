//! Posts State

use crate::domain_models::{FeedKind, Post, PostField, PostId};
use crate::optimistic::Ownership;

/// Feed list plus pagination and the detail-view post
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostsState {
    /// Which feed `items` belong to
    pub feed: FeedKind,
    /// Feed a fresh load is in flight for; `items` keep showing `feed` until it lands
    pub pending_feed: Option<FeedKind>,
    /// Unique by id, in server order, never by a blocked author
    pub items: Vec<Post>,
    /// Bumped whenever `items` is replaced rather than edited
    pub generation: u64,
    /// Cursor for the next page, `None` before the first load
    pub cursor: Option<String>,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<String>,
    /// Post shown in the detail view, kept in sync with `items`
    pub current_post: Option<Post>,
    /// Which in-flight mutation owns which post field
    pub owners: Ownership<PostId, PostField>,
}

impl PostsState {
    pub fn find(&self, id: &PostId) -> Option<&Post> {
        self.items
            .iter()
            .find(|post| &post.id == id)
            .or_else(|| self.current_post.as_ref().filter(|post| &post.id == id))
    }
}
