//! Posts slice actions

use crate::domain_models::{FeedKind, MutationId, Post, PostId, PostPatch, ProfileId};
use crate::list_ops::ListPosition;
use serde::{Deserialize, Serialize};

/// Actions for the posts slice
///
/// Serialized form is `{"action": "<wire name>", "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "camelCase")]
pub enum PostsAction {
    /// A fresh load of this feed started; the list is left as it is
    BeginFeedLoad(FeedKind),
    /// Switch feeds; clears items and pagination when the feed changes
    SetFeed(FeedKind),
    /// Replace the list wholesale (fresh load)
    SetPosts(Vec<Post>),
    /// Append a page, skipping ids already present
    AppendPosts(Vec<Post>),
    /// Prepend a newly created post
    AddPost(Post),
    UpdatePost {
        id: PostId,
        updates: PostPatch,
    },
    RemovePost {
        id: PostId,
    },
    /// Undo an optimistic removal; no-op once the list was replaced
    RestorePost {
        post: Post,
        position: ListPosition<PostId>,
        /// It was open in the detail view when removed
        #[serde(default)]
        was_current: bool,
    },
    SetCurrentPost(Post),
    ClearCurrentPost,
    SetCursor(Option<String>),
    SetHasMore(bool),
    SetLoading(bool),
    SetError(Option<String>),
    ClearError,

    // Speculative mutation protocol
    ApplyOptimistic {
        id: PostId,
        mutation: MutationId,
        patch: PostPatch,
    },
    CommitOptimistic {
        id: PostId,
        mutation: MutationId,
        #[serde(default)]
        server_patch: Option<PostPatch>,
    },
    RevertOptimistic {
        id: PostId,
        mutation: MutationId,
        snapshot: PostPatch,
    },

    /// Drop every post by a blocked author
    RemoveByAuthor {
        author_id: ProfileId,
    },
}

impl PostsAction {
    pub fn name(&self) -> &'static str {
        match self {
            PostsAction::BeginFeedLoad(_) => "beginFeedLoad",
            PostsAction::SetFeed(_) => "setFeed",
            PostsAction::SetPosts(_) => "setPosts",
            PostsAction::AppendPosts(_) => "appendPosts",
            PostsAction::AddPost(_) => "addPost",
            PostsAction::UpdatePost { .. } => "updatePost",
            PostsAction::RemovePost { .. } => "removePost",
            PostsAction::RestorePost { .. } => "restorePost",
            PostsAction::SetCurrentPost(_) => "setCurrentPost",
            PostsAction::ClearCurrentPost => "clearCurrentPost",
            PostsAction::SetCursor(_) => "setCursor",
            PostsAction::SetHasMore(_) => "setHasMore",
            PostsAction::SetLoading(_) => "setLoading",
            PostsAction::SetError(_) => "setError",
            PostsAction::ClearError => "clearError",
            PostsAction::ApplyOptimistic { .. } => "applyOptimistic",
            PostsAction::CommitOptimistic { .. } => "commitOptimistic",
            PostsAction::RevertOptimistic { .. } => "revertOptimistic",
            PostsAction::RemoveByAuthor { .. } => "removeByAuthor",
        }
    }
}
