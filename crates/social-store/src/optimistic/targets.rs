//! Entities that support speculative field updates

use super::Patch;
use crate::actions::{Action, NotificationsAction, PostsAction};
use crate::domain_models::{
    MutationId, Notification, NotificationId, NotificationPatch, Post, PostId, PostPatch,
};
use crate::state::AppState;

/// Binds an entity type to the slice actions of the speculative protocol
pub trait SpeculativeTarget {
    type Id: Clone + std::fmt::Display + Send + Sync + 'static;
    type Entity: Clone;
    type Patch: Patch;

    /// Entity name used in errors and logs
    const KIND: &'static str;

    fn read(state: &AppState, id: &Self::Id) -> Option<Self::Entity>;

    /// Current values of every field `shape` touches
    fn capture(entity: &Self::Entity, shape: &Self::Patch) -> Self::Patch;

    fn apply(id: Self::Id, mutation: MutationId, patch: Self::Patch) -> Action;

    fn commit(id: Self::Id, mutation: MutationId, server_patch: Option<Self::Patch>) -> Action;

    fn revert(id: Self::Id, mutation: MutationId, snapshot: Self::Patch) -> Action;

    /// Record a failure in the slice's `error`
    fn fail(message: String) -> Action;
}

pub struct PostTarget;

impl SpeculativeTarget for PostTarget {
    type Id = PostId;
    type Entity = Post;
    type Patch = PostPatch;

    const KIND: &'static str = "post";

    fn read(state: &AppState, id: &PostId) -> Option<Post> {
        state.posts.find(id).cloned()
    }

    fn capture(post: &Post, shape: &PostPatch) -> PostPatch {
        PostPatch::capture(post, shape)
    }

    fn apply(id: PostId, mutation: MutationId, patch: PostPatch) -> Action {
        Action::Posts(PostsAction::ApplyOptimistic { id, mutation, patch })
    }

    fn commit(id: PostId, mutation: MutationId, server_patch: Option<PostPatch>) -> Action {
        Action::Posts(PostsAction::CommitOptimistic {
            id,
            mutation,
            server_patch,
        })
    }

    fn revert(id: PostId, mutation: MutationId, snapshot: PostPatch) -> Action {
        Action::Posts(PostsAction::RevertOptimistic {
            id,
            mutation,
            snapshot,
        })
    }

    fn fail(message: String) -> Action {
        Action::Posts(PostsAction::SetError(Some(message)))
    }
}

pub struct NotificationTarget;

impl SpeculativeTarget for NotificationTarget {
    type Id = NotificationId;
    type Entity = Notification;
    type Patch = NotificationPatch;

    const KIND: &'static str = "notification";

    fn read(state: &AppState, id: &NotificationId) -> Option<Notification> {
        state.notifications.find(id).cloned()
    }

    fn capture(notification: &Notification, shape: &NotificationPatch) -> NotificationPatch {
        NotificationPatch::capture(notification, shape)
    }

    fn apply(id: NotificationId, mutation: MutationId, patch: NotificationPatch) -> Action {
        Action::Notifications(NotificationsAction::ApplyOptimistic { id, mutation, patch })
    }

    fn commit(
        id: NotificationId,
        mutation: MutationId,
        server_patch: Option<NotificationPatch>,
    ) -> Action {
        Action::Notifications(NotificationsAction::CommitOptimistic {
            id,
            mutation,
            server_patch,
        })
    }

    fn revert(id: NotificationId, mutation: MutationId, snapshot: NotificationPatch) -> Action {
        Action::Notifications(NotificationsAction::RevertOptimistic {
            id,
            mutation,
            snapshot,
        })
    }

    fn fail(message: String) -> Action {
        Action::Notifications(NotificationsAction::SetError(Some(message)))
    }
}
