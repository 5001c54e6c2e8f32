//! Speculative removal with positional restore

use crate::actions::{Action, NotificationsAction, PostsAction, StoriesAction};
use crate::domain_models::{Identified, Notification, NotificationId, Post, PostId, Story, StoryId};
use crate::error::ThunkError;
use crate::list_ops;
use crate::state::AppState;
use crate::store::Store;
use std::future::Future;

/// A list an item can be optimistically removed from
pub trait RemovalTarget {
    type Entity: Identified + Clone;

    const KIND: &'static str;

    /// Action putting `id` back exactly where it is in `state`; `None` when not listed
    fn restorer(state: &AppState, id: &<Self::Entity as Identified>::Id) -> Option<Action>;

    fn remove(id: <Self::Entity as Identified>::Id) -> Action;

    fn fail(message: String) -> Action;
}

pub struct PostRemoval;

impl RemovalTarget for PostRemoval {
    type Entity = Post;

    const KIND: &'static str = "post";

    fn restorer(state: &AppState, id: &PostId) -> Option<Action> {
        let posts = &state.posts;
        let (post, position) = list_ops::locate(&posts.items, id, posts.generation)?;
        let was_current = posts.current_post.as_ref().is_some_and(|open| &open.id == id);
        Some(Action::Posts(PostsAction::RestorePost {
            post,
            position,
            was_current,
        }))
    }

    fn remove(id: PostId) -> Action {
        Action::Posts(PostsAction::RemovePost { id })
    }

    fn fail(message: String) -> Action {
        Action::Posts(PostsAction::SetError(Some(message)))
    }
}

pub struct StoryRemoval;

impl RemovalTarget for StoryRemoval {
    type Entity = Story;

    const KIND: &'static str = "story";

    fn restorer(state: &AppState, id: &StoryId) -> Option<Action> {
        let stories = &state.stories;
        let (story, position) = list_ops::locate(&stories.items, id, stories.generation)?;
        Some(Action::Stories(StoriesAction::RestoreStory { story, position }))
    }

    fn remove(id: StoryId) -> Action {
        Action::Stories(StoriesAction::RemoveStory { id })
    }

    fn fail(message: String) -> Action {
        Action::Stories(StoriesAction::SetError(Some(message)))
    }
}

pub struct NotificationRemoval;

impl RemovalTarget for NotificationRemoval {
    type Entity = Notification;

    const KIND: &'static str = "notification";

    fn restorer(state: &AppState, id: &NotificationId) -> Option<Action> {
        let notifications = &state.notifications;
        let (notification, position) =
            list_ops::locate(&notifications.items, id, notifications.generation)?;
        Some(Action::Notifications(
            NotificationsAction::RestoreNotification {
                notification,
                position,
            },
        ))
    }

    fn remove(id: NotificationId) -> Action {
        Action::Notifications(NotificationsAction::RemoveNotification { id })
    }

    fn fail(message: String) -> Action {
        Action::Notifications(NotificationsAction::SetError(Some(message)))
    }
}

/// Remove an item now, run `effect`, put it back if the effect fails
///
/// The restore lands after the item's former neighbour when that is still
/// present. It is a no-op when the id has reappeared meanwhile or when the
/// list was replaced (session reset, reload, feed switch) in between.
pub async fn remove_speculatively<T, E, Fut>(
    store: &Store,
    id: <T::Entity as Identified>::Id,
    effect: E,
) -> Result<(), ThunkError>
where
    T: RemovalTarget,
    E: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), ThunkError>>,
{
    let restore = T::restorer(&store.get_state(), &id)
        .ok_or_else(|| ThunkError::NotFound(format!("{} {:?}", T::KIND, id)))?;

    store.dispatch(T::remove(id));

    match effect().await {
        Ok(()) => Ok(()),
        Err(err) => {
            log::warn!("Restoring {} after failed delete: {}", T::KIND, err);
            store.dispatch(restore);
            store.dispatch(T::fail(err.user_message()));
            Err(err)
        }
    }
}
