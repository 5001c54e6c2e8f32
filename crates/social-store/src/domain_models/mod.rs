//! Domain Models
//!
//! Wire shapes of the entities held in the slices. All of them deserialize
//! from the API's JSON and are cheap to clone.

mod comment;
mod feed;
mod ids;
mod notification;
mod post;
mod profile;
mod serde_helpers;
mod story;
mod user;

pub use comment::Comment;
pub use feed::FeedKind;
pub use ids::{MutationId, NotificationId, PostId, ProfileId, StoryId};
pub use notification::{Notification, NotificationField, NotificationPatch, NotificationType};
pub use post::{Post, PostField, PostPatch, ReactionKind, ReactionState};
pub use profile::Profile;
pub use story::{NewStory, Story};
pub use user::{AuthSession, User};

/// Entities kept in id-unique lists
pub trait Identified {
    type Id: Clone + PartialEq + std::fmt::Debug;

    fn id(&self) -> &Self::Id;
}

impl Identified for Post {
    type Id = PostId;

    fn id(&self) -> &PostId {
        &self.id
    }
}

impl Identified for Notification {
    type Id = NotificationId;

    fn id(&self) -> &NotificationId {
        &self.id
    }
}

impl Identified for Story {
    type Id = StoryId;

    fn id(&self) -> &StoryId {
        &self.id
    }
}
