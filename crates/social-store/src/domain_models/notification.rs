//! Notification model

use super::{NotificationId, PostId, Profile, ProfileId};
use crate::optimistic::Patch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Like,
    Dislike,
    Comment,
    Follow,
    Mention,
    StoryMention,
    StoryView,
}

impl NotificationType {
    /// Parse the wire name, `None` for anything unrecognized
    pub fn parse(name: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(name.to_string())).ok()
    }
}

/// A notification addressed to the signed-in profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// Who triggered it
    #[serde(alias = "actor", alias = "sender")]
    pub actor_ref: Profile,
    #[serde(alias = "recipient_id")]
    pub recipient_ref: ProfileId,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub post_id: Option<PostId>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
}

impl Notification {
    /// Human readable one-liner, e.g. "Alice liked your post"
    pub fn describe(&self) -> String {
        let actor = self.actor_ref.label().unwrap_or("Someone");
        match self.kind {
            NotificationType::Like => format!("{} liked your post", actor),
            NotificationType::Dislike => format!("{} disliked your post", actor),
            NotificationType::Comment => format!("{} commented on your post", actor),
            NotificationType::Follow => format!("{} started following you", actor),
            NotificationType::Mention => format!("{} mentioned you", actor),
            NotificationType::StoryMention => format!("{} mentioned you in a story", actor),
            NotificationType::StoryView => format!("{} viewed your story", actor),
        }
    }
}

/// Only the read flag is speculatively mutated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NotificationField {
    IsRead,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
}

impl NotificationPatch {
    pub fn read(is_read: bool) -> Self {
        Self {
            is_read: Some(is_read),
        }
    }

    pub fn apply_to(&self, notification: &mut Notification) {
        if let Some(is_read) = self.is_read {
            notification.is_read = is_read;
        }
    }

    pub fn capture(notification: &Notification, shape: &NotificationPatch) -> NotificationPatch {
        NotificationPatch {
            is_read: shape.is_read.map(|_| notification.is_read),
        }
    }
}

impl Patch for NotificationPatch {
    type Field = NotificationField;

    fn fields(&self) -> Vec<NotificationField> {
        self.is_read
            .map(|_| vec![NotificationField::IsRead])
            .unwrap_or_default()
    }

    fn retain<F: Fn(NotificationField) -> bool>(&self, keep: F) -> Self {
        NotificationPatch {
            is_read: self.is_read.filter(|_| keep(NotificationField::IsRead)),
        }
    }
}
