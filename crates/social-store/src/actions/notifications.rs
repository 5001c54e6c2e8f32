//! Notifications slice actions

use crate::domain_models::{MutationId, Notification, NotificationId, NotificationPatch};
use crate::list_ops::ListPosition;
use serde::{Deserialize, Serialize};

/// Actions for the notifications slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "camelCase")]
pub enum NotificationsAction {
    /// Replace the list; unread count is recomputed
    SetNotifications(Vec<Notification>),
    /// Prepend one notification unless its id is already known
    AddNotification(Notification),
    MarkAsRead {
        id: NotificationId,
    },
    MarkAllAsRead,
    /// Undo a failed mark-all for the listed ids
    RestoreUnread {
        ids: Vec<NotificationId>,
    },
    SetUnreadCount {
        count: u32,
    },
    RemoveNotification {
        id: NotificationId,
    },
    RestoreNotification {
        notification: Notification,
        position: ListPosition<NotificationId>,
    },
    ClearNotifications,
    SetLoading(bool),
    SetError(Option<String>),

    // Speculative mutation protocol (read flag)
    ApplyOptimistic {
        id: NotificationId,
        mutation: MutationId,
        patch: NotificationPatch,
    },
    CommitOptimistic {
        id: NotificationId,
        mutation: MutationId,
        #[serde(default)]
        server_patch: Option<NotificationPatch>,
    },
    RevertOptimistic {
        id: NotificationId,
        mutation: MutationId,
        snapshot: NotificationPatch,
    },
}

impl NotificationsAction {
    pub fn name(&self) -> &'static str {
        match self {
            NotificationsAction::SetNotifications(_) => "setNotifications",
            NotificationsAction::AddNotification(_) => "addNotification",
            NotificationsAction::MarkAsRead { .. } => "markAsRead",
            NotificationsAction::MarkAllAsRead => "markAllAsRead",
            NotificationsAction::RestoreUnread { .. } => "restoreUnread",
            NotificationsAction::SetUnreadCount { .. } => "setUnreadCount",
            NotificationsAction::RemoveNotification { .. } => "removeNotification",
            NotificationsAction::RestoreNotification { .. } => "restoreNotification",
            NotificationsAction::ClearNotifications => "clearNotifications",
            NotificationsAction::SetLoading(_) => "setLoading",
            NotificationsAction::SetError(_) => "setError",
            NotificationsAction::ApplyOptimistic { .. } => "applyOptimistic",
            NotificationsAction::CommitOptimistic { .. } => "commitOptimistic",
            NotificationsAction::RevertOptimistic { .. } => "revertOptimistic",
        }
    }
}
