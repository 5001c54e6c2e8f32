//! Notifications State

use crate::domain_models::{Notification, NotificationField, NotificationId};
use crate::optimistic::Ownership;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationsState {
    /// Unique by id, most recent first
    pub items: Vec<Notification>,
    /// Bumped whenever `items` is replaced rather than edited
    pub generation: u64,
    /// Maintained incrementally by the reducer
    pub unread_count: u32,
    pub loading: bool,
    pub error: Option<String>,
    pub owners: Ownership<NotificationId, NotificationField>,
}

impl NotificationsState {
    pub fn find(&self, id: &NotificationId) -> Option<&Notification> {
        self.items.iter().find(|notification| &notification.id == id)
    }

    /// Count of unread items, computed from scratch
    pub fn count_unread(&self) -> u32 {
        self.items.iter().filter(|n| !n.is_read).count() as u32
    }
}
