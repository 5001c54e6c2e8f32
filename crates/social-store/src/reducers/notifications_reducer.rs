//! Notifications Reducer
//!
//! `unread_count` is adjusted incrementally on every transition that flips
//! or adds an unread item; only `setNotifications` recounts.

use crate::actions::NotificationsAction;
use crate::domain_models::{Notification, NotificationId};
use crate::list_ops;
use crate::state::NotificationsState;

pub fn reduce_notifications(
    mut state: NotificationsState,
    action: &NotificationsAction,
) -> NotificationsState {
    match action {
        NotificationsAction::SetNotifications(notifications) => {
            state.items = list_ops::dedup_by_id(notifications.clone());
            state.generation += 1;
            state.unread_count = state.count_unread();
        }
        NotificationsAction::AddNotification(notification) => {
            if list_ops::prepend_unique(&mut state.items, notification.clone()) {
                if !notification.is_read {
                    state.unread_count = state.unread_count.saturating_add(1);
                }
            } else {
                log::debug!("Notification {} already known, ignoring", notification.id);
            }
        }
        NotificationsAction::MarkAsRead { id } => {
            set_read(&mut state, id, true);
        }
        NotificationsAction::MarkAllAsRead => {
            for notification in state.items.iter_mut() {
                notification.is_read = true;
            }
            state.unread_count = 0;
        }
        NotificationsAction::RestoreUnread { ids } => {
            for id in ids {
                set_read(&mut state, id, false);
            }
        }
        NotificationsAction::SetUnreadCount { count } => {
            state.unread_count = *count;
        }
        NotificationsAction::RemoveNotification { id } => {
            if let Some(removed) = list_ops::remove_by_id(&mut state.items, id) {
                if !removed.is_read {
                    state.unread_count = state.unread_count.saturating_sub(1);
                }
            }
            state.owners.forget(id);
        }
        NotificationsAction::RestoreNotification {
            notification,
            position,
        } => {
            if list_ops::reinsert(
                &mut state.items,
                state.generation,
                notification.clone(),
                position,
            ) && !notification.is_read
            {
                state.unread_count = state.unread_count.saturating_add(1);
            }
        }
        NotificationsAction::ClearNotifications => {
            state.items.clear();
            state.generation += 1;
            state.unread_count = 0;
            state.owners.clear();
        }
        NotificationsAction::SetLoading(loading) => {
            state.loading = *loading;
        }
        NotificationsAction::SetError(error) => {
            state.error = error.clone();
        }
        NotificationsAction::ApplyOptimistic { id, mutation, patch } => {
            if update_notification(&mut state, id, |n| patch.apply_to(n)) {
                state.owners.claim(id, *mutation, patch);
            }
        }
        NotificationsAction::CommitOptimistic {
            id,
            mutation,
            server_patch,
        } => {
            if let Some(server_patch) = server_patch {
                let owned = state.owners.owned_patch(id, *mutation, server_patch);
                update_notification(&mut state, id, |n| owned.apply_to(n));
            }
            state.owners.release(id, *mutation);
        }
        NotificationsAction::RevertOptimistic {
            id,
            mutation,
            snapshot,
        } => {
            let owned = state.owners.owned_patch(id, *mutation, snapshot);
            update_notification(&mut state, id, |n| owned.apply_to(n));
            state.owners.release(id, *mutation);
        }
    }
    state
}

fn set_read(state: &mut NotificationsState, id: &NotificationId, is_read: bool) {
    update_notification(state, id, |n| n.is_read = is_read);
}

/// Apply `f` and move `unread_count` by the change in the read flag
fn update_notification<F: FnOnce(&mut Notification)>(
    state: &mut NotificationsState,
    id: &NotificationId,
    f: F,
) -> bool {
    let Some(notification) = state.items.iter_mut().find(|n| &n.id == id) else {
        return false;
    };
    let was_read = notification.is_read;
    f(notification);
    match (was_read, notification.is_read) {
        (false, true) => state.unread_count = state.unread_count.saturating_sub(1),
        (true, false) => state.unread_count = state.unread_count.saturating_add(1),
        _ => {}
    }
    true
}
