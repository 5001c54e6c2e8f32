//! Notification thunks

use super::{boxed, decode_field, BoxFuture, SharedApi, ThunkResult};
use crate::actions::{Action, NotificationsAction};
use crate::domain_models::{Notification, NotificationId, NotificationPatch};
use crate::error::ThunkError;
use crate::optimistic::{remove_speculatively, speculate, NotificationRemoval, NotificationTarget};
use crate::store::Store;
use serde_json::json;
use social_api::Method;

fn record_error(store: &Store, err: ThunkError) -> ThunkError {
    log::warn!("Notifications: {}", err);
    store.dispatch(Action::Notifications(NotificationsAction::SetError(Some(
        err.user_message(),
    ))));
    err
}

/// Load the notification list; the unread counter is recomputed
pub fn fetch_notifications(
    api: SharedApi,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<Vec<Notification>>> {
    boxed(move |store: Store| async move {
        store.dispatch(Action::Notifications(NotificationsAction::SetLoading(true)));

        let result = async {
            let value = api.request(Method::Get, "/notifications", None).await?;
            decode_field::<Vec<Notification>>(value, "notifications")
        }
        .await;

        let outcome = match result {
            Ok(notifications) => {
                store.dispatch(Action::Notifications(
                    NotificationsAction::SetNotifications(notifications.clone()),
                ));
                store.dispatch(Action::Notifications(NotificationsAction::SetError(None)));
                Ok(notifications)
            }
            Err(err) => Err(record_error(&store, err)),
        };
        store.dispatch(Action::Notifications(NotificationsAction::SetLoading(false)));
        outcome
    })
}

/// Mark one notification read, speculatively
pub fn mark_notification_read(
    api: SharedApi,
    id: NotificationId,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<()>> {
    boxed(move |store: Store| async move {
        let target = id.clone();
        speculate::<NotificationTarget, _, _, _, _>(
            &store,
            id,
            |_| NotificationPatch::read(true),
            move |_| async move {
                api.request(
                    Method::Put,
                    &format!("/notifications/{}", target),
                    Some(json!({ "is_read": true })),
                )
                .await?;
                Ok(((), None))
            },
        )
        .await
    })
}

/// Mark everything read; resolves to how many items flipped
///
/// On failure exactly those items become unread again.
pub fn mark_all_notifications_read(
    api: SharedApi,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<usize>> {
    boxed(move |store: Store| async move {
        let unread: Vec<NotificationId> = store
            .get_state()
            .notifications
            .items
            .iter()
            .filter(|n| !n.is_read)
            .map(|n| n.id.clone())
            .collect();

        store.dispatch(Action::Notifications(NotificationsAction::MarkAllAsRead));

        match api
            .request(Method::Put, "/notifications/read-all", None)
            .await
        {
            Ok(_) => Ok(unread.len()),
            Err(err) => {
                store.dispatch(Action::Notifications(NotificationsAction::RestoreUnread {
                    ids: unread,
                }));
                Err(record_error(&store, err.into()))
            }
        }
    })
}

/// Delete a notification, restoring it in place if the server refuses
pub fn delete_notification(
    api: SharedApi,
    id: NotificationId,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<()>> {
    boxed(move |store: Store| async move {
        let path = format!("/notifications/{}", id);
        remove_speculatively::<NotificationRemoval, _, _>(&store, id, move || async move {
            api.request(Method::Delete, &path, None).await?;
            Ok(())
        })
        .await
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{notification, MockApi};
    use serde_json::json;
    use std::sync::Arc;

    fn setup(items: Vec<Notification>) -> (Store, MockApi, SharedApi) {
        let store = Store::default();
        store.dispatch(Action::Notifications(NotificationsAction::SetNotifications(items)));
        let mock = MockApi::new();
        let api: SharedApi = Arc::new(mock.clone());
        (store, mock, api)
    }

    #[tokio::test]
    async fn test_fetch_recomputes_unread() {
        let (store, mock, api) = setup(vec![]);
        let mut read = serde_json::to_value(notification("n2")).unwrap();
        read["is_read"] = json!(true);
        mock.respond(
            Method::Get,
            "/notifications",
            200,
            json!({"data": {"notifications": [notification("n1"), read]}}),
        );

        let items = store.thunk(fetch_notifications(api)).await.unwrap();
        assert_eq!(items.len(), 2);
        let state = store.get_state();
        assert_eq!(state.notifications.unread_count, 1);
        assert!(!state.notifications.loading);
    }

    #[tokio::test]
    async fn test_fetch_failure_sets_error() {
        let (store, mock, api) = setup(vec![notification("n1")]);
        mock.fail(Method::Get, "/notifications", "connection refused");

        assert!(store.thunk(fetch_notifications(api)).await.is_err());
        let state = store.get_state();
        assert_eq!(state.notifications.items.len(), 1);
        assert_eq!(
            state.notifications.error.as_deref(),
            Some("network error: connection refused")
        );
        assert!(!state.notifications.loading);
    }

    #[tokio::test]
    async fn test_mark_read_failure_restores_unread() {
        let (store, mock, api) = setup(vec![notification("n1")]);
        mock.respond(Method::Put, "/notifications/n1", 500, json!({"error": "nope"}));

        let result = store
            .thunk(mark_notification_read(api, NotificationId::new("n1")))
            .await;
        assert!(result.is_err());
        let state = store.get_state();
        assert!(!state.notifications.items[0].is_read);
        assert_eq!(state.notifications.unread_count, 1);
    }

    #[tokio::test]
    async fn test_mark_all_read() {
        let (store, mock, api) = setup(vec![notification("n1"), notification("n2")]);
        mock.respond(Method::Put, "/notifications/read-all", 200, json!({}));

        let flipped = store.thunk(mark_all_notifications_read(api)).await.unwrap();
        assert_eq!(flipped, 2);
        assert_eq!(store.get_state().notifications.unread_count, 0);
    }

    #[tokio::test]
    async fn test_mark_all_failure_restores() {
        let (store, mock, api) = setup(vec![notification("n1"), notification("n2")]);
        mock.fail(Method::Put, "/notifications/read-all", "offline");

        assert!(store.thunk(mark_all_notifications_read(api)).await.is_err());
        let state = store.get_state();
        assert_eq!(state.notifications.unread_count, 2);
        assert!(state.notifications.items.iter().all(|n| !n.is_read));
    }

    #[tokio::test]
    async fn test_delete_notification_failure_restores() {
        let (store, mock, api) = setup(vec![notification("n1"), notification("n2")]);
        mock.respond(Method::Delete, "/notifications/n2", 404, json!({"error": "gone"}));

        let result = store
            .thunk(delete_notification(api, NotificationId::new("n2")))
            .await;
        assert!(result.is_err());
        let state = store.get_state();
        assert_eq!(state.notifications.items.len(), 2);
        assert_eq!(state.notifications.items[1].id.as_str(), "n2");
        assert_eq!(state.notifications.unread_count, 2);
    }
}
