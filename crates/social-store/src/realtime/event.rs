//! Inbound push events and their normalization into [`Notification`]s

use crate::domain_models::{Notification, NotificationId, NotificationType, PostId, Profile, ProfileId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where an event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    /// `new_notification` broadcast, body under `payload`
    Broadcast,
    /// Row insert on the notifications table, body under `new`
    Insert,
}

/// Raw event as delivered by a [`RealtimeChannel`](super::RealtimeChannel)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundEvent {
    pub source: EventSource,
    pub payload: Value,
}

impl InboundEvent {
    pub fn new(source: EventSource, payload: Value) -> Self {
        Self { source, payload }
    }

    /// The notification body with any transport envelope removed
    pub fn body(&self) -> &Value {
        let key = match self.source {
            EventSource::Broadcast => "payload",
            EventSource::Insert => "new",
        };
        match self.payload.get(key) {
            Some(inner) if inner.is_object() => inner,
            _ => &self.payload,
        }
    }
}

/// Outcome of [`normalize`]
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// Everything needed for display is present
    Complete(Notification),
    /// Usable, but actor detail or other fields were missing and defaulted
    Partial(Notification),
    /// Dropped: no id or no recognizable type
    Invalid(String),
}

impl Normalized {
    pub fn id(&self) -> Option<&NotificationId> {
        match self {
            Normalized::Complete(n) | Normalized::Partial(n) => Some(&n.id),
            Normalized::Invalid(_) => None,
        }
    }
}

fn string_field(body: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match body.get(*key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Turn a raw event into a notification addressed to `profile_id`
///
/// Missing fields fall back to `is_read = false`, `created_at = now` and
/// the signed-in profile as recipient.
pub fn normalize(event: &InboundEvent, profile_id: &ProfileId) -> Normalized {
    let body = event.body();

    let Some(id) = string_field(body, &["id"]) else {
        return Normalized::Invalid("event has no id".to_string());
    };
    let kind = match body.get("type").and_then(Value::as_str) {
        Some(name) => match NotificationType::parse(name) {
            Some(kind) => kind,
            None => return Normalized::Invalid(format!("unknown notification type '{}'", name)),
        },
        None => return Normalized::Invalid(format!("notification {} has no type", id)),
    };

    if let Ok(notification) = serde_json::from_value::<Notification>(body.clone()) {
        if notification.actor_ref.label().is_some() {
            return Normalized::Complete(notification);
        }
        return Normalized::Partial(notification);
    }

    let actor = ["actor", "sender"]
        .iter()
        .find_map(|key| {
            body.get(*key)
                .and_then(|v| serde_json::from_value::<Profile>(v.clone()).ok())
        })
        .unwrap_or_else(|| {
            Profile::new(
                string_field(body, &["actor_id", "sender_id"]).unwrap_or_else(|| "unknown".to_string()),
            )
        });

    let created_at = body
        .get("created_at")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    Normalized::Partial(Notification {
        id: NotificationId::new(id),
        kind,
        actor_ref: actor,
        recipient_ref: string_field(body, &["recipient_id", "recipient_ref"])
            .map(ProfileId::new)
            .unwrap_or_else(|| profile_id.clone()),
        content: string_field(body, &["content", "message"]),
        post_id: string_field(body, &["post_id"]).map(PostId::new),
        created_at,
        is_read: body.get("is_read").and_then(Value::as_bool).unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn me() -> ProfileId {
        ProfileId::new("me")
    }

    #[test]
    fn test_broadcast_with_actor_is_complete() {
        let event = InboundEvent::new(
            EventSource::Broadcast,
            json!({"payload": {
                "id": "n1",
                "type": "comment",
                "sender": {"id": "u2", "username": "bob"},
                "recipient_id": "me",
                "created_at": "2024-05-01T10:00:00Z"
            }}),
        );
        match normalize(&event, &me()) {
            Normalized::Complete(n) => assert_eq!(n.describe(), "bob commented on your post"),
            other => panic!("expected complete, got {:?}", other),
        }
    }

    #[test]
    fn test_insert_row_is_partial_with_defaults() {
        let event = InboundEvent::new(
            EventSource::Insert,
            json!({"new": {"id": "n2", "type": "follow", "sender_id": "u3"}}),
        );
        let Normalized::Partial(n) = normalize(&event, &me()) else {
            panic!("expected partial");
        };
        assert_eq!(n.actor_ref.id.as_str(), "u3");
        assert_eq!(n.recipient_ref, me());
        assert!(!n.is_read);
        assert_eq!(n.describe(), "Someone started following you");
    }

    #[test]
    fn test_actor_falls_back_to_id_fields() {
        let by_actor_id = InboundEvent::new(
            EventSource::Insert,
            json!({"id": "n4", "type": "like", "actor_id": "u7"}),
        );
        let Normalized::Partial(n) = normalize(&by_actor_id, &me()) else {
            panic!("expected partial");
        };
        assert_eq!(n.actor_ref.id.as_str(), "u7");

        let anonymous = InboundEvent::new(EventSource::Insert, json!({"id": "n5", "type": "like"}));
        let Normalized::Partial(n) = normalize(&anonymous, &me()) else {
            panic!("expected partial");
        };
        assert_eq!(n.actor_ref.id.as_str(), "unknown");
    }

    #[test]
    fn test_missing_id_or_type_is_invalid() {
        let no_id = InboundEvent::new(EventSource::Broadcast, json!({"type": "like"}));
        assert!(matches!(normalize(&no_id, &me()), Normalized::Invalid(_)));

        let bad_type = InboundEvent::new(EventSource::Broadcast, json!({"id": "n3", "type": "poke"}));
        assert!(matches!(normalize(&bad_type, &me()), Normalized::Invalid(_)));
    }

    #[test]
    fn test_unwrapped_body_is_accepted() {
        let event = InboundEvent::new(EventSource::Insert, json!({"id": 42, "type": "like"}));
        assert_eq!(normalize(&event, &me()).id().map(|id| id.as_str()), Some("42"));
    }
}
