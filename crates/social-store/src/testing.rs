//! Test doubles and fixtures

use crate::domain_models::{
    Notification, NotificationId, NotificationType, Post, PostId, Profile, ProfileId, Story,
    StoryId,
};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use social_api::{ApiClient, ApiResponse, Method, TransportError};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

type Reply = Result<ApiResponse, TransportError>;

enum Scripted {
    Ready(Reply),
    Deferred(oneshot::Receiver<Reply>),
}

/// Recorded request
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Scripted API client
///
/// Responses are queued per `(method, path)` and consumed in order. An
/// unscripted request gets a 404.
#[derive(Clone, Default)]
pub struct MockApi {
    routes: Arc<Mutex<HashMap<(Method, String), VecDeque<Scripted>>>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, json: Value) {
        self.push(method, path, Scripted::Ready(Ok(ApiResponse::new(status, json))));
    }

    /// Fail with a transport error (no response)
    pub fn fail(&self, method: Method, path: &str, message: &str) {
        self.push(
            method,
            path,
            Scripted::Ready(Err(TransportError::new(message))),
        );
    }

    /// Hold the response until the returned sender fires
    pub fn defer(&self, method: Method, path: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.push(method, path, Scripted::Deferred(rx));
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, method: Method, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.method == method && call.path == path)
            .count()
    }
}

#[async_trait]
impl ApiClient for MockApi {
    async fn perform_request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, TransportError> {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body,
        });

        let scripted = self
            .routes
            .lock()
            .unwrap()
            .get_mut(&(method, path.to_string()))
            .and_then(VecDeque::pop_front);

        match scripted {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Deferred(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError::new("deferred reply dropped"))),
            None => Ok(ApiResponse::new(
                404,
                json!({"error": format!("no script for {} {}", method, path)}),
            )),
        }
    }
}

pub fn post(id: &str) -> Post {
    Post {
        id: PostId::new(id),
        author_id: ProfileId::new("author"),
        author: None,
        content: format!("post {}", id),
        image_url: None,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
        like_count: 0,
        dislike_count: 0,
        comment_count: 0,
        user_reaction: None,
    }
}

pub fn post_json(id: &str) -> Value {
    serde_json::to_value(post(id)).unwrap()
}

pub fn page_json(ids: &[&str], next_cursor: Option<&str>, has_more: bool) -> Value {
    json!({
        "posts": ids.iter().map(|id| post_json(id)).collect::<Vec<_>>(),
        "next_cursor": next_cursor,
        "has_more": has_more,
    })
}

pub fn notification(id: &str) -> Notification {
    let mut actor = Profile::new("actor");
    actor.display_name = Some("Alice".to_string());
    Notification {
        id: NotificationId::new(id),
        kind: NotificationType::Like,
        actor_ref: actor,
        recipient_ref: ProfileId::new("me"),
        content: None,
        post_id: Some(PostId::new("p1")),
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        is_read: false,
    }
}

pub fn story(id: &str) -> Story {
    Story {
        id: StoryId::new(id),
        author_id: ProfileId::new("author"),
        media_url: Some(format!("https://cdn.example/{}.jpg", id)),
        text: None,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        expires_at: None,
    }
}
