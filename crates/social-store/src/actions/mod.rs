//! Actions module
//!
//! Every state transition is described by one [`Action`], tagged by the
//! slice it addresses. Each slice action also has a stable wire name of the
//! form `"slice/actionName"`, used for logging and for [`Action::from_raw`],
//! the string-keyed entry point behind `Store::dispatch_raw`.

pub mod auth;
pub mod global;
pub mod notifications;
pub mod posts;
pub mod social;
pub mod stories;

pub use auth::AuthAction;
pub use global::GlobalAction;
pub use notifications::NotificationsAction;
pub use posts::PostsAction;
pub use social::SocialAction;
pub use stories::StoriesAction;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;

/// Root action enum - tagged by slice
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Posts(PostsAction),
    Notifications(NotificationsAction),
    Auth(AuthAction),
    Stories(StoriesAction),
    Social(SocialAction),
    /// Application-wide actions
    Global(GlobalAction),
}

/// Why a raw `(type, payload)` pair could not become an [`Action`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RawActionError {
    #[error("unknown action type: {0}")]
    UnknownType(String),

    #[error("invalid payload for {action}: {reason}")]
    InvalidPayload { action: String, reason: String },
}

impl Action {
    /// Slice name the action is routed to
    pub fn slice(&self) -> &'static str {
        match self {
            Action::Posts(_) => "posts",
            Action::Notifications(_) => "notifications",
            Action::Auth(_) => "auth",
            Action::Stories(_) => "stories",
            Action::Social(_) => "social",
            Action::Global(_) => "global",
        }
    }

    /// Wire name, e.g. `"posts/appendPosts"`
    pub fn type_name(&self) -> String {
        let name = match self {
            Action::Posts(action) => action.name(),
            Action::Notifications(action) => action.name(),
            Action::Auth(action) => action.name(),
            Action::Stories(action) => action.name(),
            Action::Social(action) => action.name(),
            Action::Global(action) => action.name(),
        };
        format!("{}/{}", self.slice(), name)
    }

    /// Parse the string contract `("slice/actionName", payload)`
    pub fn from_raw(type_name: &str, payload: Value) -> Result<Action, RawActionError> {
        let (slice, name) = type_name
            .split_once('/')
            .ok_or_else(|| RawActionError::UnknownType(type_name.to_string()))?;

        let action = match slice {
            "posts" => Action::Posts(from_wire(type_name, name, payload)?),
            "notifications" => Action::Notifications(from_wire(type_name, name, payload)?),
            "auth" => Action::Auth(from_wire(type_name, name, payload)?),
            "stories" => Action::Stories(from_wire(type_name, name, payload)?),
            "social" => Action::Social(from_wire(type_name, name, payload)?),
            "global" => Action::Global(from_wire(type_name, name, payload)?),
            _ => return Err(RawActionError::UnknownType(type_name.to_string())),
        };
        Ok(action)
    }
}

fn from_wire<T: DeserializeOwned>(
    type_name: &str,
    name: &str,
    payload: Value,
) -> Result<T, RawActionError> {
    let envelope = if payload.is_null() {
        json!({ "action": name })
    } else {
        json!({ "action": name, "payload": payload })
    };

    match serde_json::from_value::<T>(envelope) {
        Ok(action) => Ok(action),
        // `null` is a real payload for e.g. setError / setCursor
        Err(_) if payload.is_null() => {
            serde_json::from_value(json!({ "action": name, "payload": Value::Null }))
                .map_err(|err| classify(type_name, err))
        }
        Err(err) => Err(classify(type_name, err)),
    }
}

fn classify(type_name: &str, err: serde_json::Error) -> RawActionError {
    if err.to_string().starts_with("unknown variant") {
        RawActionError::UnknownType(type_name.to_string())
    } else {
        RawActionError::InvalidPayload {
            action: type_name.to_string(),
            reason: err.to_string(),
        }
    }
}
