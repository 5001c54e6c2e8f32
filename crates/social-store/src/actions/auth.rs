//! Auth slice actions

use crate::domain_models::{AuthSession, User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "camelCase")]
pub enum AuthAction {
    SetUser(User),
    ClearUser,
    SetSession(Option<AuthSession>),
    SetLoading(bool),
    SetError(Option<String>),
    ClearError,
    /// Loading flag and error in one transition
    SetAsyncState {
        loading: bool,
        #[serde(default)]
        error: Option<String>,
    },
}

impl AuthAction {
    pub fn name(&self) -> &'static str {
        match self {
            AuthAction::SetUser(_) => "setUser",
            AuthAction::ClearUser => "clearUser",
            AuthAction::SetSession(_) => "setSession",
            AuthAction::SetLoading(_) => "setLoading",
            AuthAction::SetError(_) => "setError",
            AuthAction::ClearError => "clearError",
            AuthAction::SetAsyncState { .. } => "setAsyncState",
        }
    }
}
