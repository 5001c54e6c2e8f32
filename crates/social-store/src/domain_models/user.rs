//! Authenticated user and session

use super::{Profile, ProfileId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Signed-in account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile: Option<Profile>,
}

impl User {
    /// Community profile id; the account id when no profile is joined in
    pub fn profile_id(&self) -> ProfileId {
        self.profile
            .as_ref()
            .map(|profile| profile.id.clone())
            .unwrap_or_else(|| ProfileId::new(self.id.clone()))
    }
}

/// Tokens returned by sign-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix seconds on the wire
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user: Option<User>,
}
