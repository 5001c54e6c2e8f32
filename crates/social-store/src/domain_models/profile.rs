//! Profile model

use super::ProfileId;
use serde::{Deserialize, Serialize};

/// Community profile as embedded in posts, notifications and the auth slice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl Profile {
    pub fn new(id: impl Into<ProfileId>) -> Self {
        Self {
            id: id.into(),
            username: None,
            display_name: None,
            avatar_url: None,
            bio: None,
        }
    }

    /// Display name, then username
    pub fn label(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .or(self.username.as_deref())
            .filter(|name| !name.is_empty())
    }
}
