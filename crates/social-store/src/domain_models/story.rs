//! Story model

use super::{ProfileId, StoryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ephemeral story
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: StoryId,
    #[serde(alias = "user_id")]
    pub author_id: ProfileId,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Story {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires| expires <= now)
    }
}

/// Request body for creating a story
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewStory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}
