//! Comment model

use super::{PostId, ProfileId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub post_id: PostId,
    #[serde(default)]
    pub author_id: Option<ProfileId>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
