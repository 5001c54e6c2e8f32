//! Feed selection

use super::ProfileId;
use serde::{Deserialize, Serialize};

/// Which post list the posts slice currently holds
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "id")]
pub enum FeedKind {
    #[default]
    Home,
    Following,
    Profile(ProfileId),
}

impl FeedKind {
    /// Endpoint path plus any fixed query parameters
    pub fn endpoint(&self) -> String {
        match self {
            FeedKind::Home => "/posts".to_string(),
            FeedKind::Following => "/posts/following".to_string(),
            FeedKind::Profile(id) => format!("/posts?author_id={}", id),
        }
    }

    /// Page request path: `?limit=N[&cursor=C]`
    pub fn page_path(&self, limit: usize, cursor: Option<&str>) -> String {
        let endpoint = self.endpoint();
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        let mut path = format!("{}{}limit={}", endpoint, separator, limit);
        if let Some(cursor) = cursor {
            path.push_str("&cursor=");
            path.push_str(cursor);
        }
        path
    }
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedKind::Home => write!(f, "home"),
            FeedKind::Following => write!(f, "following"),
            FeedKind::Profile(id) => write!(f, "profile:{}", id),
        }
    }
}
