//! Social graph slice actions

use crate::domain_models::ProfileId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "camelCase")]
pub enum SocialAction {
    SetFollowing(Vec<ProfileId>),
    AddFollowing(ProfileId),
    RemoveFollowing(ProfileId),
    SetFollowers(Vec<ProfileId>),
    /// Replace the block list; posts by newly blocked authors leave the feed
    SetBlockedUsers(Vec<ProfileId>),
    /// Block one author; their posts leave the feed
    AddBlockedUser(ProfileId),
    RemoveBlockedUser(ProfileId),
}

impl SocialAction {
    pub fn name(&self) -> &'static str {
        match self {
            SocialAction::SetFollowing(_) => "setFollowing",
            SocialAction::AddFollowing(_) => "addFollowing",
            SocialAction::RemoveFollowing(_) => "removeFollowing",
            SocialAction::SetFollowers(_) => "setFollowers",
            SocialAction::SetBlockedUsers(_) => "setBlockedUsers",
            SocialAction::AddBlockedUser(_) => "addBlockedUser",
            SocialAction::RemoveBlockedUser(_) => "removeBlockedUser",
        }
    }
}
