//! Social graph State

use crate::domain_models::ProfileId;
use std::collections::BTreeSet;

/// Who the signed-in user follows, is followed by, and has blocked
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SocialState {
    pub following: BTreeSet<ProfileId>,
    pub followers: BTreeSet<ProfileId>,
    /// Posts by these authors never enter the feed
    pub blocked: BTreeSet<ProfileId>,
}

impl SocialState {
    pub fn is_blocked(&self, id: &ProfileId) -> bool {
        self.blocked.contains(id)
    }

    pub fn is_following(&self, id: &ProfileId) -> bool {
        self.following.contains(id)
    }
}
