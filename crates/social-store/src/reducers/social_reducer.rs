//! Social graph Reducer

use crate::actions::SocialAction;
use crate::state::SocialState;

pub fn reduce_social(mut state: SocialState, action: &SocialAction) -> SocialState {
    match action {
        SocialAction::SetFollowing(ids) => {
            state.following = ids.iter().cloned().collect();
        }
        SocialAction::AddFollowing(id) => {
            state.following.insert(id.clone());
        }
        SocialAction::RemoveFollowing(id) => {
            state.following.remove(id);
        }
        SocialAction::SetFollowers(ids) => {
            state.followers = ids.iter().cloned().collect();
        }
        SocialAction::SetBlockedUsers(ids) => {
            state.blocked = ids.iter().cloned().collect();
        }
        SocialAction::AddBlockedUser(id) => {
            state.blocked.insert(id.clone());
        }
        SocialAction::RemoveBlockedUser(id) => {
            state.blocked.remove(id);
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_models::ProfileId;

    #[test]
    fn test_follow_sets_are_unique() {
        let state = reduce_social(
            SocialState::default(),
            &SocialAction::SetFollowing(vec![ProfileId::new("a"), ProfileId::new("a")]),
        );
        let state = reduce_social(state, &SocialAction::AddFollowing(ProfileId::new("a")));
        let state = reduce_social(state, &SocialAction::AddFollowing(ProfileId::new("b")));
        assert_eq!(state.following.len(), 2);

        let state = reduce_social(state, &SocialAction::RemoveFollowing(ProfileId::new("a")));
        assert!(!state.is_following(&ProfileId::new("a")));
        assert!(state.is_following(&ProfileId::new("b")));
    }

    #[test]
    fn test_block_and_unblock() {
        let troll = ProfileId::new("troll");
        let state = reduce_social(SocialState::default(), &SocialAction::AddBlockedUser(troll.clone()));
        assert!(state.is_blocked(&troll));
        let state = reduce_social(state, &SocialAction::RemoveBlockedUser(troll.clone()));
        assert!(!state.is_blocked(&troll));
    }
}
