use crate::actions::{Action, GlobalAction};
use crate::reducers::{
    auth_reducer, notifications_reducer, posts_reducer, social_reducer, stories_reducer,
};
use crate::state::AppState;

/// Root reducer - routes each action to the one slice it addresses
///
/// Slices not addressed by the action are moved through untouched, except
/// that the posts list is kept free of blocked authors.
pub fn reduce(mut state: AppState, action: &Action) -> AppState {
    match action {
        Action::Global(GlobalAction::ResetSession) => {
            log::debug!("Resetting all slices");
            return reset(&state);
        }
        Action::Posts(action) => {
            let posts = posts_reducer::reduce_posts(state.posts, action);
            state.posts = posts_reducer::hide_blocked(posts, &state.social.blocked);
        }
        Action::Social(action) => {
            state.social = social_reducer::reduce_social(state.social, action);
            state.posts = posts_reducer::hide_blocked(state.posts, &state.social.blocked);
        }
        Action::Notifications(action) => {
            state.notifications =
                notifications_reducer::reduce_notifications(state.notifications, action);
        }
        Action::Auth(action) => {
            state.auth = auth_reducer::reduce_auth(state.auth, action);
        }
        Action::Stories(action) => {
            state.stories = stories_reducer::reduce_stories(state.stories, action);
        }
    }
    state
}

/// Initial state, with list generations moved past the ones being dropped
fn reset(previous: &AppState) -> AppState {
    let mut state = AppState::default();
    state.posts.generation = previous.posts.generation + 1;
    state.notifications.generation = previous.notifications.generation + 1;
    state.stories.generation = previous.stories.generation + 1;
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{NotificationsAction, PostsAction, SocialAction};
    use crate::domain_models::ProfileId;
    use crate::testing::{notification, post};

    #[test]
    fn test_action_touches_only_its_slice() {
        let state = reduce(
            AppState::default(),
            &Action::Notifications(NotificationsAction::AddNotification(notification("n1"))),
        );
        let next = reduce(
            state.clone(),
            &Action::Posts(PostsAction::SetPosts(vec![post("p1")])),
        );
        assert_eq!(next.notifications, state.notifications);
        assert_eq!(next.posts.items.len(), 1);
    }

    #[test]
    fn test_reset_session_restores_initial_state() {
        let state = reduce(
            AppState::default(),
            &Action::Posts(PostsAction::SetPosts(vec![post("p1")])),
        );
        let state = reduce(
            state,
            &Action::Social(SocialAction::AddFollowing(ProfileId::new("a"))),
        );
        let state = reduce(state, &Action::Global(GlobalAction::ResetSession));

        let mut expected = AppState::default();
        expected.posts.generation = 2;
        expected.notifications.generation = 1;
        expected.stories.generation = 1;
        assert_eq!(state, expected);
    }

    #[test]
    fn test_blocked_authors_never_enter_feed() {
        let mut troll_post = post("t1");
        troll_post.author_id = ProfileId::new("troll");

        let state = reduce(
            AppState::default(),
            &Action::Posts(PostsAction::SetPosts(vec![post("A"), troll_post.clone()])),
        );
        let state = reduce(
            state,
            &Action::Social(SocialAction::AddBlockedUser(ProfileId::new("troll"))),
        );
        assert_eq!(state.posts.items.len(), 1);

        let mut later = troll_post.clone();
        later.id = "t2".into();
        let state = reduce(
            state,
            &Action::Posts(PostsAction::AppendPosts(vec![post("B"), later])),
        );
        let state = reduce(
            state,
            &Action::Posts(PostsAction::SetPosts(vec![troll_post.clone(), post("C")])),
        );
        let ids: Vec<&str> = state.posts.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["C"]);

        // unblocked authors come back with the next load
        let state = reduce(
            state,
            &Action::Social(SocialAction::RemoveBlockedUser(ProfileId::new("troll"))),
        );
        let state = reduce(
            state,
            &Action::Posts(PostsAction::SetPosts(vec![troll_post, post("C")])),
        );
        assert_eq!(state.posts.items.len(), 2);
    }
}
