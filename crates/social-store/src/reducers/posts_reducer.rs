//! Posts Reducer

use crate::actions::PostsAction;
use crate::domain_models::{Post, PostId, ProfileId};
use crate::list_ops;
use crate::state::PostsState;
use std::collections::BTreeSet;

/// Reducer for the posts slice.
///
/// Total: an action addressing a post that is not loaded leaves the state
/// as it is (ownership is still released).
pub fn reduce_posts(mut state: PostsState, action: &PostsAction) -> PostsState {
    match action {
        PostsAction::BeginFeedLoad(feed) => {
            state.pending_feed = Some(feed.clone());
            state.loading = true;
        }
        PostsAction::SetFeed(feed) => {
            if &state.feed != feed {
                log::debug!("Switching feed {} -> {}", state.feed, feed);
                state.feed = feed.clone();
                state.items.clear();
                state.generation += 1;
                state.cursor = None;
                state.has_more = false;
                state.error = None;
            }
            if state.pending_feed.as_ref() == Some(feed) {
                state.pending_feed = None;
            }
        }
        PostsAction::SetPosts(posts) => {
            state.items = list_ops::dedup_by_id(posts.clone());
            state.generation += 1;
        }
        PostsAction::AppendPosts(posts) => {
            let added = list_ops::merge_unique_append(&mut state.items, posts);
            if added < posts.len() {
                log::debug!("Skipped {} already loaded posts", posts.len() - added);
            }
        }
        PostsAction::AddPost(post) => {
            list_ops::prepend_unique(&mut state.items, post.clone());
        }
        PostsAction::UpdatePost { id, updates } => {
            update_post(&mut state, id, |post| updates.apply_to(post));
        }
        PostsAction::RemovePost { id } => {
            list_ops::remove_by_id(&mut state.items, id);
            if state.current_post.as_ref().is_some_and(|post| &post.id == id) {
                state.current_post = None;
            }
            state.owners.forget(id);
        }
        PostsAction::RestorePost {
            post,
            position,
            was_current,
        } => {
            if position.generation != state.generation {
                log::debug!("Feed replaced since post {} was removed, not restoring", post.id);
            } else {
                if !list_ops::reinsert(&mut state.items, state.generation, post.clone(), position) {
                    log::debug!("Post {} already present, not restoring", post.id);
                }
                if *was_current && state.current_post.is_none() {
                    state.current_post = Some(post.clone());
                }
            }
        }
        PostsAction::SetCurrentPost(post) => {
            state.current_post = Some(post.clone());
        }
        PostsAction::ClearCurrentPost => {
            state.current_post = None;
        }
        PostsAction::SetCursor(cursor) => {
            state.cursor = cursor.clone();
        }
        PostsAction::SetHasMore(has_more) => {
            state.has_more = *has_more;
        }
        PostsAction::SetLoading(loading) => {
            state.loading = *loading;
            if !loading {
                state.pending_feed = None;
            }
        }
        PostsAction::SetError(error) => {
            state.error = error.clone();
        }
        PostsAction::ClearError => {
            state.error = None;
        }
        PostsAction::ApplyOptimistic { id, mutation, patch } => {
            if update_post(&mut state, id, |post| patch.apply_to(post)) {
                state.owners.claim(id, *mutation, patch);
            } else {
                log::debug!("Optimistic {} skipped: post {} not loaded", mutation, id);
            }
        }
        PostsAction::CommitOptimistic {
            id,
            mutation,
            server_patch,
        } => {
            if let Some(server_patch) = server_patch {
                let owned = state.owners.owned_patch(id, *mutation, server_patch);
                update_post(&mut state, id, |post| owned.apply_to(post));
            }
            state.owners.release(id, *mutation);
        }
        PostsAction::RevertOptimistic {
            id,
            mutation,
            snapshot,
        } => {
            let owned = state.owners.owned_patch(id, *mutation, snapshot);
            if owned.is_empty() {
                log::debug!("Revert of {} on post {} is stale, nothing to restore", mutation, id);
            } else {
                update_post(&mut state, id, |post| owned.apply_to(post));
            }
            state.owners.release(id, *mutation);
        }
        PostsAction::RemoveByAuthor { author_id } => {
            let removed = remove_authors(&mut state, |author| author == author_id);
            if state
                .current_post
                .as_ref()
                .is_some_and(|post| &post.author_id == author_id)
            {
                state.current_post = None;
            }
            log::debug!("Removed {} posts by {}", removed, author_id);
        }
    }
    state
}

/// Drop every listed post by a blocked author
///
/// The detail view is left alone: opening a blocked author's post directly
/// is still allowed.
pub fn hide_blocked(mut state: PostsState, blocked: &BTreeSet<ProfileId>) -> PostsState {
    if !blocked.is_empty() {
        let removed = remove_authors(&mut state, |author| blocked.contains(author));
        if removed > 0 {
            log::debug!("Filtered {} posts by blocked authors", removed);
        }
    }
    state
}

fn remove_authors<F: Fn(&ProfileId) -> bool>(state: &mut PostsState, matches: F) -> usize {
    let removed: Vec<PostId> = state
        .items
        .iter()
        .filter(|post| matches(&post.author_id))
        .map(|post| post.id.clone())
        .collect();
    state.items.retain(|post| !matches(&post.author_id));
    for id in &removed {
        state.owners.forget(id);
    }
    removed.len()
}

/// Apply `f` to the post in the list and in the detail view; false when neither holds it
fn update_post<F: Fn(&mut Post)>(state: &mut PostsState, id: &PostId, f: F) -> bool {
    let mut found = false;
    if let Some(post) = state.items.iter_mut().find(|post| &post.id == id) {
        f(post);
        found = true;
    }
    if let Some(post) = state.current_post.as_mut().filter(|post| &post.id == id) {
        f(post);
        found = true;
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_models::{FeedKind, MutationId, PostPatch, ReactionKind};
    use crate::list_ops::ListPosition;
    use crate::testing::post;

    fn ids(state: &PostsState) -> Vec<&str> {
        state.items.iter().map(|post| post.id.as_str()).collect()
    }

    fn loaded(items: &[&str]) -> PostsState {
        reduce_posts(
            PostsState::default(),
            &PostsAction::SetPosts(items.iter().map(|id| post(id)).collect()),
        )
    }

    #[test]
    fn test_append_is_idempotent() {
        let state = loaded(&["A", "B"]);
        let state = reduce_posts(
            state,
            &PostsAction::AppendPosts(vec![post("B"), post("C")]),
        );
        assert_eq!(ids(&state), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_set_posts_dedups() {
        let state = loaded(&["A", "B", "A"]);
        assert_eq!(ids(&state), vec!["A", "B"]);
    }

    #[test]
    fn test_set_feed_clears_only_on_change() {
        let mut state = loaded(&["A"]);
        state.cursor = Some("c1".to_string());
        state.has_more = true;

        let same = reduce_posts(state.clone(), &PostsAction::SetFeed(FeedKind::Home));
        assert_eq!(same, state);

        let switched = reduce_posts(state, &PostsAction::SetFeed(FeedKind::Following));
        assert_eq!(switched.feed, FeedKind::Following);
        assert!(switched.items.is_empty());
        assert_eq!(switched.cursor, None);
        assert!(!switched.has_more);
    }

    #[test]
    fn test_list_replacements_bump_generation() {
        let state = loaded(&["A"]);
        assert_eq!(state.generation, 1);

        let state = reduce_posts(state, &PostsAction::AppendPosts(vec![post("B")]));
        let state = reduce_posts(state, &PostsAction::AddPost(post("C")));
        let state = reduce_posts(state, &PostsAction::SetFeed(FeedKind::Home));
        assert_eq!(state.generation, 1);

        let state = reduce_posts(state, &PostsAction::SetFeed(FeedKind::Following));
        assert_eq!(state.generation, 2);
    }

    #[test]
    fn test_begin_feed_load_keeps_items() {
        let state = loaded(&["A", "B"]);
        let state = reduce_posts(state, &PostsAction::BeginFeedLoad(FeedKind::Following));
        assert_eq!(ids(&state), vec!["A", "B"]);
        assert_eq!(state.feed, FeedKind::Home);
        assert_eq!(state.pending_feed, Some(FeedKind::Following));
        assert!(state.loading);

        let state = reduce_posts(state, &PostsAction::SetLoading(false));
        assert_eq!(state.pending_feed, None);
    }

    #[test]
    fn test_restore_into_replaced_list_is_dropped() {
        let state = loaded(&["A", "B"]);
        let position = ListPosition {
            index: 1,
            after: Some(PostId::new("A")),
            generation: state.generation,
        };
        let state = reduce_posts(state, &PostsAction::RemovePost { id: PostId::new("B") });
        let state = reduce_posts(state, &PostsAction::SetPosts(vec![post("X")]));

        let state = reduce_posts(
            state,
            &PostsAction::RestorePost {
                post: post("B"),
                position,
                was_current: true,
            },
        );
        assert_eq!(ids(&state), vec!["X"]);
        assert!(state.current_post.is_none());
    }

    #[test]
    fn test_restore_reopens_detail_view() {
        let mut state = loaded(&["A", "B"]);
        state.current_post = Some(post("B"));
        let position = ListPosition {
            index: 1,
            after: Some(PostId::new("A")),
            generation: state.generation,
        };
        let state = reduce_posts(state, &PostsAction::RemovePost { id: PostId::new("B") });
        assert!(state.current_post.is_none());

        let state = reduce_posts(
            state,
            &PostsAction::RestorePost {
                post: post("B"),
                position,
                was_current: true,
            },
        );
        assert_eq!(ids(&state), vec!["A", "B"]);
        assert_eq!(state.current_post, Some(post("B")));
    }

    #[test]
    fn test_restore_does_not_replace_other_open_post() {
        let state = loaded(&["A", "B"]);
        let position = ListPosition {
            index: 1,
            after: Some(PostId::new("A")),
            generation: state.generation,
        };
        let state = reduce_posts(state, &PostsAction::RemovePost { id: PostId::new("B") });
        let state = reduce_posts(state, &PostsAction::SetCurrentPost(post("A")));

        let state = reduce_posts(
            state,
            &PostsAction::RestorePost {
                post: post("B"),
                position,
                was_current: true,
            },
        );
        assert_eq!(state.current_post, Some(post("A")));
    }

    #[test]
    fn test_hide_blocked_keeps_detail_view() {
        let mut state = loaded(&["A", "B"]);
        state.items[0].author_id = ProfileId::new("troll");
        state.current_post = Some(state.items[0].clone());

        let blocked: BTreeSet<ProfileId> = [ProfileId::new("troll")].into_iter().collect();
        let state = hide_blocked(state, &blocked);
        assert_eq!(ids(&state), vec!["B"]);
        assert!(state.current_post.is_some());
    }

    #[test]
    fn test_update_keeps_current_post_in_sync() {
        let mut state = loaded(&["A"]);
        state.current_post = Some(post("A"));
        let state = reduce_posts(
            state,
            &PostsAction::UpdatePost {
                id: PostId::new("A"),
                updates: PostPatch::content("edited"),
            },
        );
        assert_eq!(state.items[0].content, "edited");
        assert_eq!(state.current_post.unwrap().content, "edited");
    }

    #[test]
    fn test_remove_clears_current_post() {
        let mut state = loaded(&["A", "B"]);
        state.current_post = Some(post("A"));
        let state = reduce_posts(state, &PostsAction::RemovePost { id: PostId::new("A") });
        assert_eq!(ids(&state), vec!["B"]);
        assert!(state.current_post.is_none());
    }

    #[test]
    fn test_optimistic_on_missing_post_is_noop() {
        let state = loaded(&["A"]);
        let mutation = MutationId::next();
        let next = reduce_posts(
            state.clone(),
            &PostsAction::ApplyOptimistic {
                id: PostId::new("gone"),
                mutation,
                patch: PostPatch::content("x"),
            },
        );
        assert_eq!(next, state);

        let next = reduce_posts(
            next,
            &PostsAction::RevertOptimistic {
                id: PostId::new("gone"),
                mutation,
                snapshot: PostPatch::content("y"),
            },
        );
        assert_eq!(next, state);
    }

    #[test]
    fn test_stale_revert_keeps_newer_owner() {
        let state = loaded(&["A"]);
        let id = PostId::new("A");
        let first = MutationId::next();
        let second = MutationId::next();
        let before = state.items[0].reaction_state();
        let liked = before.toggle(ReactionKind::Like);
        let cleared = liked.toggle(ReactionKind::Like);

        let state = reduce_posts(
            state,
            &PostsAction::ApplyOptimistic {
                id: id.clone(),
                mutation: first,
                patch: PostPatch::reaction(liked),
            },
        );
        let state = reduce_posts(
            state,
            &PostsAction::ApplyOptimistic {
                id: id.clone(),
                mutation: second,
                patch: PostPatch::reaction(cleared),
            },
        );
        // first fails after second took the field over
        let state = reduce_posts(
            state,
            &PostsAction::RevertOptimistic {
                id: id.clone(),
                mutation: first,
                snapshot: PostPatch::reaction(before),
            },
        );
        assert_eq!(state.items[0].reaction_state(), cleared);

        let state = reduce_posts(
            state,
            &PostsAction::CommitOptimistic {
                id,
                mutation: second,
                server_patch: None,
            },
        );
        assert!(state.owners.is_empty());
    }

    #[test]
    fn test_commit_applies_only_owned_server_fields() {
        let state = loaded(&["A"]);
        let id = PostId::new("A");
        let edit = MutationId::next();
        let state = reduce_posts(
            state,
            &PostsAction::ApplyOptimistic {
                id: id.clone(),
                mutation: edit,
                patch: PostPatch::content("draft"),
            },
        );
        let server_patch = PostPatch {
            content: Some("saved".to_string()),
            like_count: Some(99),
            ..PostPatch::default()
        };
        let state = reduce_posts(
            state,
            &PostsAction::CommitOptimistic {
                id,
                mutation: edit,
                server_patch: Some(server_patch),
            },
        );
        assert_eq!(state.items[0].content, "saved");
        assert_eq!(state.items[0].like_count, 0);
    }

    #[test]
    fn test_remove_by_author() {
        let mut state = loaded(&["A", "B", "C"]);
        state.items[1].author_id = ProfileId::new("blocked");
        let state = reduce_posts(
            state,
            &PostsAction::RemoveByAuthor {
                author_id: ProfileId::new("blocked"),
            },
        );
        assert_eq!(ids(&state), vec!["A", "C"]);
    }
}
