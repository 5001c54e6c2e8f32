//! Post thunks: reactions, comments, edits, deletes, feeds

use super::{boxed, decode_field, decode_row, BoxFuture, SharedApi, ThunkResult};
use crate::actions::{Action, PostsAction, SocialAction};
use crate::domain_models::{Comment, FeedKind, Post, PostId, PostPatch, ProfileId, ReactionKind, ReactionState};
use crate::error::ThunkError;
use crate::optimistic::{remove_speculatively, speculate, PostRemoval, PostTarget};
use crate::pagination::{self, Page};
use crate::store::Store;
use crate::validation;
use serde_json::json;
use social_api::Method;

fn record_error(store: &Store, err: ThunkError) -> ThunkError {
    log::warn!("Posts: {}", err);
    store.dispatch(Action::Posts(PostsAction::SetError(Some(err.user_message()))));
    err
}

/// Like or dislike a post; the same reaction again removes it
///
/// Resolves to the reaction state that was applied.
pub fn toggle_reaction(
    api: SharedApi,
    post_id: PostId,
    reaction: ReactionKind,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<ReactionState>> {
    boxed(move |store: Store| async move {
        let target = post_id.clone();
        speculate::<PostTarget, _, _, _, _>(
            &store,
            post_id,
            move |post| PostPatch::reaction(post.reaction_state().toggle(reaction)),
            move |patch| async move {
                let applied = ReactionState {
                    like_count: patch.like_count.unwrap_or_default(),
                    dislike_count: patch.dislike_count.unwrap_or_default(),
                    user_reaction: patch.user_reaction.flatten(),
                };
                match applied.user_reaction {
                    Some(kind) => {
                        api.request(
                            Method::Post,
                            "/likes",
                            Some(json!({"post_id": target, "reaction_type": kind})),
                        )
                        .await?
                    }
                    None => {
                        api.request(Method::Delete, &format!("/likes?post_id={}", target), None)
                            .await?
                    }
                };
                Ok((applied, None))
            },
        )
        .await
    })
}

/// Comment on a post, bumping its comment count speculatively
///
/// Resolves to the created comment when the server echoed it back.
pub fn add_comment(
    api: SharedApi,
    post_id: PostId,
    content: String,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<Option<Comment>>> {
    boxed(move |store: Store| async move {
        validation::validate_comment(&content).map_err(|e| record_error(&store, e.into()))?;

        let target = post_id.clone();
        speculate::<PostTarget, _, _, _, _>(
            &store,
            post_id,
            |post| PostPatch::comment_count(post.comment_count.saturating_add(1)),
            move |_| async move {
                let value = api
                    .request(
                        Method::Post,
                        "/comments",
                        Some(json!({"post_id": target, "content": content.trim()})),
                    )
                    .await?;
                Ok((decode_row::<Comment>(value, "comment").ok(), None))
            },
        )
        .await
    })
}

/// Replace a post's content
pub fn edit_post(
    api: SharedApi,
    post_id: PostId,
    content: String,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<()>> {
    boxed(move |store: Store| async move {
        validation::validate_post(&content).map_err(|e| record_error(&store, e.into()))?;

        let target = post_id.clone();
        let body = json!({ "content": content });
        speculate::<PostTarget, _, _, _, _>(
            &store,
            post_id,
            move |_| PostPatch::content(content),
            move |_| async move {
                let value = api
                    .request(Method::Put, &format!("/posts/{}", target), Some(body))
                    .await?;
                let server_patch = decode_row::<Post>(value, "post")
                    .ok()
                    .map(|post| PostPatch::content(post.content));
                Ok(((), server_patch))
            },
        )
        .await
    })
}

/// Delete a post, removing it from the feed before the server confirms
pub fn delete_post(
    api: SharedApi,
    post_id: PostId,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<()>> {
    boxed(move |store: Store| async move {
        let path = format!("/posts/{}", post_id);
        let (in_feed, in_detail) = {
            let state = store.get_state();
            (
                state.posts.items.iter().any(|post| post.id == post_id),
                state
                    .posts
                    .current_post
                    .as_ref()
                    .is_some_and(|post| post.id == post_id),
            )
        };

        if in_feed {
            remove_speculatively::<PostRemoval, _, _>(&store, post_id, move || async move {
                api.request(Method::Delete, &path, None).await?;
                Ok(())
            })
            .await
        } else if in_detail {
            // only open in the detail view: nothing to restore into
            api.request(Method::Delete, &path, None)
                .await
                .map_err(|e| record_error(&store, e.into()))?;
            store.dispatch(Action::Posts(PostsAction::RemovePost { id: post_id }));
            Ok(())
        } else {
            Err(ThunkError::NotFound(format!("post {}", post_id)))
        }
    })
}

/// Publish a new post and prepend it to the feed
pub fn create_post(
    api: SharedApi,
    content: String,
    image_url: Option<String>,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<Post>> {
    boxed(move |store: Store| async move {
        validation::validate_post(&content).map_err(|e| record_error(&store, e.into()))?;

        let body = json!({ "content": content.trim(), "image_url": image_url });
        let post = async {
            let value = api.request(Method::Post, "/posts", Some(body)).await?;
            decode_row::<Post>(value, "post")
        }
        .await
        .map_err(|e| record_error(&store, e))?;

        store.dispatch(Action::Posts(PostsAction::AddPost(post.clone())));
        Ok(post)
    })
}

/// Load one post into the detail view
pub fn fetch_post(
    api: SharedApi,
    post_id: PostId,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<Post>> {
    boxed(move |store: Store| async move {
        let post = async {
            let value = api
                .request(Method::Get, &format!("/posts/{}", post_id), None)
                .await?;
            decode_field::<Post>(value, "post")
        }
        .await
        .map_err(|e| record_error(&store, e))?;

        store.dispatch(Action::Posts(PostsAction::SetCurrentPost(post.clone())));
        Ok(post)
    })
}

/// Block a user and drop their posts from the feed
///
/// Later pages skip the user's posts too. Resolves to the number of posts
/// removed.
pub fn block_user(
    api: SharedApi,
    profile_id: ProfileId,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<usize>> {
    boxed(move |store: Store| async move {
        api.request(Method::Post, &format!("/users/{}/block", profile_id), None)
            .await
            .map_err(|e| record_error(&store, e.into()))?;

        let before = store.get_state().posts.items.len();
        store.dispatch(Action::Social(SocialAction::AddBlockedUser(profile_id.clone())));
        store.dispatch(Action::Posts(PostsAction::RemoveByAuthor {
            author_id: profile_id,
        }));
        Ok(before.saturating_sub(store.get_state().posts.items.len()))
    })
}

/// Lift a block; the user's posts show up again from the next load
pub fn unblock_user(
    api: SharedApi,
    profile_id: ProfileId,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<()>> {
    boxed(move |store: Store| async move {
        api.request(Method::Delete, &format!("/users/{}/block", profile_id), None)
            .await
            .map_err(|e| record_error(&store, e.into()))?;

        store.dispatch(Action::Social(SocialAction::RemoveBlockedUser(profile_id)));
        Ok(())
    })
}

/// Fresh load of `feed`
pub fn fetch_feed(
    api: SharedApi,
    feed: FeedKind,
    limit: usize,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<Option<Page>>> {
    boxed(move |store: Store| async move {
        pagination::fetch_page(&store, api.as_ref(), feed, None, limit).await
    })
}

/// Fresh load of whichever feed is current
pub fn refresh_feed(
    api: SharedApi,
    limit: usize,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<Option<Page>>> {
    boxed(move |store: Store| async move {
        let feed = store.get_state().posts.feed.clone();
        pagination::fetch_page(&store, api.as_ref(), feed, None, limit).await
    })
}

/// Append the next page of the current feed
pub fn load_more(
    api: SharedApi,
    limit: usize,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<Option<Page>>> {
    boxed(move |store: Store| async move { pagination::load_more(&store, api.as_ref(), limit).await })
}
