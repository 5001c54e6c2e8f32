//! Story thunks

use super::{boxed, decode_field, decode_row, BoxFuture, SharedApi, ThunkResult};
use crate::actions::{Action, StoriesAction};
use crate::domain_models::{NewStory, Story, StoryId};
use crate::error::ThunkError;
use crate::optimistic::{remove_speculatively, StoryRemoval};
use crate::store::Store;
use crate::validation;
use social_api::Method;

fn record_error(store: &Store, err: ThunkError) -> ThunkError {
    log::warn!("Stories: {}", err);
    store.dispatch(Action::Stories(StoriesAction::SetError(Some(err.user_message()))));
    err
}

pub fn fetch_stories(
    api: SharedApi,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<Vec<Story>>> {
    boxed(move |store: Store| async move {
        store.dispatch(Action::Stories(StoriesAction::SetLoading(true)));

        let result = async {
            let value = api.request(Method::Get, "/stories", None).await?;
            decode_field::<Vec<Story>>(value, "stories")
        }
        .await;

        let outcome = match result {
            Ok(stories) => {
                store.dispatch(Action::Stories(StoriesAction::SetStories(stories.clone())));
                store.dispatch(Action::Stories(StoriesAction::SetError(None)));
                Ok(stories)
            }
            Err(err) => Err(record_error(&store, err)),
        };
        store.dispatch(Action::Stories(StoriesAction::SetLoading(false)));
        outcome
    })
}

/// Publish a story (pending, then fulfilled or rejected)
pub fn create_story(
    api: SharedApi,
    story: NewStory,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<Story>> {
    boxed(move |store: Store| async move {
        validation::validate_story(story.media_url.as_deref(), story.text.as_deref())
            .map_err(|e| record_error(&store, e.into()))?;

        store.dispatch(Action::Stories(StoriesAction::SetLoading(true)));

        let result = async {
            let body = serde_json::to_value(&story)?;
            let value = api.request(Method::Post, "/stories", Some(body)).await?;
            decode_row::<Story>(value, "story")
        }
        .await;

        let outcome = match result {
            Ok(created) => {
                store.dispatch(Action::Stories(StoriesAction::AddStory(created.clone())));
                store.dispatch(Action::Stories(StoriesAction::SetError(None)));
                Ok(created)
            }
            Err(err) => Err(record_error(&store, err)),
        };
        store.dispatch(Action::Stories(StoriesAction::SetLoading(false)));
        outcome
    })
}

/// Delete a story, restoring it in place if the server refuses
pub fn delete_story(
    api: SharedApi,
    id: StoryId,
) -> impl FnOnce(Store) -> BoxFuture<'static, ThunkResult<()>> {
    boxed(move |store: Store| async move {
        let path = format!("/stories?story_id={}", id);
        remove_speculatively::<StoryRemoval, _, _>(&store, id, move || async move {
            api.request(Method::Delete, &path, None).await?;
            Ok(())
        })
        .await
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{story, MockApi};
    use serde_json::json;
    use std::sync::Arc;

    fn setup() -> (Store, MockApi, SharedApi) {
        let mock = MockApi::new();
        let api: SharedApi = Arc::new(mock.clone());
        (Store::default(), mock, api)
    }

    #[tokio::test]
    async fn test_fetch_stories() {
        let (store, mock, api) = setup();
        mock.respond(
            Method::Get,
            "/stories",
            200,
            json!({"data": [story("s1"), story("s2")]}),
        );
        let stories = store.thunk(fetch_stories(api)).await.unwrap();
        assert_eq!(stories.len(), 2);
        assert_eq!(store.get_state().stories.items.len(), 2);
    }

    #[tokio::test]
    async fn test_create_story_rejected() {
        let (store, mock, api) = setup();
        mock.respond(Method::Post, "/stories", 413, json!({"error": "Image too large"}));

        let result = store
            .thunk(create_story(
                api,
                NewStory {
                    media_url: Some("https://cdn.example/big.png".to_string()),
                    text: None,
                },
            ))
            .await;
        assert!(result.is_err());
        let state = store.get_state();
        assert!(!state.stories.loading);
        assert_eq!(state.stories.error.as_deref(), Some("Image too large"));
        assert_eq!(mock.calls()[0].body, Some(json!({"media_url": "https://cdn.example/big.png"})));
    }

    #[tokio::test]
    async fn test_create_empty_story_is_invalid() {
        let (store, mock, api) = setup();
        let result = store.thunk(create_story(api, NewStory::default())).await;
        assert!(matches!(result, Err(ThunkError::Validation(_))));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_story_success() {
        let (store, mock, api) = setup();
        store.dispatch(Action::Stories(StoriesAction::SetStories(vec![story("s1")])));
        mock.respond(Method::Delete, "/stories?story_id=s1", 200, json!({}));

        store.thunk(delete_story(api, StoryId::new("s1"))).await.unwrap();
        assert!(store.get_state().stories.items.is_empty());
    }
}
