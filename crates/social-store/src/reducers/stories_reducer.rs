//! Stories Reducer

use crate::actions::StoriesAction;
use crate::list_ops;
use crate::state::StoriesState;

pub fn reduce_stories(mut state: StoriesState, action: &StoriesAction) -> StoriesState {
    match action {
        StoriesAction::SetStories(stories) => {
            state.items = list_ops::dedup_by_id(stories.clone());
            state.generation += 1;
        }
        StoriesAction::AddStory(story) => {
            list_ops::prepend_unique(&mut state.items, story.clone());
        }
        StoriesAction::RemoveStory { id } => {
            list_ops::remove_by_id(&mut state.items, id);
        }
        StoriesAction::RestoreStory { story, position } => {
            if !list_ops::reinsert(&mut state.items, state.generation, story.clone(), position) {
                log::debug!("Not restoring story {}", story.id);
            }
        }
        StoriesAction::SetLoading(loading) => {
            state.loading = *loading;
        }
        StoriesAction::SetError(error) => {
            state.error = error.clone();
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_models::StoryId;
    use crate::list_ops::ListPosition;
    use crate::testing::story;

    #[test]
    fn test_add_is_unique_and_most_recent_first() {
        let state = reduce_stories(StoriesState::default(), &StoriesAction::AddStory(story("s1")));
        let state = reduce_stories(state, &StoriesAction::AddStory(story("s2")));
        let state = reduce_stories(state, &StoriesAction::AddStory(story("s1")));
        let ids: Vec<&str> = state.items.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s2", "s1"]);
    }

    #[test]
    fn test_remove_then_restore() {
        let state = reduce_stories(
            StoriesState::default(),
            &StoriesAction::SetStories(vec![story("s1"), story("s2")]),
        );
        let position = ListPosition {
            index: 1,
            after: Some(StoryId::new("s1")),
            generation: state.generation,
        };
        let state = reduce_stories(state, &StoriesAction::RemoveStory { id: StoryId::new("s2") });
        assert_eq!(state.items.len(), 1);
        let restored = reduce_stories(
            state.clone(),
            &StoriesAction::RestoreStory {
                story: story("s2"),
                position: position.clone(),
            },
        );
        assert_eq!(restored.items[1].id.as_str(), "s2");

        // a reload in between wins over the restore
        let reloaded = reduce_stories(state, &StoriesAction::SetStories(vec![story("s9")]));
        let reloaded = reduce_stories(
            reloaded,
            &StoriesAction::RestoreStory {
                story: story("s2"),
                position,
            },
        );
        assert_eq!(reloaded.items.len(), 1);
        assert_eq!(reloaded.items[0].id.as_str(), "s9");
    }
}
