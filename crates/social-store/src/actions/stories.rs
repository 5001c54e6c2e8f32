//! Stories slice actions

use crate::domain_models::{Story, StoryId};
use crate::list_ops::ListPosition;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "camelCase")]
pub enum StoriesAction {
    SetStories(Vec<Story>),
    AddStory(Story),
    RemoveStory {
        id: StoryId,
    },
    RestoreStory {
        story: Story,
        position: ListPosition<StoryId>,
    },
    SetLoading(bool),
    SetError(Option<String>),
}

impl StoriesAction {
    pub fn name(&self) -> &'static str {
        match self {
            StoriesAction::SetStories(_) => "setStories",
            StoriesAction::AddStory(_) => "addStory",
            StoriesAction::RemoveStory { .. } => "removeStory",
            StoriesAction::RestoreStory { .. } => "restoreStory",
            StoriesAction::SetLoading(_) => "setLoading",
            StoriesAction::SetError(_) => "setError",
        }
    }
}
