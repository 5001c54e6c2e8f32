//! Stories State

use crate::domain_models::Story;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoriesState {
    /// Unique by id, most recent first
    pub items: Vec<Story>,
    /// Bumped whenever `items` is replaced rather than edited
    pub generation: u64,
    pub loading: bool,
    pub error: Option<String>,
}
