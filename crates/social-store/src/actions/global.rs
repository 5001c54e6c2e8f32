//! Global actions
//!
//! Actions that touch every slice at once.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "camelCase")]
pub enum GlobalAction {
    /// Return every slice to its initial state (logout)
    ResetSession,
}

impl GlobalAction {
    pub fn name(&self) -> &'static str {
        match self {
            GlobalAction::ResetSession => "resetSession",
        }
    }
}
