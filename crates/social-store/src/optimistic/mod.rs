//! Speculative mutation protocol
//!
//! Every optimistic change follows the same five steps:
//!
//! 1. read the entity from the current snapshot (absent: `NotFound`)
//! 2. predict the next value and capture the fields it touches
//! 3. dispatch `applyOptimistic`, which records the mutation as owner of
//!    those fields
//! 4. await the network effect
//! 5. dispatch `commitOptimistic` on success, or `revertOptimistic` plus the
//!    slice error on failure
//!
//! Commit and revert only write fields the mutation still owns, so when two
//! mutations race on one field the one dispatched last wins and a stale
//! rollback cannot clobber it.
//!
//! Removals use the same shape with [`remove_speculatively`]: the item's
//! position is remembered and the item is reinserted next to its former
//! neighbour when the effect fails.

mod ownership;
mod removal;
mod targets;
mod transaction;

pub use ownership::Ownership;
pub use removal::{remove_speculatively, NotificationRemoval, PostRemoval, RemovalTarget, StoryRemoval};
pub use targets::{NotificationTarget, PostTarget, SpeculativeTarget};
pub use transaction::{speculate, Transaction};

use std::hash::Hash;

/// Partial update of an entity, split into ownable logical fields
pub trait Patch: Clone + Send + Sync + 'static {
    type Field: Copy + Eq + Hash + std::fmt::Debug;

    /// Logical fields this patch writes
    fn fields(&self) -> Vec<Self::Field>;

    /// Copy keeping only the fields for which `keep` holds
    fn retain<F: Fn(Self::Field) -> bool>(&self, keep: F) -> Self;
}
