//! Field ownership ledger
//!
//! Records which in-flight mutation last wrote each (entity, field) pair.
//! A later claim takes a field over; commit and revert only touch fields
//! their mutation still owns.

use super::Patch;
use crate::domain_models::MutationId;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq)]
pub struct Ownership<K, F>
where
    K: Eq + Hash,
    F: Eq + Hash,
{
    owners: HashMap<(K, F), MutationId>,
}

impl<K, F> Default for Ownership<K, F>
where
    K: Eq + Hash,
    F: Eq + Hash,
{
    fn default() -> Self {
        Self {
            owners: HashMap::new(),
        }
    }
}

impl<K, F> Ownership<K, F>
where
    K: Eq + Hash + Clone,
    F: Eq + Hash + Copy,
{
    /// Make `mutation` the owner of every field `patch` touches
    pub fn claim<P>(&mut self, key: &K, mutation: MutationId, patch: &P)
    where
        P: Patch<Field = F>,
    {
        for field in patch.fields() {
            if let Some(previous) = self.owners.insert((key.clone(), field), mutation) {
                if previous != mutation {
                    log::debug!("Mutation {} takes over a field from {}", mutation, previous);
                }
            }
        }
    }

    pub fn owner(&self, key: &K, field: F) -> Option<MutationId> {
        self.owners.get(&(key.clone(), field)).copied()
    }

    /// The part of `patch` whose fields `mutation` still owns
    pub fn owned_patch<P>(&self, key: &K, mutation: MutationId, patch: &P) -> P
    where
        P: Patch<Field = F>,
    {
        patch.retain(|field| self.owner(key, field) == Some(mutation))
    }

    /// Drop every claim `mutation` holds on `key`
    pub fn release(&mut self, key: &K, mutation: MutationId) {
        self.owners
            .retain(|(owned_key, _), owner| !(owned_key == key && *owner == mutation));
    }

    /// Drop every claim on `key`, whoever holds it
    pub fn forget(&mut self, key: &K) {
        self.owners.retain(|(owned_key, _), _| owned_key != key);
    }

    pub fn clear(&mut self) {
        self.owners.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
