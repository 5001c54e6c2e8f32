//! Id-unique list operations shared by the slice reducers

use crate::domain_models::Identified;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// Where an item sat before it was optimistically removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPosition<Id> {
    pub index: usize,
    /// Id of the item directly in front of it, `None` when it was first
    pub after: Option<Id>,
    /// Generation of the list the item was taken from
    #[serde(default)]
    pub generation: u64,
}

/// Keep the first occurrence of every id
pub fn dedup_by_id<T>(items: Vec<T>) -> Vec<T>
where
    T: Identified,
    T::Id: Hash + Eq,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.id().clone()))
        .collect()
}

/// Append `incoming`, skipping ids already present (also within `incoming`)
///
/// Returns the number of items actually appended.
pub fn merge_unique_append<T>(items: &mut Vec<T>, incoming: &[T]) -> usize
where
    T: Identified + Clone,
    T::Id: Hash + Eq,
{
    let mut seen: HashSet<T::Id> = items.iter().map(|item| item.id().clone()).collect();
    let before = items.len();
    for item in incoming {
        if seen.insert(item.id().clone()) {
            items.push(item.clone());
        }
    }
    items.len() - before
}

/// Insert at the head unless the id is already present
pub fn prepend_unique<T: Identified>(items: &mut Vec<T>, item: T) -> bool {
    if items.iter().any(|existing| existing.id() == item.id()) {
        return false;
    }
    items.insert(0, item);
    true
}

/// Copy of the item with `id` and its position in a list of `generation`
pub fn locate<T: Identified + Clone>(
    items: &[T],
    id: &T::Id,
    generation: u64,
) -> Option<(T, ListPosition<T::Id>)> {
    let index = items.iter().position(|item| item.id() == id)?;
    let after = index
        .checked_sub(1)
        .and_then(|prev| items.get(prev))
        .map(|prev| prev.id().clone());
    Some((
        items[index].clone(),
        ListPosition {
            index,
            after,
            generation,
        },
    ))
}

/// Remove by id
pub fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: &T::Id) -> Option<T> {
    let index = items.iter().position(|item| item.id() == id)?;
    Some(items.remove(index))
}

/// Put a removed item back into a list currently at `generation`
///
/// After its former neighbour when that neighbour is still present, at the
/// head when it was first, otherwise at the original index clamped to the
/// list length. No-op when the id already exists, or when the list was
/// replaced (reset, reload, feed switch) since the item was taken out.
pub fn reinsert<T: Identified>(
    items: &mut Vec<T>,
    generation: u64,
    item: T,
    position: &ListPosition<T::Id>,
) -> bool {
    if position.generation != generation {
        return false;
    }
    if items.iter().any(|existing| existing.id() == item.id()) {
        return false;
    }

    let index = match position.after {
        None => 0,
        Some(ref after) => match items.iter().position(|existing| existing.id() == after) {
            Some(neighbour) => neighbour + 1,
            None => position.index.min(items.len()),
        },
    };
    items.insert(index, item);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(&'static str);

    impl Identified for Item {
        type Id = &'static str;

        fn id(&self) -> &&'static str {
            &self.0
        }
    }

    fn ids(items: &[Item]) -> Vec<&'static str> {
        items.iter().map(|item| item.0).collect()
    }

    #[test]
    fn test_merge_skips_existing_and_inner_duplicates() {
        let mut items = vec![Item("a"), Item("b")];
        let added = merge_unique_append(&mut items, &[Item("b"), Item("c"), Item("c")]);
        assert_eq!(added, 1);
        assert_eq!(ids(&items), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_dedup_keeps_first() {
        let items = dedup_by_id(vec![Item("a"), Item("b"), Item("a")]);
        assert_eq!(ids(&items), vec!["a", "b"]);
    }

    fn take(items: &mut Vec<Item>, id: &'static str) -> (Item, ListPosition<&'static str>) {
        let located = locate(items, &id, 3).unwrap();
        remove_by_id(items, &id);
        located
    }

    #[test]
    fn test_remove_then_reinsert_after_neighbour() {
        let mut items = vec![Item("a"), Item("b"), Item("c")];
        let (removed, position) = take(&mut items, "b");
        assert_eq!(
            position,
            ListPosition {
                index: 1,
                after: Some("a"),
                generation: 3
            }
        );

        // a new item landed at the head meanwhile
        items.insert(0, Item("z"));
        assert!(reinsert(&mut items, 3, removed, &position));
        assert_eq!(ids(&items), vec!["z", "a", "b", "c"]);
    }

    #[test]
    fn test_reinsert_first_item_goes_to_head() {
        let mut items = vec![Item("a"), Item("b")];
        let (removed, position) = take(&mut items, "a");
        items.insert(0, Item("z"));
        reinsert(&mut items, 3, removed, &position);
        assert_eq!(ids(&items), vec!["a", "z", "b"]);
    }

    #[test]
    fn test_reinsert_clamps_when_neighbour_gone() {
        let mut items = vec![Item("a"), Item("b"), Item("c")];
        let (removed, position) = take(&mut items, "c");
        items.retain(|item| item.0 == "a");
        items.push(Item("x"));
        reinsert(&mut items, 3, removed, &position);
        assert_eq!(ids(&items), vec!["a", "x", "c"]);
    }

    #[test]
    fn test_reinsert_is_noop_when_id_present() {
        let mut items = vec![Item("a")];
        let position = ListPosition {
            index: 0,
            after: None,
            generation: 0,
        };
        assert!(!reinsert(&mut items, 0, Item("a"), &position));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_reinsert_into_replaced_list_is_noop() {
        let mut items = vec![Item("a"), Item("b")];
        let (removed, position) = take(&mut items, "b");
        items = vec![Item("x")];
        assert!(!reinsert(&mut items, 4, removed, &position));
        assert_eq!(ids(&items), vec!["x"]);
    }
}
