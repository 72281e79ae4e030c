//! Pluggable sort strategies for the packed array.
//!
//! The set's sorting entry points accept any [`SortAlgorithm`]; the
//! strategy only rearranges the slice it is handed, while the set itself
//! replays the resulting permutation onto the sparse index and the
//! subscriber. [`StdSort`] delegates to the standard library's unstable
//! sort and is the default; [`InsertionSort`] is the alternative for
//! nearly-sorted data, where it approaches linear time.

use crate::store::entity::Entity;

/// Strategy interface for sorting a packed prefix.
///
/// `compare` is a strict-weak-ordering "less than" predicate. The
/// strategy must leave `entities` ascending under it.
pub trait SortAlgorithm {
    /// Sorts `entities` in place so that `compare(entities[i + 1],
    /// entities[i])` is false for every `i`.
    fn sort(&mut self, entities: &mut [Entity], compare: &mut dyn FnMut(Entity, Entity) -> bool);
}

/// Default strategy: the standard library's unstable sort.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdSort;

impl SortAlgorithm for StdSort {
    fn sort(&mut self, entities: &mut [Entity], compare: &mut dyn FnMut(Entity, Entity) -> bool) {
        entities.sort_unstable_by(|&lhs, &rhs| {
            if compare(lhs, rhs) {
                std::cmp::Ordering::Less
            } else if compare(rhs, lhs) {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        });
    }
}

/// In-place insertion sort; preferable when the prefix is already mostly
/// ordered.
#[derive(Clone, Copy, Debug, Default)]
pub struct InsertionSort;

impl SortAlgorithm for InsertionSort {
    fn sort(&mut self, entities: &mut [Entity], compare: &mut dyn FnMut(Entity, Entity) -> bool) {
        for sorted in 1..entities.len() {
            let mut slot = sorted;
            while slot > 0 && compare(entities[slot], entities[slot - 1]) {
                entities.swap(slot, slot - 1);
                slot -= 1;
            }
        }
    }
}
