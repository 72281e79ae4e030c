#![allow(dead_code)]

use entity_set::{Entity, SparseSet};

pub const ENTITIES_SMALL: usize = 100_000;
pub const ENTITIES_MED: usize = 1_000_000;

pub fn identifiers(count: usize) -> Vec<Entity> {
    (0..count as u32).map(|index| Entity::new(index, 0)).collect()
}

pub fn populated(count: usize) -> SparseSet {
    let mut set = SparseSet::new();
    set.insert(&identifiers(count));
    set
}
