use std::mem;

use entity_set::{Entity, InsertionSort, SparseSet, NULL, PAGE_SIZE};

fn entity(index: u32) -> Entity {
    Entity::new(index, 0)
}

/// Checks the packed/sparse relationship for every resident entity.
fn assert_consistent(set: &SparseSet) {
    for (pos, &resident) in set.as_slice().iter().enumerate() {
        assert!(set.contains(resident), "resident entity must be contained");
        assert_eq!(set.index(resident), pos, "sparse cell must encode the packed position");
    }
}

#[test]
fn emplace_spans_pages_on_demand() {
    let e1 = entity(3);
    let e2 = entity(7);
    let e3 = entity(3 + PAGE_SIZE as u32);

    let mut set = SparseSet::new();
    set.emplace(e1);
    set.emplace(e2);
    set.emplace(e3);

    assert_eq!(set.len(), 3);
    assert_eq!(set.index(e2), 1);
    assert_eq!(set.extent(), 2 * PAGE_SIZE);

    let newest_first: Vec<Entity> = set.iter().collect();
    assert_eq!(newest_first, vec![e3, e2, e1]);
    assert_consistent(&set);
}

#[test]
fn erase_moves_the_tail_into_the_hole() {
    let e1 = entity(3);
    let e2 = entity(7);
    let e3 = entity(3 + PAGE_SIZE as u32);

    let mut set = SparseSet::new();
    set.emplace(e1);
    set.emplace(e2);
    set.emplace(e3);

    set.erase(e2, None);

    assert_eq!(set.as_slice(), &[e1, e3]);
    assert_eq!(set.index(e3), 1);
    assert!(!set.contains(e2));
    assert_consistent(&set);
}

#[test]
fn erasing_the_tail_still_clears_its_cell() {
    let mut set = SparseSet::new();
    set.emplace(entity(0));
    set.emplace(entity(1));

    set.erase(entity(1), None);

    assert_eq!(set.as_slice(), &[entity(0)]);
    assert!(!set.contains(entity(1)));
    assert_consistent(&set);
}

#[test]
fn swap_exchanges_packed_positions() {
    let e4 = entity(0);
    let e5 = entity(1);
    let e6 = entity(2);

    let mut set = SparseSet::new();
    set.emplace(e4);
    set.emplace(e5);
    set.emplace(e6);

    set.swap(e4, e6);

    assert_eq!(set.as_slice(), &[e6, e5, e4]);
    assert_eq!(set.index(e6), 0);
    assert_eq!(set.index(e4), 2);
    assert_consistent(&set);
}

#[test]
fn sort_yields_ascending_iteration() {
    let indices = [3u32, 1, 4, 0, 9, 2, 8, 5, 7, 6];
    let identifiers: Vec<Entity> = indices.iter().map(|&i| entity(i)).collect();

    let mut set = SparseSet::new();
    set.insert(&identifiers);

    set.sort(|lhs, rhs| lhs.index() < rhs.index());

    let iterated: Vec<u32> = set.iter().map(Entity::index).collect();
    assert_eq!(iterated, (0..10).collect::<Vec<u32>>());
    assert_eq!(set.as_slice()[0].index(), 9);

    // same multiset, just rearranged
    let mut stored: Vec<u32> = set.as_slice().iter().map(|e| e.index()).collect();
    stored.sort_unstable();
    assert_eq!(stored, (0..10).collect::<Vec<u32>>());
    assert_consistent(&set);
}

#[test]
fn sort_n_leaves_the_rest_of_the_packed_array_alone() {
    let indices = [5u32, 2, 8, 1, 7, 0];
    let identifiers: Vec<Entity> = indices.iter().map(|&i| entity(i)).collect();

    let mut set = SparseSet::new();
    set.insert(&identifiers);

    let untouched: Vec<Entity> = set.as_slice()[3..].to_vec();
    set.sort_n(3, |lhs, rhs| lhs.index() < rhs.index());

    assert_eq!(&set.as_slice()[3..], untouched.as_slice());

    // sorted prefix is descending in storage, ascending in iteration
    let prefix: Vec<u32> = set.as_slice()[..3].iter().map(|e| e.index()).collect();
    assert_eq!(prefix, vec![8, 5, 2]);
    assert_consistent(&set);
}

#[test]
fn insertion_sort_matches_the_default_strategy() {
    let indices = [9u32, 3, 6, 0, 4, 8, 1];
    let identifiers: Vec<Entity> = indices.iter().map(|&i| entity(i)).collect();

    let mut lhs = SparseSet::new();
    let mut rhs = SparseSet::new();
    lhs.insert(&identifiers);
    rhs.insert(&identifiers);

    lhs.sort(|a, b| a.index() < b.index());
    rhs.sort_with(|a, b| a.index() < b.index(), InsertionSort);

    assert_eq!(lhs.as_slice(), rhs.as_slice());
    assert_consistent(&rhs);
}

#[test]
fn respect_places_the_common_subset_first() {
    let x = entity(10);
    let y = entity(11);
    let z = entity(12);
    let w = entity(13);

    let mut lhs = SparseSet::new();
    lhs.emplace(x);
    lhs.emplace(y);
    lhs.emplace(z);
    lhs.emplace(w);

    // iteration order of the master is newest first: y, then w
    let mut master = SparseSet::new();
    master.emplace(w);
    master.emplace(y);

    lhs.respect(&master);

    let iterated: Vec<Entity> = lhs.iter().collect();
    assert_eq!(&iterated[..2], &[y, w]);
    assert_eq!(lhs.len(), 4);
    assert!(lhs.contains(x) && lhs.contains(z));
    assert_consistent(&lhs);
}

#[test]
fn respect_aligns_relative_order_with_the_master() {
    let identifiers: Vec<Entity> = (0..6u32).map(entity).collect();

    let mut set = SparseSet::new();
    set.insert(&identifiers);

    let mut master = SparseSet::new();
    master.emplace(entity(4));
    master.emplace(entity(1));
    master.emplace(entity(5));

    set.respect(&master);

    for lhs in [entity(4), entity(1), entity(5)] {
        for rhs in [entity(4), entity(1), entity(5)] {
            if master.index(lhs) < master.index(rhs) {
                assert!(
                    set.index(lhs) < set.index(rhs),
                    "common entities must keep the master's relative order"
                );
            }
        }
    }
    assert_consistent(&set);
}

#[test]
fn respect_ignores_sets_too_small_to_reorder() {
    let mut set = SparseSet::new();
    set.emplace(entity(0));

    let mut master = SparseSet::new();
    master.emplace(entity(0));

    set.respect(&master);
    assert_eq!(set.as_slice(), &[entity(0)]);

    let mut empty = SparseSet::new();
    empty.respect(&master);
    assert!(empty.is_empty());
}

#[test]
fn reinsertion_matches_a_fresh_emplace() {
    let probe = entity(21);

    let mut churned = SparseSet::new();
    churned.emplace(probe);
    churned.erase(probe, None);
    churned.emplace(probe);

    let mut fresh = SparseSet::new();
    fresh.emplace(probe);

    assert_eq!(churned.len(), fresh.len());
    assert_eq!(churned.contains(probe), fresh.contains(probe));
    assert_eq!(churned.index(probe), fresh.index(probe));
    assert!(churned.contains(probe));
}

#[test]
fn round_trip_per_entity() {
    let mut set = SparseSet::new();

    for index in 0..64u32 {
        let probe = entity(index);
        set.emplace(probe);
        assert!(set.contains(probe));
        assert_eq!(set.index(probe), set.len() - 1);
        set.erase(probe, None);
        assert!(!set.contains(probe));
    }
    assert!(set.is_empty());
}

#[test]
fn at_is_total_and_indexing_is_not() {
    let mut set = SparseSet::new();
    set.emplace(entity(5));

    assert_eq!(set.at(0), entity(5));
    assert!(set.at(1) == NULL);
    assert!(set.at(1234) == NULL);
    assert_eq!(set[0], entity(5));
}

#[test]
fn remove_reports_whether_anything_happened() {
    let mut set = SparseSet::new();
    set.emplace(entity(1));
    set.emplace(entity(2));

    assert!(!set.remove(entity(9), None));
    assert!(set.remove(entity(1), None));
    assert!(!set.remove(entity(1), None));

    let removed = set.remove_all(&[entity(2), entity(3), entity(2)], None);
    assert_eq!(removed, 1);
    assert!(set.is_empty());
}

#[test]
fn erase_all_drains_a_batch() {
    let identifiers: Vec<Entity> = (0..5u32).map(entity).collect();

    let mut set = SparseSet::new();
    set.insert(&identifiers);
    set.erase_all(&identifiers[1..4], None);

    assert_eq!(set.len(), 2);
    assert!(set.contains(entity(0)));
    assert!(set.contains(entity(4)));
    assert_consistent(&set);
}

#[test]
fn clear_empties_the_set() {
    let mut set = SparseSet::new();
    set.insert(&(0..10u32).map(entity).collect::<Vec<_>>());

    set.clear(None);

    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
    for index in 0..10u32 {
        assert!(!set.contains(entity(index)));
    }
}

#[test]
fn reserve_grows_and_never_shrinks() {
    let mut set = SparseSet::new();
    assert_eq!(set.capacity(), 0);

    set.reserve(64);
    assert!(set.capacity() >= 64);

    let grown = set.capacity();
    set.reserve(8);
    assert_eq!(set.capacity(), grown);
}

#[test]
fn try_reserve_succeeds_for_reasonable_requests() {
    let mut set = SparseSet::new();
    set.try_reserve(128).expect("allocation should succeed");
    assert!(set.capacity() >= 128);
}

#[test]
fn try_insert_matches_a_plain_insert() {
    let identifiers: Vec<Entity> = (0..6u32).map(entity).collect();

    let mut fallible = SparseSet::new();
    fallible
        .try_insert(&identifiers)
        .expect("allocation should succeed");

    let mut plain = SparseSet::new();
    plain.insert(&identifiers);

    assert_eq!(fallible.as_slice(), plain.as_slice());
    for &probe in &identifiers {
        assert!(fallible.contains(probe));
        assert_eq!(fallible.index(probe), plain.index(probe));
    }
    assert_consistent(&fallible);
}

#[test]
fn failed_reservation_reports_and_leaves_the_set_untouched() {
    let mut set = SparseSet::new();
    set.emplace(entity(1));
    set.emplace(entity(2));

    let before: Vec<Entity> = set.as_slice().to_vec();
    let capacity = set.capacity();

    let error = set.try_reserve(usize::MAX).unwrap_err();

    assert_eq!(error.requested, usize::MAX);
    assert_eq!(
        error.to_string(),
        format!("failed to reserve packed capacity for {} entities", usize::MAX)
    );
    assert!(std::error::Error::source(&error).is_some());

    assert_eq!(set.len(), 2);
    assert_eq!(set.capacity(), capacity);
    assert_eq!(set.as_slice(), before.as_slice());
    assert!(set.contains(entity(1)) && set.contains(entity(2)));
    assert_consistent(&set);
}

#[test]
fn shrink_to_fit_on_an_empty_set_releases_pages() {
    let mut set = SparseSet::new();
    set.emplace(entity(PAGE_SIZE as u32 + 1));
    assert_eq!(set.extent(), 2 * PAGE_SIZE);

    set.erase(entity(PAGE_SIZE as u32 + 1), None);
    set.shrink_to_fit();

    assert_eq!(set.extent(), 0);
    assert_eq!(set.capacity(), 0);
    assert!(set.is_empty());
}

#[test]
fn shrink_to_fit_keeps_pages_while_occupied() {
    let mut set = SparseSet::new();
    set.emplace(entity(0));
    set.reserve(100);

    set.shrink_to_fit();

    assert_eq!(set.extent(), PAGE_SIZE);
    assert!(set.contains(entity(0)));
}

#[test]
fn iteration_is_the_reverse_of_storage_order() {
    let identifiers: Vec<Entity> = (0..32u32).map(entity).collect();

    let mut set = SparseSet::new();
    set.insert(&identifiers);

    let mut reversed: Vec<Entity> = set.iter().collect();
    reversed.reverse();
    assert_eq!(reversed.as_slice(), set.as_slice());
    assert_eq!(set.as_slice().len(), set.len());
}

#[test]
fn growth_keeps_every_invariant_intact() {
    let mut set = SparseSet::new();

    for index in 0..1000u32 {
        set.emplace(entity(index));
        assert!(set.capacity() >= set.len());
    }

    assert_eq!(set.len(), 1000);
    assert_consistent(&set);
}

#[test]
fn taking_a_set_leaves_a_valid_empty_one() {
    let mut set = SparseSet::new();
    set.insert(&(0..8u32).map(entity).collect::<Vec<_>>());

    let taken = mem::take(&mut set);

    assert_eq!(taken.len(), 8);
    assert!(taken.contains(entity(3)));

    assert!(set.is_empty());
    assert_eq!(set.capacity(), 0);
    assert_eq!(set.extent(), 0);
    assert!(!set.contains(entity(3)));

    // the drained set is fully usable again
    set.emplace(entity(100));
    assert!(set.contains(entity(100)));
}
