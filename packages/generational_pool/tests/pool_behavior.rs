//! Integration tests for the observable behavior of `GenerationalPool` through its public API.

use std::collections::HashSet;

use generational_pool::{GenerationalPool, Handle, HandleError, PoolError};

/// Adds 10, 11, 12, 13 to a fresh pool, returning the pool and the handles in insertion order.
fn four_items() -> (GenerationalPool<u32, 8>, [Handle; 4]) {
    let mut pool = GenerationalPool::new();

    let handles = [10, 11, 12, 13].map(|value| pool.add(value).unwrap());

    (pool, handles)
}

fn items<const CAPACITY: usize>(pool: &GenerationalPool<u32, CAPACITY>) -> Vec<u32> {
    pool.iter().copied().collect()
}

#[test]
fn capacity_bound() {
    let mut pool = GenerationalPool::<u32, 4>::new();

    let handles = (0..4).map(|i| pool.add(i).unwrap()).collect::<Vec<_>>();

    assert_eq!(pool.len(), 4);
    assert_eq!(
        pool.add(99),
        Err(PoolError::NoAvailableSlot { capacity: 4 })
    );

    pool.remove(handles[1]).unwrap();
    pool.add(100).unwrap();

    assert_eq!(pool.len(), 4);
    assert!(pool.add(101).is_err());
}

#[test]
fn failed_add_leaves_pool_unchanged() {
    let mut pool = GenerationalPool::<u32, 2>::new();
    pool.add(1).unwrap();
    pool.add(2).unwrap();

    let before = items(&pool);
    assert!(pool.add(3).is_err());

    assert_eq!(items(&pool), before);
    assert_eq!(pool.len(), 2);
}

#[test]
fn stale_handle_after_reuse() {
    let mut pool = GenerationalPool::<&str, 1>::new();

    let old = pool.add("old").unwrap();
    pool.remove(old).unwrap();

    let new = pool.add("new").unwrap();
    assert_eq!(new.index(), old.index());
    assert_ne!(new, old);

    assert_eq!(
        pool.get(old),
        Err(HandleError::HandleInvalid {
            index: old.index(),
            generation: old.generation()
        })
    );
    assert_eq!(pool.get(new), Ok(&"new"));
}

#[test]
fn generations_never_repeat_at_one_index() {
    let mut pool = GenerationalPool::<u32, 1>::new();
    let mut seen = HashSet::new();

    for value in 0..1000 {
        let handle = pool.add(value).unwrap();
        assert_eq!(handle.index(), 0);
        assert!(seen.insert(handle), "handle {handle:?} was issued twice");

        pool.remove(handle).unwrap();
    }

    assert_eq!(seen.len(), 1000);
}

#[test]
fn iteration_after_middle_removal() {
    let (mut pool, [_, h1, _, _]) = four_items();

    pool.remove(h1).unwrap();

    let mut iter = pool.iter();
    assert_eq!(iter.next(), Some(&13));
    assert_eq!(iter.next(), Some(&12));
    assert_eq!(iter.next(), Some(&10));
    assert_eq!(iter.next(), None);
}

#[test]
fn iteration_after_tail_removal() {
    let (mut pool, [h0, _, _, _]) = four_items();

    pool.remove(h0).unwrap();

    assert_eq!(items(&pool), [13, 12, 11]);
}

#[test]
fn iteration_after_head_removal() {
    let (mut pool, [_, _, _, h3]) = four_items();

    pool.remove(h3).unwrap();

    assert_eq!(items(&pool), [12, 11, 10]);
}

#[test]
fn iteration_after_removal_sequences() {
    let (mut pool, [h0, h1, h2, h3]) = four_items();

    pool.remove(h2).unwrap();
    assert_eq!(items(&pool), [13, 11, 10]);

    pool.remove(h1).unwrap();
    assert_eq!(items(&pool), [13, 10]);

    let h4 = pool.add(14).unwrap();
    assert_eq!(items(&pool), [14, 13, 10]);

    pool.remove(h3).unwrap();
    assert_eq!(items(&pool), [14, 10]);

    pool.remove(h4).unwrap();
    assert_eq!(items(&pool), [10]);

    pool.remove(h0).unwrap();
    assert_eq!(items(&pool), [] as [u32; 0]);

    pool.add(15).unwrap();
    pool.add(16).unwrap();
    assert_eq!(items(&pool), [16, 15]);
}

#[test]
fn iteration_after_removing_every_other_item() {
    let mut pool = GenerationalPool::<u32, 16>::new();

    let handles = (0..10).map(|i| pool.add(i).unwrap()).collect::<Vec<_>>();

    for handle in handles.iter().step_by(2) {
        pool.remove(*handle).unwrap();
    }

    assert_eq!(items(&pool), [9, 7, 5, 3, 1]);

    for handle in handles.iter().skip(1).step_by(2) {
        pool.remove(*handle).unwrap();
    }

    assert!(pool.is_empty());
    assert_eq!(pool.iter().next(), None);
}

#[test]
fn empty_pool_iteration() {
    let mut pool = GenerationalPool::<u32, 4>::new();
    assert_eq!(pool.iter().next(), None);

    let only = pool.add(1).unwrap();
    pool.remove(only).unwrap();

    assert_eq!(pool.iter().next(), None);
}

#[test]
fn cleared_pool_iterates_empty_and_is_reusable() {
    let (mut pool, _) = four_items();

    pool.clear();

    assert!(pool.is_empty());
    assert_eq!(pool.iter().next(), None);

    for value in 0..8 {
        pool.add(value).unwrap();
    }

    assert!(pool.is_full());
    assert_eq!(items(&pool), [7, 6, 5, 4, 3, 2, 1, 0]);
}

#[test]
fn double_remove_is_invalid() {
    let (mut pool, [h0, ..]) = four_items();

    pool.remove(h0).unwrap();

    assert!(matches!(
        pool.remove(h0),
        Err(HandleError::HandleInvalid { .. })
    ));
    assert_eq!(pool.len(), 3);
}

#[test]
fn pools_are_independent() {
    #[derive(Debug, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }

    let mut names = GenerationalPool::<String, 2>::new();
    let mut positions = GenerationalPool::<Position, 16>::new();

    let name = names.add("player".to_string()).unwrap();
    let position = positions.add(Position { x: 1.5, y: -2.0 }).unwrap();

    for _ in 0..5 {
        let temp = positions.add(Position { x: 0.0, y: 0.0 }).unwrap();
        positions.remove(temp).unwrap();
    }

    assert_eq!(names.get(name).unwrap(), "player");
    assert_eq!(positions.get(position).unwrap(), &Position { x: 1.5, y: -2.0 });
    assert_eq!(names.len(), 1);
    assert_eq!(positions.len(), 1);

    let far = (0..10)
        .map(|_| positions.add(Position { x: 0.0, y: 0.0 }).unwrap())
        .last()
        .unwrap();

    // A handle from the larger pool is out of bounds in the smaller one.
    assert!(matches!(
        names.get(far),
        Err(HandleError::HandleOutOfBounds { capacity: 2, .. })
    ));
}

#[test]
fn handles_usable_as_map_keys() {
    let mut pool = GenerationalPool::<u32, 4>::new();

    let a = pool.add(1).unwrap();
    let b = pool.add(2).unwrap();

    let keys = [a.to_bits(), b.to_bits()]
        .into_iter()
        .collect::<HashSet<_>>();

    assert_eq!(keys.len(), 2);
}
