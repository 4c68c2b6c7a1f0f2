use std::iter::FusedIterator;

use crate::{GenerationalPool, Handle};

/// Walks the occupied slots of a pool in list order, yielding slot indexes.
#[derive(Debug)]
struct Walk<'p, T, const CAPACITY: usize> {
    pool: &'p GenerationalPool<T, CAPACITY>,

    /// The slot to yield next. `None` once the walk has returned to the head of the list.
    next: Option<usize>,

    remaining: usize,
}

impl<'p, T, const CAPACITY: usize> Walk<'p, T, CAPACITY> {
    fn new(pool: &'p GenerationalPool<T, CAPACITY>) -> Self {
        Self {
            pool,
            next: pool.first_index(),
            remaining: pool.len(),
        }
    }

    fn advance(&mut self) -> Option<usize> {
        let index = self.next?;

        // The list is circular, so the walk ends when the following slot is the head again.
        let following = self.pool.next_index(index);
        self.next = (Some(following) != self.pool.first_index()).then_some(following);

        self.remaining = self
            .remaining
            .checked_sub(1)
            .expect("the list cannot contain more entries than the pool has items");

        Some(index)
    }
}

/// Iterator over the items in a [`GenerationalPool`], most recently added first.
///
/// Created by [`GenerationalPool::iter()`]. The iterator borrows the pool for its whole
/// lifetime, so the pool cannot be modified until the iterator is dropped. To iterate again,
/// create a new iterator.
#[derive(Debug)]
pub struct Iter<'p, T, const CAPACITY: usize> {
    walk: Walk<'p, T, CAPACITY>,
}

impl<'p, T, const CAPACITY: usize> Iter<'p, T, CAPACITY> {
    pub(crate) fn new(pool: &'p GenerationalPool<T, CAPACITY>) -> Self {
        Self {
            walk: Walk::new(pool),
        }
    }
}

impl<'p, T, const CAPACITY: usize> Iterator for Iter<'p, T, CAPACITY> {
    type Item = &'p T;

    fn next(&mut self) -> Option<Self::Item> {
        let pool = self.walk.pool;
        self.walk.advance().map(|index| pool.item_at(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.walk.remaining, Some(self.walk.remaining))
    }
}

impl<T, const CAPACITY: usize> ExactSizeIterator for Iter<'_, T, CAPACITY> {}

impl<T, const CAPACITY: usize> FusedIterator for Iter<'_, T, CAPACITY> {}

/// Iterator over the handles of the items in a [`GenerationalPool`], most recently added first.
///
/// Created by [`GenerationalPool::handles()`].
#[derive(Debug)]
pub struct Handles<'p, T, const CAPACITY: usize> {
    walk: Walk<'p, T, CAPACITY>,
}

impl<'p, T, const CAPACITY: usize> Handles<'p, T, CAPACITY> {
    pub(crate) fn new(pool: &'p GenerationalPool<T, CAPACITY>) -> Self {
        Self {
            walk: Walk::new(pool),
        }
    }
}

impl<T, const CAPACITY: usize> Iterator for Handles<'_, T, CAPACITY> {
    type Item = Handle;

    fn next(&mut self) -> Option<Self::Item> {
        let pool = self.walk.pool;
        self.walk.advance().map(|index| pool.handle_at(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.walk.remaining, Some(self.walk.remaining))
    }
}

impl<T, const CAPACITY: usize> ExactSizeIterator for Handles<'_, T, CAPACITY> {}

impl<T, const CAPACITY: usize> FusedIterator for Handles<'_, T, CAPACITY> {}
