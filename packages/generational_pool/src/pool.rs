use std::any::type_name;
use std::{array, fmt, thread};

use tracing::{debug, trace};

use crate::{
    DropPolicy, Generation, GenerationalPoolBuilder, Handle, HandleError, Handles, Iter, PoolError,
};

/// A fixed-capacity object pool that hands out generational handles to its items.
///
/// The pool stores up to `CAPACITY` items of type `T` inline, without any heap allocation of its
/// own. Adding an item returns a [`Handle`] that can later be used to access or remove the item.
/// Each slot carries a generation counter that advances whenever the slot is freed, so a handle
/// to a removed item is reported as invalid instead of resolving to whatever item was added into
/// the same slot afterwards:
///
/// ```rust
/// use generational_pool::{GenerationalPool, HandleError};
///
/// let mut pool = GenerationalPool::<&str, 1>::new();
///
/// let alice = pool.add("Alice").unwrap();
/// pool.remove(alice).unwrap();
///
/// // Bob reuses the only slot in the pool.
/// let bob = pool.add("Bob").unwrap();
/// assert_eq!(bob.index(), alice.index());
///
/// assert!(matches!(
///     pool.get(alice),
///     Err(HandleError::HandleInvalid { .. })
/// ));
/// assert_eq!(*pool.get(bob).unwrap(), "Bob");
/// ```
///
/// # Slot exhaustion
///
/// A slot whose generation counter reaches [`Generation::MAX`] is exhausted. It is never handed
/// out again, as wrapping the counter around would let stale handles alias new items. This means
/// the effective capacity of the pool can slowly shrink after billions of add/remove cycles on
/// the same slot. [`clear()`][Self::clear] resets all slots, including exhausted ones.
///
/// # Iteration
///
/// The pool threads all occupied slots onto an intrusive circular list. [`iter()`][Self::iter]
/// walks that list, yielding the most recently added item first. Removed items are simply absent
/// from the sequence; the relative order of the remaining items is unaffected by removals.
///
/// # Thread safety
///
/// The pool performs no internal synchronization. It is [`Send`] and [`Sync`] when `T` is, so it
/// can be shared between threads behind a `Mutex` or similar.
pub struct GenerationalPool<T, const CAPACITY: usize> {
    entries: [Entry<T>; CAPACITY],

    /// The slot chosen by the most recent successful `add()`. The next scan for an available slot
    /// starts here and wraps around once, so we do not rescan the start of the pool every time.
    cursor: usize,

    /// Head of the circular doubly-linked list of occupied entries, i.e. the most recently added
    /// item. `None` if and only if the pool is empty.
    first: Option<usize>,

    /// Number of occupied entries.
    len: usize,

    drop_policy: DropPolicy,
}

struct Entry<T> {
    item: Option<T>,

    generation: Generation,

    /// Links of the occupied list. Meaningless while the entry is vacant.
    previous: usize,
    next: usize,
}

impl<T> Entry<T> {
    fn vacant() -> Self {
        Self {
            item: None,
            generation: 0,
            previous: 0,
            next: 0,
        }
    }

    fn is_occupied(&self) -> bool {
        self.item.is_some()
    }

    /// Whether `add()` may place an item into this entry.
    fn is_available(&self) -> bool {
        !self.is_occupied() && self.generation != Generation::MAX
    }
}

impl<T, const CAPACITY: usize> GenerationalPool<T, CAPACITY> {
    #[must_use]
    pub(crate) fn new_inner(drop_policy: DropPolicy) -> Self {
        const {
            assert!(
                CAPACITY <= u32::MAX as usize,
                "GenerationalPool capacity must fit in the index of a handle"
            );
        }

        Self {
            entries: array::from_fn(|_| Entry::vacant()),
            cursor: 0,
            first: None,
            len: 0,
            drop_policy,
        }
    }

    /// Creates a new empty pool with the default configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use generational_pool::GenerationalPool;
    ///
    /// let mut pool = GenerationalPool::<String, 8>::new();
    ///
    /// assert_eq!(pool.len(), 0);
    /// assert_eq!(pool.capacity(), 8);
    ///
    /// let handle = pool.add("Hello".to_string()).unwrap();
    /// assert_eq!(pool.get(handle).unwrap(), "Hello");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts building a new [`GenerationalPool`].
    ///
    /// Use this when you want to customize the pool configuration beyond the defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use generational_pool::{DropPolicy, GenerationalPool};
    ///
    /// let pool = GenerationalPool::<u32, 8>::builder()
    ///     .drop_policy(DropPolicy::MustNotDropItems)
    ///     .build();
    ///
    /// assert!(pool.is_empty());
    /// ```
    pub fn builder() -> GenerationalPoolBuilder<T, CAPACITY> {
        GenerationalPoolBuilder::new()
    }

    /// The number of items in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the pool contains no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The maximum number of items the pool can hold at the same time.
    #[must_use]
    pub fn capacity(&self) -> usize {
        CAPACITY
    }

    /// Whether the next [`add()`][Self::add] would fail.
    ///
    /// This is the case when every slot is either occupied or exhausted, so a pool can be full
    /// even when [`len()`][Self::len] is less than [`capacity()`][Self::capacity].
    ///
    /// This performs the same scan as `add()` and is therefore O(`CAPACITY`) in the worst case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use generational_pool::GenerationalPool;
    ///
    /// let mut pool = GenerationalPool::<u32, 2>::new();
    /// assert!(!pool.is_full());
    ///
    /// let first = pool.add(1).unwrap();
    /// pool.add(2).unwrap();
    /// assert!(pool.is_full());
    ///
    /// pool.remove(first).unwrap();
    /// assert!(!pool.is_full());
    /// ```
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.find_available_slot().is_none()
    }

    /// Adds an item to the pool and returns a handle to it.
    ///
    /// The newly added item becomes the first item yielded by [`iter()`][Self::iter].
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::NoAvailableSlot`] if every slot is occupied or exhausted. The item is
    /// dropped and the pool is left unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use generational_pool::{GenerationalPool, PoolError};
    ///
    /// let mut pool = GenerationalPool::<u32, 1>::new();
    ///
    /// let handle = pool.add(42).unwrap();
    /// assert_eq!(*pool.get(handle).unwrap(), 42);
    ///
    /// assert!(matches!(
    ///     pool.add(43),
    ///     Err(PoolError::NoAvailableSlot { capacity: 1 })
    /// ));
    /// ```
    pub fn add(&mut self, item: T) -> Result<Handle, PoolError> {
        #[cfg(debug_assertions)]
        self.integrity_check();

        let Some(index) = self.find_available_slot() else {
            debug!(
                capacity = CAPACITY,
                item_type = type_name::<T>(),
                "no available slot, rejecting item"
            );

            return Err(PoolError::NoAvailableSlot { capacity: CAPACITY });
        };

        // The new entry goes in front of the current head, which puts it between the tail and
        // the old head of the circular list. An empty list makes it a self-linked singleton.
        let (previous, next) = match self.first {
            Some(first) => (self.entry(first).previous, first),
            None => (index, index),
        };

        let entry = self.entry_mut(index);
        entry.item = Some(item);
        entry.previous = previous;
        entry.next = next;
        let generation = entry.generation;

        if next != index {
            self.entry_mut(previous).next = index;
            self.entry_mut(next).previous = index;
        }

        self.first = Some(index);
        self.cursor = index;
        self.len = self
            .len
            .checked_add(1)
            .expect("guarded by the available slot check above");

        trace!(index, generation, "added item");

        Ok(Handle::new(
            u32::try_from(index).expect("guarded by capacity assertion in ctor"),
            generation,
        ))
    }

    /// Gets a shared reference to the item the handle was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`HandleError::HandleOutOfBounds`] if the handle points beyond the end of the pool
    /// and [`HandleError::HandleInvalid`] if the item has been removed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use generational_pool::GenerationalPool;
    ///
    /// let mut pool = GenerationalPool::<String, 4>::new();
    /// let handle = pool.add("Hello".to_string()).unwrap();
    ///
    /// assert_eq!(pool.get(handle).unwrap(), "Hello");
    ///
    /// pool.remove(handle).unwrap();
    /// assert!(pool.get(handle).is_err());
    /// ```
    pub fn get(&self, handle: Handle) -> Result<&T, HandleError> {
        let index = self.occupied_index(handle)?;

        Ok(self
            .entry(index)
            .item
            .as_ref()
            .expect("occupied_index() only returns occupied entries"))
    }

    /// Gets an exclusive reference to the item the handle was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`HandleError::HandleOutOfBounds`] if the handle points beyond the end of the pool
    /// and [`HandleError::HandleInvalid`] if the item has been removed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use generational_pool::GenerationalPool;
    ///
    /// let mut pool = GenerationalPool::<String, 4>::new();
    /// let handle = pool.add("Hello".to_string()).unwrap();
    ///
    /// pool.get_mut(handle).unwrap().push_str(", World!");
    ///
    /// assert_eq!(pool.get(handle).unwrap(), "Hello, World!");
    /// ```
    pub fn get_mut(&mut self, handle: Handle) -> Result<&mut T, HandleError> {
        let index = self.occupied_index(handle)?;

        Ok(self
            .entry_mut(index)
            .item
            .as_mut()
            .expect("occupied_index() only returns occupied entries"))
    }

    /// Whether the handle refers to an item that is still in the pool.
    #[must_use]
    pub fn contains(&self, handle: Handle) -> bool {
        self.occupied_index(handle).is_ok()
    }

    /// Removes the item the handle was issued for and drops it.
    ///
    /// The handle, and every copy of it, becomes invalid.
    ///
    /// # Errors
    ///
    /// Returns [`HandleError::HandleOutOfBounds`] if the handle points beyond the end of the pool
    /// and [`HandleError::HandleInvalid`] if the item has already been removed. The pool is left
    /// unchanged in both cases.
    ///
    /// # Example
    ///
    /// ```rust
    /// use generational_pool::{GenerationalPool, HandleError};
    ///
    /// let mut pool = GenerationalPool::<u32, 4>::new();
    /// let handle = pool.add(42).unwrap();
    ///
    /// pool.remove(handle).unwrap();
    /// assert!(pool.is_empty());
    ///
    /// // Removing twice is detected.
    /// assert!(matches!(
    ///     pool.remove(handle),
    ///     Err(HandleError::HandleInvalid { .. })
    /// ));
    /// ```
    pub fn remove(&mut self, handle: Handle) -> Result<(), HandleError> {
        drop(self.take(handle)?);
        Ok(())
    }

    /// Removes the item the handle was issued for and returns it to the caller.
    ///
    /// Apart from handing back the item instead of dropping it, this behaves exactly like
    /// [`remove()`][Self::remove].
    ///
    /// # Errors
    ///
    /// Returns [`HandleError::HandleOutOfBounds`] if the handle points beyond the end of the pool
    /// and [`HandleError::HandleInvalid`] if the item has already been removed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use generational_pool::GenerationalPool;
    ///
    /// let mut pool = GenerationalPool::<String, 4>::new();
    /// let handle = pool.add("Hello".to_string()).unwrap();
    ///
    /// assert_eq!(pool.take(handle).unwrap(), "Hello");
    /// assert!(!pool.contains(handle));
    /// ```
    pub fn take(&mut self, handle: Handle) -> Result<T, HandleError> {
        let index = self.occupied_index(handle)?;

        self.unlink(index);

        let entry = self.entry_mut(index);
        let item = entry
            .item
            .take()
            .expect("occupied_index() only returns occupied entries");
        entry.generation = entry.generation.saturating_add(1);
        let generation = entry.generation;

        self.len = self
            .len
            .checked_sub(1)
            .expect("we verified above that the entry is occupied so len must be non-zero");

        trace!(index, generation = handle.generation(), "removed item");

        if generation == Generation::MAX {
            debug!(
                index,
                item_type = type_name::<T>(),
                "slot exhausted, it will not be reused until the pool is cleared"
            );
        }

        Ok(item)
    }

    /// Removes and drops all items, returning the pool to its freshly created state.
    ///
    /// This also resets the generation of every slot, including exhausted ones. Handles issued
    /// before the call may therefore resolve to unrelated items added after it. Discard all
    /// outstanding handles when clearing the pool.
    ///
    /// # Example
    ///
    /// ```rust
    /// use generational_pool::GenerationalPool;
    ///
    /// let mut pool = GenerationalPool::<u32, 4>::new();
    /// pool.add(1).unwrap();
    /// pool.add(2).unwrap();
    ///
    /// pool.clear();
    ///
    /// assert!(pool.is_empty());
    /// assert_eq!(pool.iter().count(), 0);
    /// ```
    pub fn clear(&mut self) {
        let removed = self.len;

        for entry in &mut self.entries {
            *entry = Entry::vacant();
        }

        self.first = None;
        self.cursor = 0;
        self.len = 0;

        debug!(removed, item_type = type_name::<T>(), "cleared pool");
    }

    /// Iterates over the items in the pool, most recently added first.
    ///
    /// The iterator borrows the pool, so the pool cannot be modified while iterating.
    ///
    /// # Example
    ///
    /// ```rust
    /// use generational_pool::GenerationalPool;
    ///
    /// let mut pool = GenerationalPool::<u32, 4>::new();
    /// pool.add(1).unwrap();
    /// let two = pool.add(2).unwrap();
    /// pool.add(3).unwrap();
    ///
    /// pool.remove(two).unwrap();
    ///
    /// assert_eq!(pool.iter().copied().collect::<Vec<_>>(), [3, 1]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T, CAPACITY> {
        Iter::new(self)
    }

    /// Iterates over the handles of the items in the pool, in the same order as
    /// [`iter()`][Self::iter].
    ///
    /// # Example
    ///
    /// ```rust
    /// use generational_pool::GenerationalPool;
    ///
    /// let mut pool = GenerationalPool::<u32, 4>::new();
    /// let one = pool.add(1).unwrap();
    /// let two = pool.add(2).unwrap();
    ///
    /// assert_eq!(pool.handles().collect::<Vec<_>>(), [two, one]);
    /// ```
    pub fn handles(&self) -> Handles<'_, T, CAPACITY> {
        Handles::new(self)
    }

    /// The slot of the most recently added item, where iteration starts.
    pub(crate) fn first_index(&self) -> Option<usize> {
        self.first
    }

    /// The slot that follows an occupied slot in iteration order. Wraps around to
    /// `first_index()` after the last item.
    pub(crate) fn next_index(&self, index: usize) -> usize {
        self.entry(index).next
    }

    /// # Panics
    ///
    /// Panics if the slot is vacant.
    pub(crate) fn item_at(&self, index: usize) -> &T {
        self.entry(index).item.as_ref().unwrap_or_else(|| {
            panic!(
                "item_at({index}) entry was vacant in pool of {}",
                type_name::<T>()
            )
        })
    }

    pub(crate) fn handle_at(&self, index: usize) -> Handle {
        Handle::new(
            u32::try_from(index).expect("guarded by capacity assertion in ctor"),
            self.entry(index).generation,
        )
    }

    fn find_available_slot(&self) -> Option<usize> {
        (self.cursor..CAPACITY)
            .chain(0..self.cursor)
            .find(|&index| self.entry(index).is_available())
    }

    /// Resolves a handle to the index of the occupied entry it was issued for.
    fn occupied_index(&self, handle: Handle) -> Result<usize, HandleError> {
        let index = handle.index();

        let Some(entry) = self.entries.get(index) else {
            return Err(HandleError::HandleOutOfBounds {
                index,
                capacity: CAPACITY,
            });
        };

        // A vacant entry can carry a matching generation if the pool has been cleared since the
        // handle was issued, so the occupancy check is not redundant.
        if entry.generation != handle.generation() || !entry.is_occupied() {
            return Err(HandleError::HandleInvalid {
                index,
                generation: handle.generation(),
            });
        }

        Ok(index)
    }

    /// Detaches an occupied entry from the circular list, leaving its own links stale.
    fn unlink(&mut self, index: usize) {
        let entry = self.entry(index);
        let (previous, next) = (entry.previous, entry.next);

        if next == index {
            // It was the only item.
            self.first = None;
            return;
        }

        self.entry_mut(previous).next = next;
        self.entry_mut(next).previous = previous;

        if self.first == Some(index) {
            self.first = Some(next);
        }
    }

    fn entry(&self, index: usize) -> &Entry<T> {
        let Some(entry) = self.entries.get(index) else {
            panic!(
                "entry {index} index out of bounds in pool of {}",
                type_name::<T>()
            );
        };

        entry
    }

    fn entry_mut(&mut self, index: usize) -> &mut Entry<T> {
        let Some(entry) = self.entries.get_mut(index) else {
            panic!(
                "entry {index} index out of bounds in pool of {}",
                type_name::<T>()
            );
        };

        entry
    }

    #[cfg_attr(test, mutants::skip)] // This is essentially test logic, mutation is meaningless.
    #[cfg(any(debug_assertions, test))]
    pub(crate) fn integrity_check(&self) {
        let occupied_count = self
            .entries
            .iter()
            .filter(|entry| entry.is_occupied())
            .count();

        assert!(
            self.len == occupied_count,
            "self.len {} does not match the observed occupied count {} in pool of {}",
            self.len,
            occupied_count,
            type_name::<T>()
        );

        let Some(first) = self.first else {
            assert!(
                occupied_count == 0,
                "self.first is None but {} entries are occupied in pool of {}",
                occupied_count,
                type_name::<T>()
            );
            return;
        };

        let mut visited: usize = 0;
        let mut index = first;

        loop {
            let entry = self.entry(index);

            assert!(
                entry.is_occupied(),
                "entry {index} is vacant but reachable from self.first in pool of {}",
                type_name::<T>()
            );

            assert!(
                self.entry(entry.next).previous == index,
                "entry {index} links forward to {} which does not link back in pool of {}",
                entry.next,
                type_name::<T>()
            );

            visited = visited
                .checked_add(1)
                .expect("guarded by the bound check below");

            assert!(
                visited <= occupied_count,
                "list from self.first {first} never returns to it in pool of {}",
                type_name::<T>()
            );

            index = entry.next;

            if index == first {
                break;
            }
        }

        assert!(
            visited == occupied_count,
            "list from self.first reaches {visited} entries but {occupied_count} are occupied in pool of {}",
            type_name::<T>()
        );
    }
}

impl<T, const CAPACITY: usize> Default for GenerationalPool<T, CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const CAPACITY: usize> fmt::Debug for GenerationalPool<T, CAPACITY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationalPool")
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("capacity", &CAPACITY)
            .field("len", &self.len)
            .field("first", &self.first)
            .field("cursor", &self.cursor)
            .field("drop_policy", &self.drop_policy)
            .finish_non_exhaustive()
    }
}

impl<'p, T, const CAPACITY: usize> IntoIterator for &'p GenerationalPool<T, CAPACITY> {
    type Item = &'p T;
    type IntoIter = Iter<'p, T, CAPACITY>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, const CAPACITY: usize> Drop for GenerationalPool<T, CAPACITY> {
    fn drop(&mut self) {
        // If we are already panicking, we do not want to panic again because that will
        // simply obscure whatever the original panic was, leading to debug difficulties.
        if self.drop_policy == DropPolicy::MustNotDropItems && !thread::panicking() {
            assert!(
                self.is_empty(),
                "dropped a non-empty pool of {} with a policy that says it must be empty when dropped",
                type_name::<T>()
            );
        }
    }
}
