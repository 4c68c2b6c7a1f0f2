use std::fmt;

/// Per-slot counter that distinguishes successive occupants of the same slot.
///
/// A slot whose generation reaches [`Generation::MAX`] is exhausted and is never reused.
pub type Generation = u32;

/// A handle that identifies one specific item in a [`GenerationalPool`][crate::GenerationalPool].
///
/// Handles are returned by [`GenerationalPool::add()`][crate::GenerationalPool::add] and combine
/// the index of the slot the item was placed in with the generation of that slot at the time.
/// Removing the item advances the generation of the slot, so a handle never resolves to an item
/// added later into the same slot. Instead, the pool reports the handle as invalid.
///
/// Handles are small `Copy` values that can be stored anywhere, including as map keys. There is
/// no public constructor: the only way to obtain a handle is to add an item to a pool.
///
/// A handle is only meaningful for the pool that issued it. Presenting it to a different pool is
/// a usage error that the pool detects only if the index or generation happens not to match.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
///
/// use generational_pool::GenerationalPool;
///
/// let mut pool = GenerationalPool::<&str, 4>::new();
///
/// let alice = pool.add("Alice").unwrap();
/// let bob = pool.add("Bob").unwrap();
///
/// // Handles can be copied into other data structures.
/// let mut ages = HashMap::new();
/// ages.insert(alice, 31);
/// ages.insert(bob, 27);
///
/// assert_eq!(ages[&alice], 31);
/// assert_ne!(alice, bob);
/// ```
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Handle {
    index: u32,
    generation: Generation,
}

impl Handle {
    #[must_use]
    pub(crate) fn new(index: u32, generation: Generation) -> Self {
        Self { index, generation }
    }

    /// The index of the slot in the pool that the item was placed in.
    #[must_use]
    pub fn index(self) -> usize {
        // u32 always fits in usize on the platforms we support.
        self.index as usize
    }

    /// The generation of the slot at the time the item was added.
    #[must_use]
    pub fn generation(self) -> Generation {
        self.generation
    }

    /// The handle packed into a single integer, with the generation in the high 32 bits and the
    /// slot index in the low 32 bits.
    ///
    /// Two handles are equal if and only if their packed representations are equal.
    ///
    /// # Example
    ///
    /// ```rust
    /// use generational_pool::GenerationalPool;
    ///
    /// let mut pool = GenerationalPool::<u8, 2>::new();
    /// let handle = pool.add(1).unwrap();
    ///
    /// assert_eq!(handle.to_bits() >> 32, u64::from(handle.generation()));
    /// assert_eq!(handle.to_bits() & 0xFFFF_FFFF, handle.index() as u64);
    /// ```
    #[must_use]
    pub fn to_bits(self) -> u64 {
        (u64::from(self.generation) << 32) | u64::from(self.index)
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}v{})", self.index, self.generation)
    }
}
