use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use crate::{DropPolicy, GenerationalPool};

/// Builder for creating an instance of [`GenerationalPool`].
///
/// You only need to use this builder if you want to customize the pool configuration.
/// The default configuration used by [`GenerationalPool::new()`][1] is sufficient for most
/// use cases. The capacity is not part of the builder: it is a const generic of the pool type.
///
/// # Examples
///
/// ```
/// use generational_pool::{DropPolicy, GenerationalPool};
///
/// let pool = GenerationalPool::<u32, 16>::builder()
///     .drop_policy(DropPolicy::MayDropItems)
///     .build();
///
/// assert_eq!(pool.capacity(), 16);
/// ```
///
/// [1]: GenerationalPool::new
#[must_use]
pub struct GenerationalPoolBuilder<T, const CAPACITY: usize> {
    drop_policy: DropPolicy,

    _item: PhantomData<T>,
}

impl<T, const CAPACITY: usize> fmt::Debug for GenerationalPoolBuilder<T, CAPACITY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationalPoolBuilder")
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("capacity", &CAPACITY)
            .field("drop_policy", &self.drop_policy)
            .finish()
    }
}

impl<T, const CAPACITY: usize> GenerationalPoolBuilder<T, CAPACITY> {
    pub(crate) fn new() -> Self {
        Self {
            drop_policy: DropPolicy::default(),
            _item: PhantomData,
        }
    }

    /// Sets the [drop policy][DropPolicy] for the pool. This governs how
    /// to treat remaining items in the pool when the pool is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use generational_pool::{DropPolicy, GenerationalPool};
    ///
    /// let pool = GenerationalPool::<u32, 4>::builder()
    ///     .drop_policy(DropPolicy::MustNotDropItems)
    ///     .build();
    /// ```
    pub fn drop_policy(mut self, policy: DropPolicy) -> Self {
        self.drop_policy = policy;
        self
    }

    /// Builds the pool with the specified configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use generational_pool::GenerationalPool;
    ///
    /// let pool = GenerationalPool::<u32, 4>::builder().build();
    /// assert!(pool.is_empty());
    /// ```
    #[must_use]
    pub fn build(self) -> GenerationalPool<T, CAPACITY> {
        GenerationalPool::new_inner(self.drop_policy)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_may_drop() {
        let builder = GenerationalPoolBuilder::<u32, 4>::new();

        assert_eq!(builder.drop_policy, DropPolicy::MayDropItems);
    }

    #[test]
    fn debug_includes_configuration() {
        let builder =
            GenerationalPoolBuilder::<u64, 7>::new().drop_policy(DropPolicy::MustNotDropItems);

        let debug = format!("{builder:?}");

        assert!(debug.contains("u64"));
        assert!(debug.contains("capacity: 7"));
        assert!(debug.contains("MustNotDropItems"));
    }
}
