use thiserror::Error;

use crate::Generation;

/// Errors that can occur when adding an item to a pool.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[non_exhaustive]
pub enum PoolError {
    /// Every slot in the pool is either occupied or exhausted.
    ///
    /// The pool is unchanged. The caller may remove an item and try again.
    #[error("no available slot in pool of capacity {capacity}")]
    NoAvailableSlot {
        /// The capacity of the pool that rejected the item.
        capacity: usize,
    },
}

/// Errors that can occur when resolving a [`Handle`][crate::Handle] against a pool.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[non_exhaustive]
pub enum HandleError {
    /// The handle points beyond the end of the pool. It was most likely issued by a different
    /// pool or was derived from corrupted data.
    #[error("handle index {index} is out of bounds for pool of capacity {capacity}")]
    HandleOutOfBounds {
        /// The slot index carried by the handle.
        index: usize,

        /// The capacity of the pool the handle was presented to.
        capacity: usize,
    },

    /// The slot the handle points to no longer holds the item the handle was issued for. The
    /// item has been removed and the slot may since have been reused.
    #[error("handle {index}v{generation} does not refer to a live item")]
    HandleInvalid {
        /// The slot index carried by the handle.
        index: usize,

        /// The generation carried by the handle.
        generation: Generation,
    },
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::error::Error as StdError;
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(PoolError: Send, Sync, Debug, StdError);
    assert_impl_all!(HandleError: Send, Sync, Debug, StdError);

    #[test]
    fn no_available_slot_mentions_capacity() {
        let error = PoolError::NoAvailableSlot { capacity: 16 };

        assert_eq!(error.to_string(), "no available slot in pool of capacity 16");
    }

    #[test]
    fn handle_errors_mention_handle() {
        let out_of_bounds = HandleError::HandleOutOfBounds {
            index: 9,
            capacity: 4,
        };
        let invalid = HandleError::HandleInvalid {
            index: 2,
            generation: 5,
        };

        assert_eq!(
            out_of_bounds.to_string(),
            "handle index 9 is out of bounds for pool of capacity 4"
        );
        assert_eq!(invalid.to_string(), "handle 2v5 does not refer to a live item");
    }
}
