#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A fixed-capacity object pool that hands out generational handles.
//!
//! This crate provides [`GenerationalPool`], a pool of at most `CAPACITY` items stored inline in
//! a fixed array. Adding an item returns a [`Handle`] instead of a reference or a bare index.
//! A handle either resolves to the exact item it was issued for or reports itself as invalid.
//! It never silently resolves to a different item that was later placed into the same slot.
//!
//! This is useful for systems that need stable, checkable references into a bounded set of
//! resources without reference counting: simulation entities, render objects, connection tables.
//!
//! # Key features
//!
//! - **Compile-time capacity**: storage is a fixed inline array, the pool never allocates.
//! - **Generational handles**: small `Copy` values that detect use after removal.
//! - **Explicit errors**: every fallible operation returns a [`Result`], nothing panics on bad
//!   handles.
//! - **Ordered iteration**: items are threaded onto an intrusive list and iterated most recently
//!   added first.
//! - **Drop policies**: optionally panic if a pool is dropped while still holding items.
//!
//! # Example
//!
//! ```rust
//! use generational_pool::{GenerationalPool, HandleError};
//!
//! let mut pool = GenerationalPool::<String, 16>::new();
//!
//! let alice = pool.add("Alice".to_string()).unwrap();
//! let bob = pool.add("Bob".to_string()).unwrap();
//!
//! assert_eq!(pool.get(alice).unwrap(), "Alice");
//!
//! pool.remove(alice).unwrap();
//!
//! // The handle to the removed item is now invalid, even if its slot gets reused.
//! let charlie = pool.add("Charlie".to_string()).unwrap();
//! assert!(matches!(
//!     pool.get(alice),
//!     Err(HandleError::HandleInvalid { .. })
//! ));
//!
//! // Iteration yields the most recently added items first.
//! let names = pool.iter().map(String::as_str).collect::<Vec<_>>();
//! assert_eq!(names, ["Charlie", "Bob"]);
//! # _ = (bob, charlie);
//! ```
//!
//! # Exhausted slots
//!
//! Each slot counts how many times it has been freed. Once the counter of a slot reaches
//! [`Generation::MAX`], the slot is retired for good rather than letting the counter wrap around
//! and make old handles valid again. Only [`GenerationalPool::clear()`] brings such slots back.
//!
//! # Logging
//!
//! The pool emits [`tracing`](https://docs.rs/tracing) events: `trace` for every added and removed
//! item, `debug` for rejected items, exhausted slots and cleared pools.

mod builder;
mod drop_policy;
mod error;
mod handle;
mod iter;
mod pool;

pub use builder::*;
pub use drop_policy::*;
pub use error::*;
pub use handle::*;
pub use iter::*;
pub use pool::*;
