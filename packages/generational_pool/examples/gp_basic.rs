//! Basic usage of the `generational_pool` crate:
//!
//! * Creating a pool.
//! * Adding items.
//! * Retrieving items.
//! * Removing items and observing that stale handles are detected.
//! * Iterating over the remaining items.
//!
//! Run with `RUST_LOG=trace` to see the events emitted by the pool.

use generational_pool::{GenerationalPool, HandleError};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut pool = GenerationalPool::<String, 4>::new();

    // Adding an item gives you a handle that you can later use to look up the item again.
    let alice = pool.add("Alice".to_string()).unwrap();
    let bob = pool.add("Bob".to_string()).unwrap();
    let charlie = pool.add("Charlie".to_string()).unwrap();

    println!(
        "Pool contains {} items, with a fixed capacity of {}",
        pool.len(),
        pool.capacity()
    );

    println!("Retrieved item: {}", pool.get(alice).unwrap());

    pool.remove(bob).unwrap();

    // The slot Bob occupied may be reused, but his handle will never resolve to the new item.
    let dave = pool.add("Dave".to_string()).unwrap();

    match pool.get(bob) {
        Ok(item) => println!("Unexpectedly found {item} through a stale handle"),
        Err(HandleError::HandleInvalid { index, generation }) => {
            println!("Handle {index}v{generation} is stale, as expected");
        }
        Err(error) => println!("Unexpected error: {error}"),
    }

    // You can also modify the items in-place.
    pool.get_mut(charlie).unwrap().push_str(" Smith");

    // Iteration yields the most recently added items first.
    for item in &pool {
        println!("In pool: {item}");
    }

    for handle in pool.handles() {
        println!("Handle {handle:?} is live");
    }

    // Filling the pool up makes further additions fail instead of evicting anything.
    pool.add("Eve".to_string()).unwrap();

    if let Err(error) = pool.add("Frank".to_string()) {
        println!("Could not add Frank: {error}");
    }

    let taken = pool.take(dave).unwrap();
    println!("Took {taken} back out of the pool");
}
