/// Determines what happens to items still in the pool when the pool is dropped.
///
/// By default, the pool drops its items when it is dropped.
///
/// # Examples
///
/// ```
/// use generational_pool::{DropPolicy, GenerationalPool};
///
/// // The drop policy is set at pool creation time.
/// let pool = GenerationalPool::<u32, 8>::builder()
///     .drop_policy(DropPolicy::MustNotDropItems)
///     .build();
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum DropPolicy {
    /// The pool will drop its items when the pool is dropped. This is the default.
    #[default]
    MayDropItems,

    /// The pool will panic if it still contains items when it is dropped.
    ///
    /// This is useful when every item represents a resource that must be released explicitly
    /// (a connection, a GPU buffer) and silently dropping it with the pool would be a leak.
    MustNotDropItems,
}
