/// Errors reported by [`OverflowBTree`](crate::OverflowBTree) and [`Order`](crate::Order).
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The key is already stored in the tree. The tree was not modified.
    #[error("key {0} is already present")]
    DuplicateKey(u32),
    /// The requested order is outside `Order::MIN..=Order::MAX`.
    #[error("order {0} is out of range (expected 1..=127)")]
    InvalidOrder(usize),
}

/// Shorthand for results carrying the crate [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
