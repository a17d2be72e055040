use core::fmt;

use crate::error::{Error, Result};

/// The order `K` of an [`OverflowBTree`](crate::OverflowBTree).
///
/// Every node holds at most `2K` keys and every non-root node at least `K`.
/// Small orders produce tall trees with frequent squeezes and splits, which is
/// mostly useful for testing; the default of 25 keeps nodes about 200 bytes.
///
/// # Examples
///
/// ```
/// use overflow_btree::Order;
///
/// let order = Order::new(2).unwrap();
/// assert_eq!(order.k(), 2);
/// assert_eq!(order.capacity(), 4);
///
/// assert!(Order::new(0).is_err());
/// assert_eq!(Order::default(), Order::DEFAULT);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Order(u8);

impl Order {
    /// Smallest supported order.
    pub const MIN: Self = Self(1);
    /// Largest supported order; `2K` must fit the 8-bit key count of a node.
    pub const MAX: Self = Self(127);
    /// The order used by [`OverflowBTree::new`](crate::OverflowBTree::new).
    pub const DEFAULT: Self = Self(25);

    /// Creates an order, rejecting values outside [`Order::MIN`]`..=`[`Order::MAX`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOrder`] when `k` is out of range.
    pub const fn new(k: usize) -> Result<Self> {
        if k < Self::MIN.0 as usize || k > Self::MAX.0 as usize {
            return Err(Error::InvalidOrder(k));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(k as u8))
    }

    /// Returns `K`.
    #[must_use]
    pub const fn k(self) -> usize {
        self.0 as usize
    }

    /// Returns the maximum number of keys in one node, `2K`.
    #[must_use]
    pub const fn capacity(self) -> usize {
        2 * self.k()
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for Order {
    type Error = Error;

    fn try_from(k: usize) -> Result<Self> {
        Self::new(k)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k={}", self.0)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn order_bounds() {
        assert_eq!(Order::new(0), Err(Error::InvalidOrder(0)));
        assert_eq!(Order::new(128), Err(Error::InvalidOrder(128)));
        assert_eq!(Order::new(1), Ok(Order::MIN));
        assert_eq!(Order::new(127), Ok(Order::MAX));
        assert_eq!(Order::try_from(25), Ok(Order::DEFAULT));
    }

    #[test]
    fn order_display() {
        assert_eq!(alloc::format!("{}", Order::DEFAULT), "k=25");
    }

    proptest! {
        #[test]
        fn capacity_is_twice_k(k in 1usize..=127) {
            let order = Order::new(k).unwrap();
            prop_assert_eq!(order.k(), k);
            prop_assert_eq!(order.capacity(), 2 * k);
        }
    }
}
