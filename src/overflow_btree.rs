use core::fmt;
use core::iter::FusedIterator;

use crate::error::Result;
use crate::order::Order;
use crate::raw::{Handle, RawTree};

/// An ordered set of `u32` keys stored in a B+tree with overflow.
///
/// Keys live only in the leaves; interior nodes hold, for every child but the
/// last, the largest key of that child's subtree. Before a full leaf is split
/// the tree tries to move one key into the leaf's left sibling, then its right
/// sibling, so leaves fill up further than in a plain B+tree. Siblings are only
/// looked up under the same parent.
///
/// All leaves are chained left to right; [`OverflowBTree::iter`] walks that
/// chain.
///
/// # Examples
///
/// ```
/// use overflow_btree::{Error, Order, OverflowBTree};
///
/// let mut tree = OverflowBTree::with_order(Order::new(2)?);
/// for key in [177, 248, 124, 75, 133, 230] {
///     tree.insert(key)?;
/// }
/// assert_eq!(tree.insert(124), Err(Error::DuplicateKey(124)));
///
/// assert_eq!(tree.len(), 6);
/// assert_eq!(tree.height(), 2);
/// assert!(tree.iter().eq([75, 124, 133, 177, 230, 248]));
///
/// tree.destroy();
/// assert!(tree.is_empty());
/// assert_eq!(tree.height(), 0);
/// # Ok::<(), Error>(())
/// ```
pub struct OverflowBTree {
    raw: RawTree,
}

/// An iterator over the keys of an `OverflowBTree`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`OverflowBTree`].
///
/// [`iter`]: OverflowBTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a> {
    tree: &'a RawTree,
    leaf: Option<Handle>,
    index: usize,
    remaining: usize,
}

impl OverflowBTree {
    /// Makes a new, empty tree of order [`Order::DEFAULT`].
    ///
    /// Does not allocate anything on its own.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_order(Order::DEFAULT)
    }

    /// Makes a new, empty tree whose nodes hold up to `order.capacity()` keys.
    #[must_use]
    pub const fn with_order(order: Order) -> Self {
        OverflowBTree {
            raw: RawTree::new(order),
        }
    }

    /// Returns the order the tree was built with.
    #[must_use]
    pub const fn order(&self) -> Order {
        self.raw.order()
    }

    /// Inserts `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`](crate::Error::DuplicateKey) if `key` is
    /// already present; the tree is left exactly as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use overflow_btree::{Error, OverflowBTree};
    ///
    /// let mut tree = OverflowBTree::new();
    /// assert_eq!(tree.insert(103), Ok(()));
    /// assert_eq!(tree.insert(103), Err(Error::DuplicateKey(103)));
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(K log n): one root-to-leaf walk, plus at most one sibling and one node
    /// split per level.
    pub fn insert(&mut self, key: u32) -> Result<()> {
        self.raw.insert(key)
    }

    /// Releases every node and leaves the tree empty, keeping its order.
    ///
    /// Calling it on an empty tree does nothing. The tree can be reused.
    ///
    /// # Complexity
    ///
    /// O(number of nodes), without recursion.
    pub fn destroy(&mut self) {
        self.raw.destroy();
    }

    /// Returns the number of keys in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree holds no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Number of levels: 0 when empty, 1 while the root is a leaf.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.raw.height()
    }

    /// Returns the number of nodes, interior and leaf, currently allocated.
    ///
    /// A squeeze leaves this unchanged; a leaf split adds one node plus one
    /// for every interior node split and one for a new root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.raw.node_count()
    }

    /// Gets an iterator that visits the keys in ascending order by following
    /// the leaf chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use overflow_btree::OverflowBTree;
    ///
    /// let mut tree = OverflowBTree::new();
    /// for key in [3, 1, 2] {
    ///     tree.insert(key).unwrap();
    /// }
    /// let keys: Vec<u32> = tree.iter().collect();
    /// assert_eq!(keys, [1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            tree: &self.raw,
            leaf: self.raw.first_leaf(),
            index: 0,
            remaining: self.raw.len(),
        }
    }
}

impl Default for OverflowBTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OverflowBTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a OverflowBTree {
    type Item = u32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl Iterator for Iter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        loop {
            let leaf = self.tree.node(self.leaf?).as_leaf();
            if self.index < leaf.key_count() {
                let key = leaf.key(self.index);
                self.index += 1;
                self.remaining -= 1;
                return Some(key);
            }
            self.leaf = leaf.next();
            self.index = 0;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl Clone for Iter<'_> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            leaf: self.leaf,
            index: self.index,
            remaining: self.remaining,
        }
    }
}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
