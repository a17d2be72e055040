use smallvec::SmallVec;

use super::handle::Handle;
use crate::order::Order;

// Nodes of the default order stay inline. The extra slot lets a node overflow
// by one key right before it is split.
const INLINE_KEYS: usize = Order::DEFAULT.capacity() + 1;
const INLINE_CHILDREN: usize = INLINE_KEYS + 1;

pub(crate) type Keys = SmallVec<[u32; INLINE_KEYS]>;
pub(crate) type Children = SmallVec<[Handle; INLINE_CHILDREN]>;

#[allow(clippy::large_enum_variant)]
pub(crate) enum Node {
    Interior(InteriorNode),
    Leaf(LeafNode),
}

// Separator-by-maximum: keys[i] is the largest key under children[i]. The last
// child has no separator here; its maximum is recorded by an ancestor, if any.
pub(crate) struct InteriorNode {
    keys: Keys,
    children: Children,
}

pub(crate) struct LeafNode {
    prev: Option<Handle>,
    next: Option<Handle>,
    keys: Keys,
}

/// Result of searching for a key in a leaf.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SearchResult {
    /// Key is stored at the given index.
    Found(usize),
    /// Key is absent; index is where it would be inserted.
    NotFound(usize),
}

impl Node {
    /// Returns the leaf node, panicking if this is not a leaf.
    pub(crate) fn as_leaf(&self) -> &LeafNode {
        match self {
            Node::Leaf(leaf) => leaf,
            Node::Interior(_) => panic!("expected leaf node"),
        }
    }

    /// Returns the leaf node mutably, panicking if this is not a leaf.
    pub(crate) fn as_leaf_mut(&mut self) -> &mut LeafNode {
        match self {
            Node::Leaf(leaf) => leaf,
            Node::Interior(_) => panic!("expected leaf node"),
        }
    }

    /// Returns the interior node, panicking if this is a leaf.
    pub(crate) fn as_interior(&self) -> &InteriorNode {
        match self {
            Node::Interior(interior) => interior,
            Node::Leaf(_) => panic!("expected interior node"),
        }
    }

    /// Returns the interior node mutably, panicking if this is a leaf.
    pub(crate) fn as_interior_mut(&mut self) -> &mut InteriorNode {
        match self {
            Node::Interior(interior) => interior,
            Node::Leaf(_) => panic!("expected interior node"),
        }
    }

    #[cfg(test)]
    pub(crate) fn key_count(&self) -> usize {
        match self {
            Node::Interior(interior) => interior.key_count(),
            Node::Leaf(leaf) => leaf.key_count(),
        }
    }
}

impl InteriorNode {
    /// Creates a root above two halves of a split: `separator` is the maximum of `left`.
    pub(crate) fn new_root(separator: u32, left: Handle, right: Handle) -> Self {
        let mut keys = Keys::new();
        keys.push(separator);
        let mut children = Children::new();
        children.push(left);
        children.push(right);
        Self { keys, children }
    }

    pub(crate) fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn child_count(&self) -> usize {
        self.children.len()
    }

    #[cfg(test)]
    pub(crate) fn key(&self, index: usize) -> u32 {
        self.keys[index]
    }

    #[cfg(test)]
    pub(crate) fn keys(&self) -> &[u32] {
        &self.keys
    }

    #[inline]
    pub(crate) fn child(&self, index: usize) -> Handle {
        self.children[index]
    }

    #[cfg(test)]
    pub(crate) fn children(&self) -> &[Handle] {
        &self.children
    }

    /// Index of the child whose subtree owns `key`: the first separator `>= key`,
    /// or the last child when every separator is smaller.
    #[inline]
    pub(crate) fn search_child(&self, key: u32) -> usize {
        match self.keys.binary_search(&key) {
            Ok(index) | Err(index) => index,
        }
    }

    pub(crate) fn set_key(&mut self, index: usize, key: u32) {
        self.keys[index] = key;
    }

    /// Splices the upper half of a split child that sat at `index`.
    ///
    /// `separator` becomes the key of the lower half (still at `index`) and
    /// `child` is placed right after it; the old separator at `index` moves
    /// with it, since it was the maximum of what is now the upper half.
    pub(crate) fn insert_child(&mut self, index: usize, separator: u32, child: Handle) {
        self.keys.insert(index, separator);
        self.children.insert(index + 1, child);
    }

    /// Splits a node that overflowed to `2K + 1` keys.
    ///
    /// This node keeps `keys[..K]` and `children[..=K]`, the returned node gets
    /// `keys[K + 1..]` and `children[K + 1..]`, and `keys[K]` (the maximum of
    /// this node's last child) is returned as the separator for the parent.
    pub(crate) fn split(&mut self, order: Order) -> (u32, InteriorNode) {
        assert_eq!(
            self.keys.len(),
            order.capacity() + 1,
            "`InteriorNode::split()` - node has not overflowed"
        );
        let k = order.k();

        let right = InteriorNode {
            keys: self.keys.drain(k + 1..).collect(),
            children: self.children.drain(k + 1..).collect(),
        };
        let separator = self.keys.pop().expect("`InteriorNode::split()` - missing median");

        (separator, right)
    }
}

impl LeafNode {
    pub(crate) fn new() -> Self {
        Self {
            prev: None,
            next: None,
            keys: Keys::new(),
        }
    }

    pub(crate) fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn has_room(&self, order: Order) -> bool {
        self.keys.len() < order.capacity()
    }

    #[inline]
    pub(crate) fn key(&self, index: usize) -> u32 {
        self.keys[index]
    }

    #[cfg(test)]
    pub(crate) fn keys(&self) -> &[u32] {
        &self.keys
    }

    pub(crate) fn last_key(&self) -> Option<u32> {
        self.keys.last().copied()
    }

    #[cfg(test)]
    pub(crate) fn prev(&self) -> Option<Handle> {
        self.prev
    }

    pub(crate) fn set_prev(&mut self, prev: Option<Handle>) {
        self.prev = prev;
    }

    pub(crate) fn next(&self) -> Option<Handle> {
        self.next
    }

    pub(crate) fn set_next(&mut self, next: Option<Handle>) {
        self.next = next;
    }

    #[inline]
    pub(crate) fn search(&self, key: u32) -> SearchResult {
        match self.keys.binary_search(&key) {
            Ok(index) => SearchResult::Found(index),
            Err(index) => SearchResult::NotFound(index),
        }
    }

    pub(crate) fn insert(&mut self, index: usize, key: u32) {
        self.keys.insert(index, key);
    }

    pub(crate) fn push(&mut self, key: u32) {
        self.keys.push(key);
    }

    pub(crate) fn push_front(&mut self, key: u32) {
        self.keys.insert(0, key);
    }

    pub(crate) fn pop(&mut self) -> Option<u32> {
        self.keys.pop()
    }

    pub(crate) fn pop_front(&mut self) -> Option<u32> {
        if self.keys.is_empty() {
            None
        } else {
            Some(self.keys.remove(0))
        }
    }

    /// Splits a leaf that overflowed to `2K + 1` keys: this leaf keeps the
    /// lower `K + 1`, the returned leaf (unlinked) holds the upper `K`.
    pub(crate) fn split(&mut self, order: Order) -> LeafNode {
        assert_eq!(
            self.keys.len(),
            order.capacity() + 1,
            "`LeafNode::split()` - leaf has not overflowed"
        );
        let mut right = LeafNode::new();
        right.keys = self.keys.drain(order.k() + 1..).collect();
        right
    }
}
