use super::descent::{Backtrace, Frame};
use super::handle::Handle;
use super::node::{InteriorNode, LeafNode, Node, SearchResult};
use super::raw_tree::RawTree;
use crate::error::{Error, Result};

impl RawTree {
    /// Inserts `key`, returning [`Error::DuplicateKey`] without touching the
    /// tree when it is already stored.
    ///
    /// A full leaf first tries to hand one key to its left sibling, then to its
    /// right sibling, and only splits when both are full (or absent).
    pub(crate) fn insert(&mut self, key: u32) -> Result<()> {
        if self.root.is_none() {
            self.plant_first_leaf(key);
            return Ok(());
        }

        let (leaf_handle, mut backtrace) = self.descend(key);

        let leaf = self.nodes.get_mut(leaf_handle).as_leaf_mut();
        let index = match leaf.search(key) {
            SearchResult::Found(_) => return Err(Error::DuplicateKey(key)),
            SearchResult::NotFound(index) => index,
        };
        self.len += 1;

        if leaf.has_room(self.order) {
            leaf.insert(index, key);
            return Ok(());
        }

        let parent = backtrace.last().copied();
        if self.squeeze_left(leaf_handle, parent, index, key) || self.squeeze_right(leaf_handle, parent, index, key) {
            return Ok(());
        }

        self.split_leaf(leaf_handle, index, key, &mut backtrace);
        Ok(())
    }

    fn plant_first_leaf(&mut self, key: u32) {
        debug_assert_eq!(self.height, 0, "`RawTree::plant_first_leaf()` - tree is not empty");
        let mut leaf = LeafNode::new();
        leaf.push(key);
        let handle = self.nodes.alloc(Node::Leaf(leaf));
        self.root = Some(handle);
        self.first_leaf = Some(handle);
        self.last_leaf = Some(handle);
        self.height = 1;
        self.len = 1;
    }

    /// Makes room in a full leaf by moving its smallest key into a non-full
    /// left sibling. With `index == 0` the new key itself goes over instead.
    fn squeeze_left(&mut self, leaf_handle: Handle, parent: Option<Frame>, index: usize, key: u32) -> bool {
        let Some(left_handle) = self.left_sibling(parent) else {
            return false;
        };
        if !self.nodes.get(left_handle).as_leaf().has_room(self.order) {
            return false;
        }

        let moved = if index == 0 {
            key
        } else {
            let leaf = self.nodes.get_mut(leaf_handle).as_leaf_mut();
            let first = leaf.pop_front().expect("`RawTree::squeeze_left()` - leaf is empty");
            leaf.insert(index - 1, key);
            first
        };
        self.nodes.get_mut(left_handle).as_leaf_mut().push(moved);

        // `moved` is the left sibling's new maximum.
        let frame = parent.expect("`RawTree::squeeze_left()` - sibling without parent");
        self.nodes.get_mut(frame.node).as_interior_mut().set_key(frame.child_index - 1, moved);

        #[cfg(feature = "tracing")]
        tracing::debug!(key, moved, "squeezed into left sibling");

        true
    }

    /// Mirror of [`squeeze_left`](Self::squeeze_left): the largest key moves to
    /// the front of a non-full right sibling, or the new key does when it would
    /// land past the end of the leaf.
    fn squeeze_right(&mut self, leaf_handle: Handle, parent: Option<Frame>, index: usize, key: u32) -> bool {
        let Some(right_handle) = self.right_sibling(parent) else {
            return false;
        };
        if !self.nodes.get(right_handle).as_leaf().has_room(self.order) {
            return false;
        }

        let leaf = self.nodes.get_mut(leaf_handle).as_leaf_mut();
        let moved = if index == self.order.capacity() {
            key
        } else {
            let last = leaf.pop().expect("`RawTree::squeeze_right()` - leaf is empty");
            leaf.insert(index, key);
            last
        };
        let leaf_max = leaf.last_key().expect("`RawTree::squeeze_right()` - leaf is empty");
        self.nodes.get_mut(right_handle).as_leaf_mut().push_front(moved);

        let frame = parent.expect("`RawTree::squeeze_right()` - sibling without parent");
        self.nodes.get_mut(frame.node).as_interior_mut().set_key(frame.child_index, leaf_max);

        #[cfg(feature = "tracing")]
        tracing::debug!(key, moved, "squeezed into right sibling");

        true
    }

    /// Splits a full leaf around the new key: the leaf keeps the lower `K + 1`
    /// keys, a new leaf linked right after it takes the upper `K`.
    fn split_leaf(&mut self, leaf_handle: Handle, index: usize, key: u32, backtrace: &mut Backtrace) {
        let order = self.order;
        let leaf = self.nodes.get_mut(leaf_handle).as_leaf_mut();
        leaf.insert(index, key);
        let mut upper = leaf.split(order);
        let separator = leaf.last_key().expect("`RawTree::split_leaf()` - lower half is empty");

        let old_next = leaf.next();
        upper.set_prev(Some(leaf_handle));
        upper.set_next(old_next);
        let upper_handle = self.nodes.alloc(Node::Leaf(upper));

        self.nodes.get_mut(leaf_handle).as_leaf_mut().set_next(Some(upper_handle));
        match old_next {
            Some(next) => self.nodes.get_mut(next).as_leaf_mut().set_prev(Some(upper_handle)),
            None => self.last_leaf = Some(upper_handle),
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(key, separator, upper = ?upper_handle, "split leaf");

        self.propagate_split(backtrace, separator, upper_handle);
    }

    /// Hands `separator` and the new right half `new_child` to each ancestor in
    /// turn, splitting ancestors that overflow, and grows a new root when the
    /// backtrace runs out.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self, backtrace), fields(depth = backtrace.len()))
    )]
    fn propagate_split(&mut self, backtrace: &mut Backtrace, mut separator: u32, mut new_child: Handle) {
        let order = self.order;

        while let Some(frame) = backtrace.pop() {
            let parent = self.nodes.get_mut(frame.node).as_interior_mut();
            parent.insert_child(frame.child_index, separator, new_child);
            if parent.key_count() <= order.capacity() {
                return;
            }

            let (promoted, right) = parent.split(order);
            separator = promoted;
            new_child = self.nodes.alloc(Node::Interior(right));

            #[cfg(feature = "tracing")]
            tracing::debug!(separator, right = ?new_child, "split interior node");
        }

        let old_root = self.root.expect("`RawTree::propagate_split()` - tree has no root");
        let new_root = self.nodes.alloc(Node::Interior(InteriorNode::new_root(separator, old_root, new_child)));
        self.root = Some(new_root);
        self.height += 1;

        #[cfg(feature = "tracing")]
        tracing::debug!(separator, height = self.height, "grew new root");
    }
}
