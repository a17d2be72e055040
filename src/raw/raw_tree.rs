use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;
use crate::order::Order;

/// The tree head backing `OverflowBTree`.
///
/// The descent, insertion and destruction algorithms live in their own
/// modules as further `impl RawTree` blocks.
pub(crate) struct RawTree {
    /// Order `K` fixed at construction.
    pub(super) order: Order,
    /// Arena owning every node; parents refer to children by handle.
    pub(super) nodes: Arena<Node>,
    /// Root node, absent exactly when `height == 0`.
    pub(super) root: Option<Handle>,
    /// 0 for an empty tree, 1 when the root is a leaf.
    pub(super) height: usize,
    /// Number of keys stored.
    pub(super) len: usize,
    /// Leftmost leaf, where in-order walks start.
    pub(super) first_leaf: Option<Handle>,
    /// Rightmost leaf.
    pub(super) last_leaf: Option<Handle>,
}

impl RawTree {
    pub(crate) const fn new(order: Order) -> Self {
        Self {
            order,
            nodes: Arena::new(),
            root: None,
            height: 0,
            len: 0,
            first_leaf: None,
            last_leaf: None,
        }
    }

    pub(crate) const fn order(&self) -> Order {
        self.order
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) const fn height(&self) -> usize {
        self.height
    }

    /// Number of live nodes, interior and leaf.
    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn first_leaf(&self) -> Option<Handle> {
        self.first_leaf
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node {
        self.nodes.get(handle)
    }

    /// Forgets every node at once, used after destruction has released them all.
    pub(super) fn reset(&mut self) {
        self.nodes.reset();
        self.root = None;
        self.height = 0;
        self.len = 0;
        self.first_leaf = None;
        self.last_leaf = None;
    }
}
