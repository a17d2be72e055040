use smallvec::SmallVec;

use super::handle::Handle;
use super::node::Node;
use super::raw_tree::RawTree;

/// One step of a root-to-leaf walk: an interior node and the child slot taken.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Frame {
    pub(crate) node: Handle,
    pub(crate) child_index: usize,
}

/// Frames of a single walk, innermost ancestor last. Never outlives the call
/// that built it; 16 levels of order 1 already hold 65536 keys.
pub(crate) type Backtrace = SmallVec<[Frame; 16]>;

impl RawTree {
    /// Walks from the root to the leaf that owns `key`, present or not.
    ///
    /// At each interior level the child taken is the first separator `>= key`.
    /// Panics on an empty tree.
    pub(crate) fn descend(&self, key: u32) -> (Handle, Backtrace) {
        let mut current = self.root.expect("`RawTree::descend()` - tree is empty!");
        let mut backtrace = Backtrace::new();

        loop {
            match self.nodes.get(current) {
                Node::Interior(interior) => {
                    let child_index = interior.search_child(key);
                    backtrace.push(Frame {
                        node: current,
                        child_index,
                    });
                    current = interior.child(child_index);
                }
                Node::Leaf(_) => break,
            }
        }

        debug_assert_eq!(backtrace.len() + 1, self.height, "`RawTree::descend()` - leaves at uneven depth");

        #[cfg(feature = "tracing")]
        tracing::trace!(key, leaf = ?current, depth = backtrace.len(), "descended");

        (current, backtrace)
    }

    /// The child left of the one recorded in `parent`, if that parent has one.
    ///
    /// Only the immediate parent is consulted: the leftmost child of a node has
    /// no left sibling even when a neighbouring subtree sits right next to it.
    pub(crate) fn left_sibling(&self, parent: Option<Frame>) -> Option<Handle> {
        let frame = parent?;
        let index = frame.child_index.checked_sub(1)?;
        Some(self.nodes.get(frame.node).as_interior().child(index))
    }

    /// The child right of the one recorded in `parent`, with the same scope as
    /// [`left_sibling`](Self::left_sibling).
    pub(crate) fn right_sibling(&self, parent: Option<Frame>) -> Option<Handle> {
        let frame = parent?;
        let interior = self.nodes.get(frame.node).as_interior();
        let index = frame.child_index + 1;
        (index < interior.child_count()).then(|| interior.child(index))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::super::raw_tree::tests::tree_of;
    use crate::raw::node::SearchResult;
    use proptest::prelude::*;

    #[test]
    #[should_panic(expected = "`RawTree::descend()` - tree is empty!")]
    fn descend_on_empty_tree_panics() {
        let tree = tree_of(2, &[]);
        let _ = tree.descend(1);
    }

    #[test]
    fn single_leaf_has_no_backtrace_or_siblings() {
        let tree = tree_of(2, &[10, 20]);
        let (leaf, backtrace) = tree.descend(15);
        assert_eq!(Some(leaf), tree.root);
        assert!(backtrace.is_empty());
        assert_eq!(tree.left_sibling(backtrace.last().copied()), None);
        assert_eq!(tree.right_sibling(backtrace.last().copied()), None);
        assert_eq!(tree.node(leaf).as_leaf().search(15), SearchResult::NotFound(1));
    }

    #[test]
    fn siblings_come_from_the_parent_frame() {
        // Order 1 splits into [10 20] [30] under root [20].
        let tree = tree_of(1, &[10, 20, 30]);
        assert_eq!(tree.leaf_keys(), alloc::vec![alloc::vec![10, 20], alloc::vec![30]]);
        assert_eq!(tree.root_keys(), [20]);

        let (left, backtrace) = tree.descend(5);
        let frame = backtrace.last().copied();
        assert_eq!(frame.map(|f| f.child_index), Some(0));
        assert_eq!(tree.left_sibling(frame), None);
        let right = tree.right_sibling(frame).unwrap();
        assert_eq!(tree.node(right).as_leaf().keys(), &[30]);

        let (leaf, backtrace) = tree.descend(u32::MAX);
        let frame = backtrace.last().copied();
        assert_eq!(leaf, right);
        assert_eq!(tree.left_sibling(frame), Some(left));
        assert_eq!(tree.right_sibling(frame), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn descent_reaches_the_leaf_holding_each_key(keys in prop::collection::btree_set(any::<u32>(), 1..300)) {
            let keys: alloc::vec::Vec<u32> = keys.into_iter().collect();
            let tree = tree_of(2, &keys);

            for &key in &keys {
                let (leaf, backtrace) = tree.descend(key);
                prop_assert_eq!(backtrace.len() + 1, tree.height());
                prop_assert!(matches!(tree.node(leaf).as_leaf().search(key), SearchResult::Found(_)));
                for frame in &backtrace {
                    let interior = tree.node(frame.node).as_interior();
                    prop_assert!(frame.child_index < interior.child_count());
                }
            }
        }
    }
}
