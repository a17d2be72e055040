use smallvec::SmallVec;

use super::descent::Frame;
use super::handle::Handle;
use super::node::Node;
use super::raw_tree::RawTree;

impl RawTree {
    /// Releases every node in post-order and leaves the tree empty.
    ///
    /// The walk keeps its own stack instead of recursing. Each frame's
    /// `child_index` counts the children still to visit, consumed from the last
    /// slot backwards; a node is released once it reaches zero. Returns the
    /// number of nodes released.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip(self), fields(height = self.height)))]
    pub(crate) fn destroy(&mut self) -> usize {
        let Some(root) = self.root.take() else {
            return 0;
        };

        let mut stack: SmallVec<[Frame; 16]> = SmallVec::new();
        let mut cursor: Option<Handle> = Some(root);
        let mut released = 0usize;

        loop {
            if let Some(handle) = cursor.take() {
                let children = match self.nodes.get(handle) {
                    Node::Leaf(_) => None,
                    Node::Interior(interior) => Some(interior.child_count()),
                };
                match children {
                    None => {
                        self.nodes.release(handle);
                        released += 1;
                    }
                    Some(child_index) => stack.push(Frame {
                        node: handle,
                        child_index,
                    }),
                }
            }

            let Some(top) = stack.last_mut() else {
                break;
            };
            if top.child_index == 0 {
                let node = top.node;
                stack.pop();
                self.nodes.release(node);
                released += 1;
            } else {
                top.child_index -= 1;
                cursor = Some(self.nodes.get(top.node).as_interior().child(top.child_index));
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(released, "destroyed tree");

        self.reset();
        released
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::super::raw_tree::tests::tree_of;
    use super::*;
    use crate::order::Order;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    #[test]
    fn destroy_empty_tree_is_a_no_op() {
        let mut tree = RawTree::new(Order::DEFAULT);
        assert_eq!(tree.destroy(), 0);
        assert_eq!(tree.destroy(), 0);
        tree.validate_invariants();
    }

    #[test]
    fn destroy_lone_root_leaf() {
        let mut tree = tree_of(2, &[7]);
        assert_eq!(tree.destroy(), 1);
        assert_eq!(tree.height(), 0);
        assert!(tree.is_empty());
        tree.validate_invariants();
    }

    #[test]
    fn destroy_releases_every_node_once() {
        let keys: Vec<u32> = (0..500).map(|i| (i * 7919) % 1000).collect();
        let mut tree = tree_of(1, &keys);
        assert!(tree.height() >= 4);
        let nodes = tree.node_count();

        // A second release of any handle would panic inside the arena.
        assert_eq!(tree.destroy(), nodes);
        assert_eq!(tree.node_count(), 0);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.len(), 0);
        assert!(tree.root.is_none());
        assert!(tree.first_leaf().is_none());
        tree.validate_invariants();
    }

    #[test]
    fn tree_is_reusable_after_destroy() {
        let mut tree = tree_of(2, &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        tree.destroy();
        for key in [30, 10, 20] {
            tree.insert(key).unwrap();
        }
        tree.validate_invariants();
        assert_eq!(tree.leaf_keys().concat(), [10, 20, 30]);
        assert_eq!(tree.node_count(), 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn destroy_matches_live_node_count(
            k in 1usize..=4,
            keys in prop::collection::vec(any::<u32>(), 0..400),
        ) {
            let mut tree = tree_of(k, &[]);
            for key in keys {
                let _ = tree.insert(key);
            }
            let nodes = tree.node_count();
            prop_assert_eq!(tree.destroy(), nodes);
            prop_assert_eq!(tree.node_count(), 0);
            prop_assert_eq!(tree.height(), 0);
        }
    }
}
