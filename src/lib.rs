//! An in-memory B+tree over `u32` keys that delays splits by overflowing
//! into sibling leaves.
//!
//! [`OverflowBTree`] stores keys only in its leaves and keeps, in every
//! interior node, the maximum key of each child subtree. When a leaf is full,
//! an insertion first tries to shift one key into the left or right sibling
//! under the same parent (a *squeeze*) and only splits the leaf when neither
//! has room. Splits propagate upward and may grow a new root.
//!
//! # Example
//!
//! ```
//! use overflow_btree::{Error, Order, OverflowBTree};
//!
//! let mut tree = OverflowBTree::with_order(Order::new(2).unwrap());
//! for key in [100, 110, 120, 130] {
//!     tree.insert(key).unwrap();
//! }
//! assert_eq!(tree.height(), 1);
//!
//! // The fifth key overflows the root leaf: lower half keeps K + 1 keys.
//! tree.insert(135).unwrap();
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.node_count(), 3);
//!
//! assert_eq!(tree.insert(120), Err(Error::DuplicateKey(120)));
//! assert_eq!(format!("{tree:?}"), "{100, 110, 120, 130, 135}");
//!
//! tree.destroy();
//! assert_eq!(tree.node_count(), 0);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **Arena-backed** - Nodes refer to each other by index, never by pointer
//! - **Iterative teardown** - [`OverflowBTree::destroy`] never recurses
//! - **`tracing`** (optional) - Emits `tracing` events for squeezes, splits and
//!   root growth
//!
//! Lookup, removal and range queries are not provided.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order;
mod raw;

pub mod overflow_btree;

pub use error::{Error, Result};
pub use order::Order;
pub use overflow_btree::OverflowBTree;
