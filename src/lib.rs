//! `rb_ordered_tree` is an ordered set of keys based on a red-black tree.
//!
//! Insertion, lookup and in-order traversal stay O(logN) whatever order keys arrive in:
//! after every insertion a bounded sequence of recolorings and rotations restores the
//! red-black invariants.
//!
//! Nodes live in a `Vec` and refer to their parent and children by
//! index instead of by pointer. Slot 0 holds a single black sentinel standing in for
//! every absent child. The tree is therefore `Send` and `Sync` whenever its keys are,
//! and holds no `unsafe` pointer juggling.
//!
//! Inserting a key that is already present is a no-op, and there is no removal.
//!
//! # Example
//!
//! ```rust
//! use rb_ordered_tree::RbTree;
//!
//! let mut tree = RbTree::new();
//! for key in [10, 20, 30, 15, 25, 5] {
//!     tree.insert(key);
//! }
//! assert!(tree.contains(&15));
//! assert!(tree.search(&7).is_none());
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [5, 10, 15, 20, 25, 30]);
//! ```
//!

mod error;
mod index;
mod iter;
mod node;
mod tree;
mod validate;
mod view;


pub use error::{TreeError, Violation};
pub use index::{DefaultIx, IndexType};
pub use iter::{IntoIter, Iter};
pub use node::Color;
pub use tree::RbTree;
pub use view::NodeView;
