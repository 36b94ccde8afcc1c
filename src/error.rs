use thiserror::Error;

/// Errors returned by fallible tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TreeError {
    /// The node index type has no free slot left.
    #[error("tree is full: the index type addresses at most {capacity} keys")]
    CapacityExhausted {
        /// Number of keys the tree can hold
        capacity: usize,
    },
}

/// A broken red-black or search-tree invariant found by [`RbTree::validate`].
///
/// Nodes are identified by their arena slot.
///
/// [`RbTree::validate`]: crate::RbTree::validate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// The root is red.
    #[error("root node {0} is red")]
    RedRoot(usize),
    /// Two consecutive red nodes.
    #[error("red node {parent} has red child {child}")]
    RedChildOfRed { parent: usize, child: usize },
    /// Black counts differ between the two subtrees of a node.
    #[error("black height differs below node {node}: left {left}, right {right}")]
    BlackHeightMismatch {
        node: usize,
        left: usize,
        right: usize,
    },
    /// The in-order key sequence is not strictly increasing.
    #[error("key of node {0} is not greater than its in-order predecessor")]
    OutOfOrder(usize),
    /// A child does not point back at the node that owns it.
    #[error("node {child} does not point back to its parent {parent}")]
    BrokenParentLink { parent: usize, child: usize },
    /// The stored length disagrees with the number of reachable keys.
    #[error("tree reports {expected} keys but {found} are reachable")]
    LengthMismatch { expected: usize, found: usize },
}
