use std::fmt;

use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::node::{Color, Node};
use crate::tree::RbTree;

/// A read-only view of a node in an [`RbTree`], as returned by [`RbTree::search`].
///
/// The view borrows the tree, so the tree cannot be modified while it is alive.
pub struct NodeView<'a, K, Ix = DefaultIx> {
    /// Reference to the tree
    tree_ref: &'a RbTree<K, Ix>,
    /// The viewed node
    node_idx: NodeIndex<Ix>,
}

impl<'a, K, Ix> NodeView<'a, K, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(tree_ref: &'a RbTree<K, Ix>, node_idx: NodeIndex<Ix>) -> Self {
        NodeView { tree_ref, node_idx }
    }

    /// Key stored in the node.
    #[inline]
    pub fn key(&self) -> &'a K {
        self.tree_ref.node_ref(self.node_idx, Node::key)
    }

    /// Color of the node.
    #[inline]
    pub fn color(&self) -> Color {
        self.tree_ref.node_ref(self.node_idx, Node::color)
    }

    /// Whether the node is red.
    #[inline]
    pub fn is_red(&self) -> bool {
        self.tree_ref.node_ref(self.node_idx, Node::is_red)
    }

    /// Whether the node is black.
    #[inline]
    pub fn is_black(&self) -> bool {
        self.tree_ref.node_ref(self.node_idx, Node::is_black)
    }

    /// Left child, `None` when absent.
    #[inline]
    pub fn left(&self) -> Option<Self> {
        self.follow(self.tree_ref.node_ref(self.node_idx, Node::left))
    }

    /// Right child, `None` when absent.
    #[inline]
    pub fn right(&self) -> Option<Self> {
        self.follow(self.tree_ref.node_ref(self.node_idx, Node::right))
    }

    /// Parent, `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<Self> {
        self.follow(self.tree_ref.node_ref(self.node_idx, Node::parent))
    }

    /// Whether this node has neither child.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.tree_ref
            .node_ref(self.node_idx, |n| n.left.is_sentinel() && n.right.is_sentinel())
    }

    fn follow(&self, idx: NodeIndex<Ix>) -> Option<Self> {
        (!idx.is_sentinel()).then(|| NodeView::new(self.tree_ref, idx))
    }
}

impl<K, Ix: Copy> Clone for NodeView<'_, K, Ix> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, Ix: Copy> Copy for NodeView<'_, K, Ix> {}

impl<K, Ix: PartialEq> PartialEq for NodeView<'_, K, Ix> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree_ref, other.tree_ref) && self.node_idx == other.node_idx
    }
}

impl<K, Ix: Eq> Eq for NodeView<'_, K, Ix> {}

impl<K, Ix> fmt::Debug for NodeView<'_, K, Ix>
where
    K: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeView")
            .field("key", self.key())
            .field("color", &self.color())
            .finish()
    }
}
