use std::borrow::Borrow;
use std::cmp::Ordering;

use log::{debug, trace};

use crate::error::TreeError;
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::iter::Iter;
use crate::node::{Color, Node, Side};
use crate::view::NodeView;

/// An ordered set of keys, stored in a red-black tree.
#[derive(Debug, Clone)]
pub struct RbTree<K, Ix = DefaultIx> {
    /// Vector that stores nodes, slot 0 is the sentinel
    pub(crate) nodes: Vec<Node<K, Ix>>,
    /// Root of the tree, the sentinel when empty
    pub(crate) root: NodeIndex<Ix>,
    /// Number of keys in the tree
    pub(crate) len: usize,
}

/// Shape of the violation the insert fix-up is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FixupCase {
    /// Parent and uncle are both red.
    UncleRed,
    /// Uncle is black and the node sits on the side of its parent facing the uncle.
    InnerGrandchild,
    /// Uncle is black and the node continues its parent's direction.
    OuterGrandchild,
}

impl<K, Ix> RbTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Creates a new `RbTree` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = vec![Node::new_sentinel()];
        nodes.reserve(capacity);
        RbTree {
            nodes,
            root: NodeIndex::sentinel(),
            len: 0,
        }
    }

    /// Insert a key into the tree.
    /// Returns `false` and leaves the tree untouched if the key is already present.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_tree::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// assert!(tree.insert(3));
    /// assert!(!tree.insert(3));
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K) -> bool {
        match self.try_insert(key) {
            Ok(inserted) => inserted,
            Err(err) => panic!("Reached maximum number of nodes: {err}"),
        }
    }

    /// Insert a key into the tree, reporting a full arena as an error instead of panicking.
    ///
    /// An already present key is `Ok(false)` even when the tree is full.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_tree::{RbTree, TreeError};
    ///
    /// let mut tree = RbTree::<u32, u8>::with_capacity(0);
    /// for key in 0..254 {
    ///     assert_eq!(tree.try_insert(key), Ok(true));
    /// }
    /// assert_eq!(tree.try_insert(0), Ok(false));
    /// assert_eq!(
    ///     tree.try_insert(999),
    ///     Err(TreeError::CapacityExhausted { capacity: 254 })
    /// );
    /// ```
    pub fn try_insert(&mut self, key: K) -> Result<bool, TreeError> {
        let Some((parent, side)) = self.find_slot(&key) else {
            return Ok(false);
        };
        if self.nodes.len() >= <Ix as IndexType>::max().index() {
            let capacity = NodeIndex::<Ix>::capacity();
            debug!("insert rejected, all {capacity} node slots are in use");
            return Err(TreeError::CapacityExhausted { capacity });
        }

        let z = NodeIndex::new(self.nodes.len());
        self.nodes.push(Node::new_leaf(key, parent));
        if parent.is_sentinel() {
            self.root = z;
        } else {
            self.node_mut(parent, Node::set_child(side, z));
        }
        self.len += 1;

        self.insert_fixup(z);

        #[cfg(feature = "strict")]
        {
            if let Err(violation) = self.validate() {
                panic!("red-black invariant broken by insert: {violation}");
            }
        }
        Ok(true)
    }

    /// Look up the node holding `key`.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_tree::{Color, RbTree};
    ///
    /// let tree: RbTree<i32> = [10, 5, 20].into_iter().collect();
    /// let node = tree.search(&10).unwrap();
    /// assert_eq!(node.key(), &10);
    /// assert_eq!(node.color(), Color::Black);
    /// assert_eq!(node.left().map(|n| *n.key()), Some(5));
    /// assert!(tree.search(&7).is_none());
    /// ```
    #[inline]
    pub fn search<Q>(&self, key: &Q) -> Option<NodeView<'_, K, Ix>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search_exact(key).map(|idx| NodeView::new(self, idx))
    }

    /// Return a reference to the stored key equal to `key`.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search_exact(key).map(|idx| self.node_ref(idx, Node::key))
    }

    /// Return `true` if the tree holds `key`.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search_exact(key).is_some()
    }

    /// The smallest key.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_tree::RbTree;
    ///
    /// let tree: RbTree<i32> = [4, 1, 9].into_iter().collect();
    /// assert_eq!(tree.first(), Some(&1));
    /// assert_eq!(tree.last(), Some(&9));
    /// ```
    #[inline]
    pub fn first(&self) -> Option<&K> {
        (!self.root.is_sentinel())
            .then(|| self.node_ref(self.tree_extreme(self.root, Side::Left), Node::key))
    }

    /// The largest key.
    #[inline]
    pub fn last(&self) -> Option<&K> {
        (!self.root.is_sentinel())
            .then(|| self.node_ref(self.tree_extreme(self.root, Side::Right), Node::key))
    }

    /// Get an iterator over the keys of the tree, in ascending order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, Ix> {
        Iter::new(self)
    }
}

impl<K, Ix> RbTree<K, Ix>
where
    Ix: IndexType,
{
    /// The root node, `None` for an empty tree.
    #[inline]
    pub fn root(&self) -> Option<NodeView<'_, K, Ix>> {
        (!self.root.is_sentinel()).then(|| NodeView::new(self, self.root))
    }

    /// Number of nodes on the longest path from the root down to a leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self.root, 0)];
        while let Some((x, depth)) = stack.pop() {
            if x.is_sentinel() {
                height = height.max(depth);
                continue;
            }
            stack.push((self.node_ref(x, Node::left), depth + 1));
            stack.push((self.node_ref(x, Node::right), depth + 1));
        }
        height
    }

    /// Number of black nodes on any path from the root down to an absent child,
    /// counting the root.
    pub fn black_height(&self) -> usize {
        let mut count = 0;
        let mut x = self.root;
        while !x.is_sentinel() {
            if self.node_ref(x, Node::is_black) {
                count += 1;
            }
            x = self.node_ref(x, Node::left);
        }
        count
    }

    /// Remove all keys from the tree
    #[inline]
    pub fn clear(&mut self) {
        debug!("clearing tree of {} keys", self.len);
        self.nodes.clear();
        self.nodes.push(Node::new_sentinel());
        self.root = NodeIndex::sentinel();
        self.len = 0;
    }

    /// Return the number of keys in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the tree contains no keys.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K> RbTree<K>
where
    K: Ord,
{
    /// Create an empty `RbTree`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }
}

impl<K> Default for RbTree<K>
where
    K: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, Ix> RbTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Find where `key` would be attached: the last visited node and the side below it.
    /// Returns `None` when the key is already present.
    fn find_slot(&self, key: &K) -> Option<(NodeIndex<Ix>, Side)> {
        let mut parent = NodeIndex::sentinel();
        let mut side = Side::Left;
        let mut x = self.root;
        while !x.is_sentinel() {
            parent = x;
            side = match key.cmp(self.node_ref(x, Node::key)) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return None,
            };
            x = self.node_ref(x, |xn| xn.child(side));
        }
        Some((parent, side))
    }

    /// Search for the node with exactly the given key
    fn search_exact<Q>(&self, key: &Q) -> Option<NodeIndex<Ix>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut x = self.root;
        while !x.is_sentinel() {
            let xk: &Q = self.node_ref(x, Node::key).borrow();
            match key.cmp(xk) {
                Ordering::Less => x = self.node_ref(x, Node::left),
                Ordering::Greater => x = self.node_ref(x, Node::right),
                Ordering::Equal => return Some(x),
            }
        }
        None
    }
}

impl<K, Ix> RbTree<K, Ix>
where
    Ix: IndexType,
{
    /// Restore red-black tree properties after an insert.
    fn insert_fixup(&mut self, mut k: NodeIndex<Ix>) {
        while self.parent_ref(k, Node::is_red) {
            let parent = self.node_ref(k, Node::parent);
            let grand_parent = self.node_ref(parent, Node::parent);
            // the root is black, so a red parent always has a parent of its own
            debug_assert!(!grand_parent.is_sentinel());
            let parent_side = self.side_of(parent);
            let uncle = self.node_ref(grand_parent, |gn| gn.child(parent_side.opposite()));

            match self.classify(k, parent_side, uncle) {
                FixupCase::UncleRed => {
                    trace!("fixup at {k:?}: uncle {uncle:?} is red, pushing red up to {grand_parent:?}");
                    self.node_mut(parent, Node::set_color(Color::Black));
                    self.node_mut(uncle, Node::set_color(Color::Black));
                    self.node_mut(grand_parent, Node::set_color(Color::Red));
                    k = grand_parent;
                }
                FixupCase::InnerGrandchild => {
                    trace!("fixup at {k:?}: inner grandchild, straightening at {parent:?}");
                    match parent_side {
                        Side::Left => self.left_rotate(parent),
                        Side::Right => self.right_rotate(parent),
                    }
                    k = parent;
                }
                FixupCase::OuterGrandchild => {
                    trace!("fixup at {k:?}: outer grandchild, promoting {parent:?}");
                    self.node_mut(parent, Node::set_color(Color::Black));
                    self.node_mut(grand_parent, Node::set_color(Color::Red));
                    match parent_side {
                        Side::Left => self.right_rotate(grand_parent),
                        Side::Right => self.left_rotate(grand_parent),
                    }
                }
            }
        }
        self.node_mut(self.root, Node::set_color(Color::Black));
    }

    fn classify(&self, k: NodeIndex<Ix>, parent_side: Side, uncle: NodeIndex<Ix>) -> FixupCase {
        if self.node_ref(uncle, Node::is_red) {
            FixupCase::UncleRed
        } else if self.side_of(k) == parent_side {
            FixupCase::OuterGrandchild
        } else {
            FixupCase::InnerGrandchild
        }
    }

    /// Binary tree left rotate, `x` must have a right child.
    pub(crate) fn left_rotate(&mut self, x: NodeIndex<Ix>) {
        self.rotate(x, Side::Left);
    }

    /// Binary tree right rotate, `x` must have a left child.
    pub(crate) fn right_rotate(&mut self, x: NodeIndex<Ix>) {
        self.rotate(x, Side::Right);
    }

    /// Moves `x` down to `side`, promoting its child on the other side into its place.
    fn rotate(&mut self, x: NodeIndex<Ix>, side: Side) {
        let up = side.opposite();
        let y = self.node_ref(x, |xn| xn.child(up));
        assert!(!y.is_sentinel(), "{side:?} rotation without a {up:?} child");
        trace!("rotate {side:?} at {x:?}, promoting {y:?}");

        let inner = self.node_ref(y, |yn| yn.child(side));
        self.node_mut(x, Node::set_child(up, inner));
        if !inner.is_sentinel() {
            self.node_mut(inner, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_child(side, x));
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        let xp = self.node_ref(x, Node::parent);
        self.node_mut(y, Node::set_parent(xp));
        if xp.is_sentinel() {
            self.root = y;
        } else {
            let side = self.side_of(x);
            self.node_mut(xp, Node::set_child(side, y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// Walk from `x` to the last node on `side`.
    fn tree_extreme(&self, mut x: NodeIndex<Ix>, side: Side) -> NodeIndex<Ix> {
        loop {
            let next = self.node_ref(x, |xn| xn.child(side));
            if next.is_sentinel() {
                return x;
            }
            x = next;
        }
    }

    /// Which child of its parent `node` is.
    fn side_of(&self, node: NodeIndex<Ix>) -> Side {
        if self.parent_ref(node, Node::left) == node {
            Side::Left
        } else {
            Side::Right
        }
    }
}

// Convenient methods for reference or mutate current/parent node
impl<'a, K, Ix> RbTree<K, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Builds `2(1, 4(3, 5))` by hand, all red, so rotations can be checked in isolation.
    fn hand_built() -> (RbTree<i32>, [NodeIndex; 5]) {
        let mut tree = RbTree::new();
        let idx: [NodeIndex; 5] = std::array::from_fn(|i| NodeIndex::new(i + 1));
        for key in 1..=5 {
            tree.nodes.push(Node::new_leaf(key, NodeIndex::sentinel()));
        }
        let [n1, n2, n3, n4, n5] = idx;
        tree.root = n2;
        tree.node_mut(n2, Node::set_child(Side::Left, n1));
        tree.node_mut(n2, Node::set_child(Side::Right, n4));
        tree.node_mut(n1, Node::set_parent(n2));
        tree.node_mut(n4, Node::set_parent(n2));
        tree.node_mut(n4, Node::set_child(Side::Left, n3));
        tree.node_mut(n4, Node::set_child(Side::Right, n5));
        tree.node_mut(n3, Node::set_parent(n4));
        tree.node_mut(n5, Node::set_parent(n4));
        tree.len = 5;
        (tree, idx)
    }

    fn keys(tree: &RbTree<i32>) -> Vec<i32> {
        tree.iter().copied().collect()
    }

    #[test]
    fn left_rotate_at_root_promotes_right_child() {
        let (mut tree, [n1, n2, n3, n4, n5]) = hand_built();
        tree.left_rotate(n2);

        assert_eq!(tree.root, n4);
        assert!(tree.node_ref(n4, Node::parent).is_sentinel());
        assert_eq!(tree.node_ref(n4, Node::left), n2);
        assert_eq!(tree.node_ref(n4, Node::right), n5);
        assert_eq!(tree.node_ref(n2, Node::parent), n4);
        assert_eq!(tree.node_ref(n2, Node::left), n1);
        assert_eq!(tree.node_ref(n2, Node::right), n3);
        assert_eq!(tree.node_ref(n3, Node::parent), n2);
        assert_eq!(keys(&tree), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn right_rotate_undoes_left_rotate() {
        let (mut tree, [n1, n2, n3, n4, n5]) = hand_built();
        tree.left_rotate(n2);
        tree.right_rotate(n4);

        assert_eq!(tree.root, n2);
        assert_eq!(tree.node_ref(n2, Node::left), n1);
        assert_eq!(tree.node_ref(n2, Node::right), n4);
        assert_eq!(tree.node_ref(n4, Node::left), n3);
        assert_eq!(tree.node_ref(n4, Node::right), n5);
        assert_eq!(tree.node_ref(n3, Node::parent), n4);
        assert_eq!(tree.node_ref(n4, Node::parent), n2);
        assert_eq!(keys(&tree), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn rotation_below_root_relinks_grandparent() {
        let (mut tree, [_, n2, n3, n4, n5]) = hand_built();
        tree.right_rotate(n4);

        assert_eq!(tree.root, n2);
        assert_eq!(tree.node_ref(n2, Node::right), n3);
        assert_eq!(tree.node_ref(n3, Node::parent), n2);
        assert_eq!(tree.node_ref(n3, Node::right), n4);
        assert_eq!(tree.node_ref(n4, Node::parent), n3);
        assert!(tree.node_ref(n4, Node::left).is_sentinel());
        assert_eq!(tree.node_ref(n4, Node::right), n5);
        assert_eq!(keys(&tree), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    #[should_panic(expected = "Left rotation without a Right child")]
    fn left_rotate_without_right_child_panics() {
        let (mut tree, [n1, ..]) = hand_built();
        tree.left_rotate(n1);
    }

    #[test]
    #[should_panic(expected = "Right rotation without a Left child")]
    fn right_rotate_without_left_child_panics() {
        let (mut tree, [.., n5]) = hand_built();
        tree.right_rotate(n5);
    }

    #[test]
    fn rotation_leaves_colors_and_sentinel_alone() {
        let (mut tree, [n1, n2, _, n4, _]) = hand_built();
        tree.node_mut(n4, Node::set_color(Color::Black));
        tree.node_mut(n1, Node::set_color(Color::Black));
        tree.left_rotate(n2);

        assert!(tree.node_ref(n2, Node::is_red));
        assert!(tree.node_ref(n4, Node::is_black));
        let sentinel = &tree.nodes[0];
        assert!(sentinel.is_black());
        assert!(sentinel.parent.is_sentinel());
        assert!(sentinel.left.is_sentinel());
        assert!(sentinel.right.is_sentinel());
    }

    #[test]
    fn classify_distinguishes_inner_and_outer() {
        let mut tree = RbTree::new();
        for key in [10, 5] {
            tree.insert(key);
        }
        // attach 7 under 5 by hand, bypassing the fix-up
        let seven = NodeIndex::new(tree.nodes.len());
        let five = NodeIndex::new(2);
        tree.nodes.push(Node::new_leaf(7, five));
        tree.node_mut(five, Node::set_child(Side::Right, seven));
        let uncle = NodeIndex::sentinel();

        assert_eq!(
            tree.classify(seven, Side::Left, uncle),
            FixupCase::InnerGrandchild
        );
        tree.node_mut(five, Node::set_child(Side::Right, NodeIndex::sentinel()));
        tree.node_mut(five, Node::set_child(Side::Left, seven));
        assert_eq!(
            tree.classify(seven, Side::Left, uncle),
            FixupCase::OuterGrandchild
        );
    }
}
