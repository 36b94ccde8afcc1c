use std::iter::FusedIterator;

use crate::index::{IndexType, NodeIndex};
use crate::node::Node;
use crate::tree::RbTree;

/// Pushes a link of nodes on the left to stack.
fn left_link<K, Ix>(tree_ref: &RbTree<K, Ix>, mut x: NodeIndex<Ix>, stack: &mut Vec<NodeIndex<Ix>>)
where
    Ix: IndexType,
{
    while !x.is_sentinel() {
        stack.push(x);
        x = tree_ref.node_ref(x, Node::left);
    }
}

/// An iterator over the keys of a `RbTree`, in ascending order.
///
/// Cloning the iterator snapshots its position, so a traversal can be resumed
/// or restarted from any point.
#[derive(Debug)]
pub struct Iter<'a, K, Ix> {
    /// Reference to the tree
    tree_ref: &'a RbTree<K, Ix>,
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
    /// Keys not yet yielded
    remaining: usize,
}

impl<'a, K, Ix> Iter<'a, K, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(tree_ref: &'a RbTree<K, Ix>) -> Self {
        let mut stack = Vec::new();
        left_link(tree_ref, tree_ref.root, &mut stack);
        Iter {
            tree_ref,
            stack,
            remaining: tree_ref.len(),
        }
    }
}

impl<K, Ix: Copy> Clone for Iter<'_, K, Ix> {
    fn clone(&self) -> Self {
        Iter {
            tree_ref: self.tree_ref,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, Ix> Iterator for Iter<'a, K, Ix>
where
    Ix: IndexType,
{
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        left_link(
            self.tree_ref,
            self.tree_ref.node_ref(x, Node::right),
            &mut self.stack,
        );
        self.remaining -= 1;
        Some(self.tree_ref.node_ref(x, Node::key))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, Ix: IndexType> ExactSizeIterator for Iter<'_, K, Ix> {}

impl<K, Ix: IndexType> FusedIterator for Iter<'_, K, Ix> {}

/// An owning iterator over the keys of a `RbTree`, in ascending order.
#[derive(Debug)]
pub struct IntoIter<K, Ix> {
    tree: RbTree<K, Ix>,
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
}

impl<K, Ix> IntoIter<K, Ix>
where
    Ix: IndexType,
{
    fn new(tree: RbTree<K, Ix>) -> Self {
        let mut stack = Vec::new();
        left_link(&tree, tree.root, &mut stack);
        IntoIter { tree, stack }
    }
}

impl<K, Ix> Iterator for IntoIter<K, Ix>
where
    Ix: IndexType,
{
    type Item = K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.stack.pop()?;
        left_link(
            &self.tree,
            self.tree.node_ref(x, Node::right),
            &mut self.stack,
        );
        self.tree.len -= 1;
        self.tree.node_mut(x, Node::take_key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len, Some(self.tree.len))
    }
}

impl<K, Ix: IndexType> ExactSizeIterator for IntoIter<K, Ix> {}

impl<'a, K, Ix> IntoIterator for &'a RbTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    type Item = &'a K;
    type IntoIter = Iter<'a, K, Ix>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, Ix> IntoIterator for RbTree<K, Ix>
where
    Ix: IndexType,
{
    type Item = K;
    type IntoIter = IntoIter<K, Ix>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<K, Ix> Extend<K> for RbTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            let _ignore = self.insert(key);
        }
    }
}

impl<K, Ix> FromIterator<K> for RbTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = RbTree::with_capacity(0);
        tree.extend(iter);
        tree
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn iter_on_empty_tree_yields_nothing() {
        let tree = RbTree::<i32>::new();
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.iter().len(), 0);
    }

    #[test]
    fn cloned_iter_restarts_from_snapshot() {
        let tree: RbTree<i32> = (0..10).rev().collect();
        let mut iter = tree.iter();
        assert_eq!(iter.by_ref().take(3).copied().collect::<Vec<_>>(), vec![0, 1, 2]);
        let snapshot = iter.clone();
        assert_eq!(iter.copied().collect::<Vec<_>>(), (3..10).collect::<Vec<_>>());
        assert_eq!(snapshot.len(), 7);
        assert_eq!(snapshot.copied().next(), Some(3));
    }

    #[test]
    fn into_iter_yields_owned_keys_in_order() {
        let tree: RbTree<String> = ["pear", "apple", "fig"]
            .into_iter()
            .map(String::from)
            .collect();
        let mut into_iter = tree.into_iter();
        assert_eq!(into_iter.len(), 3);
        assert_eq!(into_iter.next().as_deref(), Some("apple"));
        assert_eq!(into_iter.collect::<Vec<_>>(), vec!["fig", "pear"]);
    }

    #[test]
    fn borrowed_tree_works_in_for_loops() {
        let tree: RbTree<u8> = [3, 1, 2].into_iter().collect();
        let mut seen = Vec::new();
        for key in &tree {
            seen.push(*key);
        }
        assert_eq!(seen, vec![1, 2, 3]);
    }
}
