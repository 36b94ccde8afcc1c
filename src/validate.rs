use crate::error::Violation;
use crate::index::{IndexType, NodeIndex};
use crate::node::Node;
use crate::tree::RbTree;

impl<K, Ix> RbTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Check every red-black and search-tree invariant over the whole tree.
    ///
    /// 1. Every node is either red or black.
    /// 2. The root is black.
    /// 3. Every leaf (the sentinel) is black.
    /// 4. If a node is red, then both its children are black.
    /// 5. For each node, all simple paths from the node to descendant leaves contain the
    ///    same number of black nodes.
    ///
    /// On top of these, keys must be strictly increasing in order, every child must
    /// point back at its parent and the stored length must match the reachable keys.
    ///
    /// Returns the black height of the tree, see [`RbTree::black_height`].
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_tree::RbTree;
    ///
    /// let tree: RbTree<i32> = (1..=7).collect();
    /// assert_eq!(tree.validate(), Ok(tree.black_height()));
    /// ```
    pub fn validate(&self) -> Result<usize, Violation> {
        if self.node_ref(self.root, Node::is_red) {
            return Err(Violation::RedRoot(self.root.index()));
        }
        let mut walk = Walk {
            prev: None,
            found: 0,
        };
        let black_height = self.validate_subtree(self.root, &mut walk)?;
        if walk.found != self.len {
            return Err(Violation::LengthMismatch {
                expected: self.len,
                found: walk.found,
            });
        }
        Ok(black_height)
    }

    fn validate_subtree<'a>(
        &'a self,
        x: NodeIndex<Ix>,
        walk: &mut Walk<'a, K>,
    ) -> Result<usize, Violation> {
        if x.is_sentinel() {
            return Ok(0);
        }
        let node = &self.nodes[x.index()];
        for child in [node.left, node.right] {
            if child.is_sentinel() {
                continue;
            }
            let child_node = &self.nodes[child.index()];
            if child_node.parent != x {
                return Err(Violation::BrokenParentLink {
                    parent: x.index(),
                    child: child.index(),
                });
            }
            if node.is_red() && child_node.is_red() {
                return Err(Violation::RedChildOfRed {
                    parent: x.index(),
                    child: child.index(),
                });
            }
        }

        let left = self.validate_subtree(node.left, walk)?;

        let key = node.key();
        if walk.prev.is_some_and(|prev| prev >= key) {
            return Err(Violation::OutOfOrder(x.index()));
        }
        walk.prev = Some(key);
        walk.found += 1;
        if walk.found > self.len {
            return Err(Violation::LengthMismatch {
                expected: self.len,
                found: walk.found,
            });
        }

        let right = self.validate_subtree(node.right, walk)?;
        if left != right {
            return Err(Violation::BlackHeightMismatch {
                node: x.index(),
                left,
                right,
            });
        }
        Ok(left + usize::from(node.is_black()))
    }
}

/// State carried along the in-order walk.
struct Walk<'a, K> {
    /// Last key visited
    prev: Option<&'a K>,
    /// Keys visited so far
    found: usize,
}
