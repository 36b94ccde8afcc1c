use crate::index::{IndexType, NodeIndex};

/// Node of the red-black tree
#[derive(Debug, Clone)]
pub struct Node<K, Ix> {
    /// Left child, the sentinel when absent
    pub left: NodeIndex<Ix>,
    /// Right child, the sentinel when absent
    pub right: NodeIndex<Ix>,
    /// Parent, the sentinel for the root
    pub parent: NodeIndex<Ix>,
    /// Color of the node
    pub color: Color,

    /// Key of the node, `None` only for the sentinel
    pub key: Option<K>,
}

impl<K, Ix> Node<K, Ix>
where
    Ix: IndexType,
{
    /// The shared black leaf stored at slot 0.
    pub fn new_sentinel() -> Self {
        Node {
            left: NodeIndex::sentinel(),
            right: NodeIndex::sentinel(),
            parent: NodeIndex::sentinel(),
            color: Color::Black,
            key: None,
        }
    }

    /// A fresh red node with no children.
    pub fn new_leaf(key: K, parent: NodeIndex<Ix>) -> Self {
        Node {
            left: NodeIndex::sentinel(),
            right: NodeIndex::sentinel(),
            parent,
            color: Color::Red,
            key: Some(key),
        }
    }
}

// Convenient getter/setter methods
impl<K, Ix> Node<K, Ix>
where
    Ix: IndexType,
{
    pub fn color(&self) -> Color {
        self.color
    }

    /// # Panics
    ///
    /// Panics when called on the sentinel
    pub fn key(&self) -> &K {
        self.key.as_ref().unwrap()
    }

    pub fn left(&self) -> NodeIndex<Ix> {
        self.left
    }

    pub fn right(&self) -> NodeIndex<Ix> {
        self.right
    }

    pub fn parent(&self) -> NodeIndex<Ix> {
        self.parent
    }

    pub fn child(&self, side: Side) -> NodeIndex<Ix> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn is_black(&self) -> bool {
        matches!(self.color, Color::Black)
    }

    pub fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }

    pub fn take_key(&mut self) -> Option<K> {
        self.key.take()
    }

    pub fn set_color(color: Color) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| {
            node.color = color;
        }
    }

    pub fn set_child(side: Side, child: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }

    pub fn set_parent(parent: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| {
            node.parent = parent;
        }
    }
}

/// The color of the node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Red node
    Red,
    /// Black node
    Black,
}

/// Which child slot of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
