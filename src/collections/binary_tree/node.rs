use std::fmt::{self, Debug, Formatter};

use crate::util::fmt::indent_lines;

/// An owning link to a subtree, empty when there is no subtree. The root of a tree and the
/// `left`/`right` children of every node are links.
///
/// A mutable reference to a link (`&mut Link<T>`) is a slot: the exact place in the structure where
/// a value is, or would be, attached. Searching, insertion and extraction are all expressed by
/// locating a slot and then rebinding it.
pub type Link<T> = Option<Box<Node<T>>>;

/// A single node of a binary search tree. Every value in `left` compares less than `value`, and
/// every value in `right` compares greater than or equal to it.
///
/// Nodes have no parent link. They are obtained from and returned to a
/// [`NodeAllocator`](super::NodeAllocator).
pub struct Node<T> {
    pub value: T,
    pub left: Link<T>,
    pub right: Link<T>,
}

impl<T> Node<T> {
    /// Creates a leaf holding `value`.
    pub const fn new(value: T) -> Node<T> {
        Node {
            value,
            left: None,
            right: None,
        }
    }

    /// Returns true if the node has neither child.
    pub const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub const fn has_left(&self) -> bool {
        self.left.is_some()
    }

    pub const fn has_right(&self) -> bool {
        self.right.is_some()
    }

    /// Takes both children out of the node, leaving it a leaf.
    pub fn detach_successors(&mut self) -> (Link<T>, Link<T>) {
        (self.left.take(), self.right.take())
    }
}

impl<T: Ord> Node<T> {
    /// Returns the child link that a search for `value` continues down: `left` if `value` is less
    /// than this node's value, otherwise `right` (equal values descend right).
    pub fn successor_for(&self, value: &T) -> &Link<T> {
        if *value < self.value {
            &self.left
        } else {
            &self.right
        }
    }

    /// The mutable counterpart of [`successor_for`](Node::successor_for).
    pub fn successor_for_mut(&mut self, value: &T) -> &mut Link<T> {
        if *value < self.value {
            &mut self.left
        } else {
            &mut self.right
        }
    }
}

impl<T: Debug> Debug for Node<T> {
    /// Draws the subtree sideways, with the left subtree above the value and the right subtree
    /// below it.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let left = format!("{:?}", DebugLink(&self.left));
        let right = format!("{:?}", DebugLink(&self.right));

        write!(
            f,
            "{}\n({:?})\n{}",
            indent_lines(&left, "┌── ", "│   "),
            self.value,
            indent_lines(&right, "└── ", "    ")
        )
    }
}

pub(crate) struct DebugLink<'a, T>(pub &'a Link<T>);

impl<T: Debug> Debug for DebugLink<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(node) => node.fmt(f),
            None => write!(f, "-"),
        }
    }
}
