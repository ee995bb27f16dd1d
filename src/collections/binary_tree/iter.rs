use std::iter::FusedIterator;
use std::ptr;

use super::{BinarySearchTree, Link, Node, NodeAllocator, NodeOperations};
use crate::collections::contiguous::Vector;

impl<'a, T: Ord, A: NodeAllocator<T>, O: NodeOperations> IntoIterator
    for &'a BinarySearchTree<T, A, O>
{
    type Item = &'a T;

    type IntoIter = TreeIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order iterator over the values of a tree, producing them in ascending order.
///
/// The iterator keeps the path to the next node on an explicit stack rather than recursing, so
/// deep trees don't grow the call stack. It works on any tree of [`Node`]s, whichever
/// [`NodeOperations`] built it. Creating a new iterator always starts again from the smallest
/// value.
///
/// See [`BinarySearchTree::iter`].
pub struct TreeIter<'a, T> {
    pub(crate) stack: Vector<&'a Node<T>>,
}

impl<'a, T> TreeIter<'a, T> {
    /// Creates an iterator over the tree at `root`.
    pub fn new(root: &'a Link<T>) -> TreeIter<'a, T> {
        let mut iter = TreeIter {
            stack: Vector::new(),
        };
        iter.push_left_spine(root);
        iter
    }

    /// Returns the value that the next call to [`next`](Iterator::next) will produce, without
    /// advancing. Returns `None` once the iterator is exhausted.
    pub fn current(&self) -> Option<&'a T> {
        self.top().map(|node| &node.value)
    }

    /// Returns true if there are no values left.
    pub const fn is_exhausted(&self) -> bool {
        self.stack.is_empty()
    }

    fn top(&self) -> Option<&'a Node<T>> {
        self.stack.last().copied()
    }

    /// Pushes `link` and then every left child below it.
    fn push_left_spine(&mut self, mut link: &'a Link<T>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a, T> Iterator for TreeIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop().ok()?;
        self.push_left_spine(&node.right);
        Some(&node.value)
    }
}

impl<T> FusedIterator for TreeIter<'_, T> {}

impl<T> PartialEq for TreeIter<'_, T> {
    /// Two iterators are equal if both are exhausted, or if both are positioned on the same node
    /// of the same tree.
    fn eq(&self, other: &Self) -> bool {
        match (self.top(), other.top()) {
            (None, None) => true,
            (Some(a), Some(b)) => ptr::eq(a, b),
            _ => false,
        }
    }
}

impl<T> Eq for TreeIter<'_, T> {}

impl<T> Clone for TreeIter<'_, T> {
    fn clone(&self) -> Self {
        TreeIter {
            stack: self.stack.clone(),
        }
    }
}
