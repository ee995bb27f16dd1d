//! The binary search tree algorithm, separated from both node allocation and the public tree
//! type.
//!
//! [`NodeOperations`] is implemented twice: [`Recursive`] follows the structure of the tree with
//! the call stack, while [`Iterative`] walks links in loops and keeps any pending work on an
//! explicit [`Vector`](crate::collections::contiguous::Vector) stack, so its stack usage doesn't
//! grow with the depth of the tree. Both produce identical trees for identical input.

mod iterative;
mod recursive;

pub use iterative::*;
pub use recursive::*;

use super::{Link, Node, NodeAllocator, RefusedNodes};
use crate::util::error::OutOfMemory;
use crate::util::option::OptionExtension;

/// An implementation of the binary search tree algorithm over [`Link`]s. Implementors are zero
/// sized markers, every operation is an associated function.
///
/// Values which compare less than a node's value live in its left subtree, everything else
/// (including equal values) lives in its right subtree. Nothing is ever rebalanced.
pub trait NodeOperations {
    /// Returns true if both trees have the same shape and hold equal values at corresponding
    /// positions. Two empty trees are the same.
    fn same_trees<T: PartialEq>(a: &Link<T>, b: &Link<T>) -> bool;

    /// Returns the link holding the first node equal to `value` on the search path from `root`, or
    /// the empty link where `value` would be attached.
    fn locate<'a, T: Ord>(value: &T, root: &'a Link<T>) -> &'a Link<T>;

    /// The mutable counterpart of [`locate`](NodeOperations::locate), returning the slot to
    /// rebind.
    fn locate_slot<'a, T: Ord>(value: &T, root: &'a mut Link<T>) -> &'a mut Link<T>;

    /// Returns the slot of the largest node in the subtree at `root`, found by descending right
    /// until a node has no right child. Returns `root` itself if it's empty.
    fn largest_slot<T>(root: &mut Link<T>) -> &mut Link<T>;

    /// Releases every node of the tree at `root` through `allocator`, children before their
    /// parents.
    ///
    /// # Errors
    /// Returns [`RefusedNodes`] holding every node `allocator` wouldn't take back. Every node is
    /// still offered to the allocator.
    fn release_tree<T, A: NodeAllocator<T>>(
        root: Link<T>,
        allocator: &mut A,
    ) -> Result<(), RefusedNodes<T>>;

    /// Builds a deep copy of the tree at `root` with nodes bought from `allocator`.
    ///
    /// # Errors
    /// Returns [`OutOfMemory`] if `allocator` fails to provide a node. Every node bought for the
    /// copy up to that point is released before returning.
    fn clone_tree<T: Clone, A: NodeAllocator<T>>(
        root: &Link<T>,
        allocator: &mut A,
    ) -> Result<Link<T>, OutOfMemory>;

    /// Attaches `node` to the tree at `root`, without copying it. If equal values are already in
    /// the tree, `node` goes into the right subtree of the first of them, so the tree holds
    /// duplicates.
    fn insert<T: Ord>(root: &mut Link<T>, node: Box<Node<T>>) {
        let mut slot = Self::locate_slot(&node.value, root);
        while let Some(existing) = slot {
            slot = Self::locate_slot(&node.value, &mut existing.right);
        }
        *slot = Some(node);
    }

    /// Unlinks the first node equal to `value` from the tree at `root` and returns it with both of
    /// its links detached. Returns `None`, leaving the tree untouched, if there is no such node.
    ///
    /// A node with a left subtree is replaced by its in-order predecessor (the largest node of
    /// that subtree), which takes over both of its children.
    fn extract<T: Ord>(root: &mut Link<T>, value: &T) -> Link<T> {
        let slot = Self::locate_slot(value, root);
        let mut removed = slot.take()?;

        match removed.left.take() {
            None => *slot = removed.right.take(),
            Some(left) => {
                let mut left = Some(left);
                let largest = Self::largest_slot(&mut left);

                // UNREACHABLE: The subtree isn't empty, so its largest slot holds a node.
                let mut promoted = unsafe { largest.take().unreachable() };
                // The largest node has no right child, only a left one to put in its place.
                *largest = promoted.left.take();

                promoted.left = left;
                promoted.right = removed.right.take();
                *slot = Some(promoted);
            },
        }

        Some(removed)
    }
}
