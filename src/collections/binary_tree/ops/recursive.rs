use super::NodeOperations;
use crate::collections::binary_tree::{Link, Node, NodeAllocator, RefusedNodes};
use crate::util::error::OutOfMemory;
use crate::util::option::OptionExtension;
use crate::util::result::ResultExtension;

/// Tree operations which follow the shape of the tree with the call stack. Stack usage grows with
/// the depth of the tree, so very deep (degenerate) trees are better served by
/// [`Iterative`](super::Iterative).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Recursive;

impl NodeOperations for Recursive {
    fn same_trees<T: PartialEq>(a: &Link<T>, b: &Link<T>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                a.value == b.value
                    && Self::same_trees(&a.left, &b.left)
                    && Self::same_trees(&a.right, &b.right)
            },
            _ => false,
        }
    }

    fn locate<'a, T: Ord>(value: &T, root: &'a Link<T>) -> &'a Link<T> {
        match root {
            Some(node) if node.value != *value => Self::locate(value, node.successor_for(value)),
            _ => root,
        }
    }

    fn locate_slot<'a, T: Ord>(value: &T, root: &'a mut Link<T>) -> &'a mut Link<T> {
        if root.as_deref().is_some_and(|node| node.value != *value) {
            // UNREACHABLE: The condition has just checked that root holds a node.
            let node = unsafe { root.as_mut().unreachable() };
            return Self::locate_slot(value, node.successor_for_mut(value));
        }

        root
    }

    fn largest_slot<T>(root: &mut Link<T>) -> &mut Link<T> {
        if root.as_deref().is_some_and(Node::has_right) {
            // UNREACHABLE: The condition has just checked that root holds a node.
            let node = unsafe { root.as_mut().unreachable() };
            return Self::largest_slot(&mut node.right);
        }

        root
    }

    fn release_tree<T, A: NodeAllocator<T>>(
        root: Link<T>,
        allocator: &mut A,
    ) -> Result<(), RefusedNodes<T>> {
        let Some(mut node) = root else {
            return Ok(());
        };

        let (left, right) = node.detach_successors();
        let left = Self::release_tree(left, allocator);
        let right = Self::release_tree(right, allocator);
        let this = allocator.release(Some(node)).map_err(RefusedNodes::from);

        RefusedNodes::join(RefusedNodes::join(left, right), this)
    }

    fn clone_tree<T: Clone, A: NodeAllocator<T>>(
        root: &Link<T>,
        allocator: &mut A,
    ) -> Result<Link<T>, OutOfMemory> {
        let Some(source) = root else {
            return Ok(None);
        };

        // The parent is bought first and holds each finished subtree, so a failure further down
        // only has to release the parent's tree.
        let mut node = allocator.buy(source.value.clone())?;
        let right = Self::clone_tree(&source.left, allocator).and_then(|left| {
            node.left = left;
            Self::clone_tree(&source.right, allocator)
        });

        match right {
            Ok(right) => {
                node.right = right;
                Ok(Some(node))
            },
            Err(error) => {
                // The allocator produced every one of these nodes, releasing them can't fail.
                Self::release_tree(Some(node), allocator).throw();
                Err(error)
            },
        }
    }
}
