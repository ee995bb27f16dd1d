use super::NodeOperations;
use crate::collections::binary_tree::{Link, Node, NodeAllocator, RefusedNodes};
use crate::collections::contiguous::Vector;
use crate::util::error::OutOfMemory;
use crate::util::option::OptionExtension;
use crate::util::result::ResultExtension;

/// Tree operations which walk links in loops. Operations that visit more than one path keep their
/// pending work on a [`Vector`], so the call stack stays flat however deep the tree gets.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Iterative;

/// A step of a post-order walk: `Enter` visits a link for the first time, `Exit` returns to a node
/// after both of its subtrees have been handled.
enum Frame<'a, T> {
    Enter(&'a Link<T>),
    Exit(&'a Node<T>),
}

impl NodeOperations for Iterative {
    fn same_trees<T: PartialEq>(a: &Link<T>, b: &Link<T>) -> bool {
        let mut pending = Vector::new();
        pending.push((a, b));

        while let Ok(pair) = pending.pop() {
            match pair {
                (None, None) => {},
                (Some(a), Some(b)) if a.value == b.value => {
                    pending.push((&a.right, &b.right));
                    pending.push((&a.left, &b.left));
                },
                _ => return false,
            }
        }

        true
    }

    fn locate<'a, T: Ord>(value: &T, root: &'a Link<T>) -> &'a Link<T> {
        let mut current = root;
        while let Some(node) = current {
            if node.value == *value {
                break;
            }
            current = node.successor_for(value);
        }
        current
    }

    fn locate_slot<'a, T: Ord>(value: &T, root: &'a mut Link<T>) -> &'a mut Link<T> {
        let mut slot = root;
        while slot.as_deref().is_some_and(|node| node.value != *value) {
            // UNREACHABLE: The loop condition has just checked that slot holds a node.
            slot = unsafe { slot.as_mut().unreachable() }.successor_for_mut(value);
        }
        slot
    }

    fn largest_slot<T>(root: &mut Link<T>) -> &mut Link<T> {
        let mut slot = root;
        while slot.as_deref().is_some_and(Node::has_right) {
            // UNREACHABLE: The loop condition has just checked that slot holds a node.
            slot = &mut unsafe { slot.as_mut().unreachable() }.right;
        }
        slot
    }

    fn release_tree<T, A: NodeAllocator<T>>(
        root: Link<T>,
        allocator: &mut A,
    ) -> Result<(), RefusedNodes<T>> {
        let mut pending = Vector::new();
        let mut detached = Vector::new();
        pending.extend(root);

        // Detaching in node, right, left order and then releasing in reverse releases left
        // subtrees, then right subtrees, then their parent.
        while let Ok(mut node) = pending.pop() {
            let (left, right) = node.detach_successors();
            pending.extend(left);
            pending.extend(right);
            detached.push(node);
        }

        let mut result = Ok(());
        while let Ok(node) = detached.pop() {
            let released = allocator.release(Some(node)).map_err(RefusedNodes::from);
            result = RefusedNodes::join(result, released);
        }
        result
    }

    fn clone_tree<T: Clone, A: NodeAllocator<T>>(
        root: &Link<T>,
        allocator: &mut A,
    ) -> Result<Link<T>, OutOfMemory> {
        let mut frames = Vector::new();
        let mut built: Vector<Link<T>> = Vector::new();
        frames.push(Frame::Enter(root));

        while let Ok(frame) = frames.pop() {
            let source = match frame {
                Frame::Enter(None) => {
                    built.push(None);
                    continue;
                },
                Frame::Enter(Some(node)) => {
                    let node: &Node<T> = node;
                    frames.push(Frame::Exit(node));
                    frames.push(Frame::Enter(&node.right));
                    frames.push(Frame::Enter(&node.left));
                    continue;
                },
                Frame::Exit(source) => source,
            };

            // UNREACHABLE: Both subtrees of source were entered and finished before its exit, so
            // their copies are on top of the stack, right above left.
            let (right, left) = unsafe {
                (built.pop().ok().unreachable(), built.pop().ok().unreachable())
            };

            match allocator.buy(source.value.clone()) {
                Ok(mut node) => {
                    node.left = left;
                    node.right = right;
                    built.push(Some(node));
                },
                Err(error) => {
                    built.push(left);
                    built.push(right);
                    // The allocator produced every one of these nodes, releasing them can't fail.
                    while let Ok(orphan) = built.pop() {
                        Self::release_tree(orphan, allocator).throw();
                    }
                    return Err(error);
                },
            }
        }

        Ok(built.pop().ok().flatten())
    }
}
