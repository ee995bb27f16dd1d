//! Strategies for obtaining and reclaiming the individually owned nodes of a tree.

use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::ptr;

use super::{Link, Node};
use crate::collections::contiguous::Vector;
use crate::collections::hash::ChainedHashSet;
use crate::util::error::{OutOfMemory, UnknownNode};

/// A source of tree nodes. A tree buys a node for every value inserted into it and hands each node
/// back when the value is removed.
///
/// Allocators are decoupled from the tree's structure: they only ever see whole nodes, never the
/// links between them. Releasing a node doesn't release its children, the caller detaches and
/// releases those separately.
pub trait NodeAllocator<T> {
    /// Produces a new leaf node holding `value`.
    ///
    /// # Errors
    /// Returns [`OutOfMemory`] if the node can't be provided. The allocator's state is unchanged.
    fn buy(&mut self, value: T) -> Result<Box<Node<T>>, OutOfMemory>;

    /// Reclaims `node`. Releasing an empty link does nothing.
    ///
    /// # Errors
    /// Returns a [`RefusedNode`] if the allocator doesn't consider `node` live. The node is handed
    /// back inside the error without being freed, since another allocator may still be tracking
    /// it.
    fn release(&mut self, node: Link<T>) -> Result<(), RefusedNode<T>>;
}

/// A node which an allocator wouldn't take back, returned to the caller intact.
pub struct RefusedNode<T> {
    pub error: UnknownNode,
    pub node: Box<Node<T>>,
}

impl<T> Debug for RefusedNode<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefusedNode").field("error", &self.error).finish_non_exhaustive()
    }
}

impl<T> Display for RefusedNode<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.error, f)
    }
}

impl<T> Error for RefusedNode<T> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

impl<T> From<RefusedNode<T>> for UnknownNode {
    fn from(value: RefusedNode<T>) -> Self {
        value.error
    }
}

/// Every node refused while releasing a whole tree. Each node has been detached from its children,
/// which were offered to the allocator separately.
pub struct RefusedNodes<T> {
    /// The error for the first node refused.
    pub error: UnknownNode,
    pub nodes: Vector<Box<Node<T>>>,
}

impl<T> RefusedNodes<T> {
    /// Combines the outcomes of two releases, keeping the earlier error and every refused node.
    pub(crate) fn join(
        first: Result<(), RefusedNodes<T>>,
        second: Result<(), RefusedNodes<T>>,
    ) -> Result<(), RefusedNodes<T>> {
        match (first, second) {
            (Err(mut first), Err(mut second)) => {
                while let Ok(node) = second.nodes.pop() {
                    first.nodes.push(node);
                }
                Err(first)
            },
            (Ok(()), other) | (other, Ok(())) => other,
        }
    }
}

impl<T> From<RefusedNode<T>> for RefusedNodes<T> {
    fn from(value: RefusedNode<T>) -> Self {
        let mut nodes = Vector::new();
        nodes.push(value.node);
        RefusedNodes {
            error: value.error,
            nodes,
        }
    }
}

impl<T> Debug for RefusedNodes<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefusedNodes")
            .field("error", &self.error)
            .field("count", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

impl<T> Display for RefusedNodes<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} node(s) refused in total)", self.error, self.nodes.len())
    }
}

impl<T> Error for RefusedNodes<T> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

/// An allocator which places every node in its own box, with no bookkeeping.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimpleAllocator;

impl<T> NodeAllocator<T> for SimpleAllocator {
    fn buy(&mut self, value: T) -> Result<Box<Node<T>>, OutOfMemory> {
        Ok(Box::new(Node::new(value)))
    }

    fn release(&mut self, node: Link<T>) -> Result<(), RefusedNode<T>> {
        drop(node);
        Ok(())
    }
}

/// An instrumented allocator for testing. It records the address of every live node it has
/// produced, counts how many nodes it has produced in total, and can be configured to fail once a
/// number of nodes have been bought.
///
/// Nodes are still boxed individually, so a `DebugAllocator` can be swapped for a
/// [`SimpleAllocator`] without any other change.
#[derive(Debug, Default, Clone)]
pub struct DebugAllocator {
    live: ChainedHashSet<usize>,
    total: usize,
    fail_after: Option<usize>,
}

impl DebugAllocator {
    /// Creates an allocator which never fails.
    pub fn new() -> DebugAllocator {
        DebugAllocator::default()
    }

    /// Creates an allocator which fails every purchase once `limit` nodes have been bought in
    /// total.
    pub fn with_fail_after(limit: usize) -> DebugAllocator {
        DebugAllocator {
            fail_after: Some(limit),
            ..DebugAllocator::default()
        }
    }

    /// Returns the number of nodes bought but not yet released.
    pub const fn active_allocations(&self) -> usize {
        self.live.len()
    }

    /// Returns the number of nodes successfully bought over the allocator's lifetime.
    pub const fn total_allocations(&self) -> usize {
        self.total
    }

    pub const fn fail_after(&self) -> Option<usize> {
        self.fail_after
    }

    /// Changes (or with `None`, removes) the purchase limit. Nodes already bought count towards
    /// the new limit.
    pub fn set_fail_after(&mut self, limit: Option<usize>) {
        self.fail_after = limit;
    }

    fn address_of<T>(node: &Node<T>) -> usize {
        ptr::from_ref(node).addr()
    }
}

impl<T> NodeAllocator<T> for DebugAllocator {
    fn buy(&mut self, value: T) -> Result<Box<Node<T>>, OutOfMemory> {
        if let Some(limit) = self.fail_after.filter(|&limit| self.total >= limit) {
            tracing::debug!(limit, total = self.total, "injected node allocation failure");
            return Err(OutOfMemory {
                bytes: size_of::<Node<T>>(),
            });
        }

        let node = Box::new(Node::new(value));
        self.live.insert(Self::address_of(&node));
        self.total += 1;
        Ok(node)
    }

    fn release(&mut self, node: Link<T>) -> Result<(), RefusedNode<T>> {
        let Some(node) = node else {
            return Ok(());
        };

        let address = Self::address_of(&node);
        match self.live.remove(&address) {
            Some(_) => Ok(()),
            None => {
                tracing::warn!(address, "refused to release a node which isn't live");
                Err(RefusedNode {
                    error: UnknownNode { address },
                    node,
                })
            },
        }
    }
}
