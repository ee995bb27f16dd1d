//! An unbalanced [`BinarySearchTree`] with pluggable strategies for node allocation
//! ([`NodeAllocator`]) and for the tree algorithm itself ([`NodeOperations`]).
//!
//! The building blocks are public so that other structures can be assembled from them: a tree is
//! a [`Link`] to a [`Node`], the algorithm operates on links, and [`TreeIter`] walks any link in
//! order.

pub mod alloc;
mod iter;
mod node;
pub mod ops;
mod tests;
mod tree;

#[doc(inline)]
pub use alloc::{DebugAllocator, NodeAllocator, RefusedNode, RefusedNodes, SimpleAllocator};
pub use iter::*;
pub use node::{Link, Node};
#[doc(inline)]
pub use ops::{Iterative, NodeOperations, Recursive};
pub use tree::*;

pub use crate::util::error::{OutOfMemory, UnknownNode};
