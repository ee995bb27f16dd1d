//! Generic container types.
//!
//! # Contents
//! - [`contiguous`]: [`Array`](contiguous::Array), a buffer with a size fixed at creation, and
//!   [`Vector`](contiguous::Vector), a growable array built on top of it.
//! - [`hash`]: [`ChainedHashSet`](hash::ChainedHashSet), a hash set which chains colliding
//!   elements and rehashes as it grows.
//! - [`binary_tree`]: [`BinarySearchTree`](binary_tree::BinarySearchTree), whose node allocation
//!   and tree algorithm are both chosen through type parameters.
//!
//! # Method
//! Applicable types here implement [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut), which
//! saves writing some of the more repetitive functionality.

#[cfg(feature = "binary-tree")]
pub mod binary_tree;
#[cfg(feature = "contiguous")]
pub mod contiguous;
#[cfg(feature = "hash")]
pub mod hash;
