//! A module containing [`ChainedHashSet`] and associated types.
//!
//! Each bucket of the set is a chain, a singly linked list which owns the elements hashed to that
//! bucket. [`Iter`] provides borrowed iteration over every element, bucket by bucket.
//!
//! [`ChainedHashSet`] is also re-exported under the parent module.

mod chain;
mod hash_set;
mod iter;

pub(crate) use chain::*;
pub use hash_set::*;
pub use iter::*;
