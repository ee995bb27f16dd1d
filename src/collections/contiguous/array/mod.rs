//! A module containing [`Array`], the fixed-size buffer that the other contiguous and hash-based
//! collections are built on.
//!
//! Borrowed iteration uses [`Iter`](std::slice::Iter) and [`IterMut`](std::slice::IterMut) from
//! [`std::slice`] through [`Deref`](std::ops::Deref).
//!
//! [`Array`] is also re-exported under the parent module.

mod array;

pub use array::*;
