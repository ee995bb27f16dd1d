//! A module containing [`Vector`], a growable array built on [`Array`](super::Array).
//!
//! Borrowed iteration uses [`Iter`](std::slice::Iter) and [`IterMut`](std::slice::IterMut) from
//! [`std::slice`].
//!
//! [`Vector`] is also re-exported under the parent module.

mod vector;

pub use vector::*;
