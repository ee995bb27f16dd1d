//! A small library of generic containers, written from the allocation up.
//!
//! # Contents
//! - [`Array`](collections::contiguous::Array): a single allocation of exactly `size` elements.
//! - [`Vector`](collections::contiguous::Vector): a growable array over an `Array`, doubling its
//!   capacity as it fills.
//! - [`ChainedHashSet`](collections::hash::ChainedHashSet): a separate-chaining hash set which
//!   rehashes before an insertion would exceed its maximum load factor.
//! - [`BinarySearchTree`](collections::binary_tree::BinarySearchTree): an unbalanced search tree
//!   whose node allocator and tree algorithm are type parameters, with recursive and iterative
//!   versions of the algorithm that build identical trees.
//!
//! # Method
//! None of the collections here are built on [`Vec`] or the standard collections. Buffers are
//! requested from the global allocator directly, and trees and chains own their nodes through
//! [`Box`]. The library does use [`Vec`] in doc examples, where the point is the collection being
//! demonstrated.
//!
//! # Error Handling
//! Errors are strongly typed: each condition is a small struct implementing
//! [`Error`](std::error::Error), and methods which can fail in more than one way return an enum of
//! them rather than a boxed error.
//!
//! Fallible operations come in pairs. The `try_` version returns a [`Result`], leaving the
//! collection exactly as it was on failure. The plain version panics with the error's message,
//! because having to handle a capacity overflow on every push isn't ergonomic.
//!
//! # Logging
//! Diagnostic events (buffer growth, rehashing, injected allocation failures) are emitted through
//! [`tracing`]. The library never installs a subscriber, so nothing is recorded unless the
//! application sets one up.
//!
//! # Features
//! Each group of collections sits behind a Cargo feature: `contiguous`, `hash` and `binary-tree`.
//! `collections-all` (the default) enables all of them.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[cfg(feature = "collections")]
pub mod collections;

pub(crate) mod util;
