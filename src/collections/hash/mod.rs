//! Hash-based collections. Currently only [`ChainedHashSet`], a separate-chaining hash set.
#![warn(missing_docs)]

pub mod set;

#[doc(inline)]
pub use set::ChainedHashSet;

pub use crate::util::error::{InvalidLoadFactor, TryReserveError};
