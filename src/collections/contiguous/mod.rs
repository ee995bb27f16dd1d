//! Contiguous collection types. Namely [`Array`] for buffers with a size fixed at creation and
//! [`Vector`] for contiguous collections that vary in size at runtime.
#![warn(missing_docs)]

pub mod array;
pub mod vector;

#[doc(inline)]
pub use array::Array;
#[doc(inline)]
pub use vector::Vector;

pub use crate::util::error::{
    CapacityOverflow, EmptyCollection, IndexOutOfBounds, OutOfMemory, TryReserveError,
};
