//! Error types shared by the collections in this crate.
//!
//! Each condition gets its own (usually zero-sized) type so that callers can match on exactly what
//! went wrong. Where a method can fail in more than one way, an enum of these types is used instead
//! of boxing.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// Returned by checked indexing when `index` is not less than the length of the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}

impl Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of bounds for collection with {} elements!", self.index, self.len)
    }
}

impl Error for IndexOutOfBounds {}

/// The requested number of elements can't be represented by a memory layout (the total size would
/// exceed [`isize::MAX`] bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityOverflow;

impl Display for CapacityOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Capacity overflow!")
    }
}

impl Error for CapacityOverflow {}

/// The allocator was unable to satisfy a request for memory.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("Memory allocation of {bytes} bytes failed!")]
pub struct OutOfMemory {
    pub bytes: usize,
}

/// The ways in which obtaining a new buffer can fail. In both cases, the collection that requested
/// the buffer is left exactly as it was.
#[derive(Debug, Display, Error, From, TryInto, IsVariant, Clone, Copy, PartialEq, Eq)]
pub enum TryReserveError {
    CapacityOverflow(CapacityOverflow),
    OutOfMemory(OutOfMemory),
}

/// An operation which requires at least one element was performed on an empty collection.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("Operation was performed on an empty collection!")]
pub struct EmptyCollection;

/// A maximum load factor has to be a positive, finite number.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq)]
#[display("Load factor must be a positive number, got {value}!")]
pub struct InvalidLoadFactor {
    pub value: f64,
}

/// A node was handed back to an allocator which has no record of producing it (or which has
/// already released it).
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("Trying to release a node at {address:#x} which wasn't bought from this allocator!")]
pub struct UnknownNode {
    pub address: usize,
}
