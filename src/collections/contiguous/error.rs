//! Error types for the contiguous collections.
//!
//! Each failure is its own type, which are combined into enums for the methods that can fail in
//! more than one way. The panicking counterparts of fallible methods panic with the same messages.

use std::alloc::Layout;

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// An attempt was made to remove an element from a collection containing no elements.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("cannot remove from an empty collection")]
pub struct EmptyContainer;

/// An index was provided which doesn't refer to an element in the collection.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("index {index} out of bounds for collection with {len} elements")]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}

/// The requested capacity can't be represented, either because the slot count overflows `usize` or
/// because the allocation would exceed [`isize::MAX`] bytes.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("capacity overflow")]
pub struct CapacityOverflow;

/// The global allocator was unable to provide memory for the requested layout.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("memory allocation of {} bytes failed", layout.size())]
pub struct AllocFailure {
    pub layout: Layout,
}

/// A [`CapacityPlanner`](super::CapacityPlanner) was configured with a base that can't produce
/// growing capacities.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("capacity base must be at least 2, got {base}")]
pub struct InvalidBase {
    pub base: usize,
}

/// The ways in which acquiring more capacity can fail.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error, From, TryInto, IsVariant)]
pub enum ReserveError {
    CapacityOverflow(CapacityOverflow),
    AllocFailure(AllocFailure),
}

/// The ways in which removing an element by index can fail.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error, From, TryInto, IsVariant)]
pub enum RemoveError {
    Empty(EmptyContainer),
    IndexOutOfBounds(IndexOutOfBounds),
}
