//! Contiguous collection types. Namely [`DynamicArray`], a growable array with exclusive ownership
//! of its storage, and [`Block`], the owning handle for the allocation behind it.
//!
//! Capacities for new allocations are decided by [`CapacityPlanner`].
#![warn(missing_docs)]

pub mod block;
pub mod dynamic_array;
#[allow(missing_docs)]
pub mod error;
pub mod planner;

#[doc(inline)]
pub use block::Block;
#[doc(inline)]
pub use dynamic_array::DynamicArray;
#[doc(inline)]
pub use planner::{CapacityPlanner, capacity_exponent};
