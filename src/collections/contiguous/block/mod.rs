//! A module containing [`Block`], the owning handle for a contiguous allocation.
//!
//! [`Block`] is also re-exported under the parent module.

mod block;
mod tests;

pub use block::*;
