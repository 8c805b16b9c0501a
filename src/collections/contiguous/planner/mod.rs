//! A module containing [`CapacityPlanner`] and the [`capacity_exponent`] function it is built on.
//!
//! Both are re-exported under the parent module.

mod planner;

pub use planner::*;
