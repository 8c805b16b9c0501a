//! General-purpose collection types.
//!
//! # Method
//! Applicable types here implement [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut), which
//! provides slice functionality such as iteration and sorting without repeating it.

pub mod contiguous;
