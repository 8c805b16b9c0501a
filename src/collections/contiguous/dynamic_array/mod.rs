//! A module containing [`DynamicArray`] and the constants that define its growth.
//!
//! [`IterMut`](std::slice::IterMut) and [`Iter`](std::slice::Iter) from [`std::slice`] are
//! available for borrowed iteration through [`Deref<Target = [T]>`](std::ops::Deref).
//!
//! [`DynamicArray`] is also re-exported under the parent module.

mod dynamic_array;

pub use dynamic_array::*;
