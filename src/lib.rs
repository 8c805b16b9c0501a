//! A small container library built around [`DynamicArray`](collections::contiguous::DynamicArray),
//! a growable contiguous array that exclusively owns its storage.
//!
//! # Purpose
//! The library exists to get the fundamentals of a vector right: value semantics on copy, emptying
//! ownership transfer, amortized growth and shifting removal, with every out of range access
//! handled explicitly rather than left undefined.
//!
//! # Method
//! Storage is split into two layers. A [`Block`](collections::contiguous::Block) owns one
//! allocation and only ever releases memory. A [`DynamicArray`](collections::contiguous::DynamicArray)
//! owns a Block and tracks which prefix of it holds live values, dropping them when required.
//! Growth allocates a new Block before touching the old one, so a failed allocation never leaves a
//! partially moved array behind.
//!
//! Capacities for new allocations come from
//! [`CapacityPlanner`](collections::contiguous::CapacityPlanner), which sizes them as a power of
//! its base rather than exactly to the requested count.
//!
//! # Error Handling
//! Panicking is more ergonomic for some operations, because users don't want to handle a capacity
//! overflow every time they push. Those operations panic on capacity overflow and pass allocator
//! failures to [`handle_alloc_error`](std::alloc::handle_alloc_error), and each has a `try_`
//! counterpart that returns the error instead.
//!
//! Other errors are returned via [`Result`]s, strongly typed using enums for static dispatch rather
//! than dynamic, with structs (often ZSTs) that implement [`Error`](std::error::Error). See
//! [`error`](collections::contiguous::error).
//!
//! # Logging
//! With the default `tracing` feature, reallocations and planned allocations are reported as
//! `tracing` events at trace level. Errors are never logged.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod collections;

pub(crate) mod util;
