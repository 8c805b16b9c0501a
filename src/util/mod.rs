#[cfg(test)]
pub mod alloc;
pub mod panic;
pub mod result;
pub mod trace;
