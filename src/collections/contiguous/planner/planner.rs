use crate::collections::contiguous::error::{CapacityOverflow, InvalidBase};

/// Returns the smallest exponent `k >= 1` such that `base.pow(k) > count`.
///
/// The exponent is used to size allocations proportionally to the requested count rather than
/// allocating exactly `count` slots. A `count` of zero returns the floor value of 1, so that an
/// allocation planned for nothing still has room to grow into.
///
/// # Panics
/// Panics if `base` is less than 2, because no power of such a base ever grows past `count`.
///
/// # Examples
/// ```
/// # use containers_lib::collections::contiguous::capacity_exponent;
/// assert_eq!(capacity_exponent(0, 2), 1);
/// assert_eq!(capacity_exponent(1, 2), 1);
/// assert_eq!(capacity_exponent(5, 2), 3);
/// assert_eq!(capacity_exponent(100, 10), 3);
/// ```
pub const fn capacity_exponent(count: usize, base: usize) -> u32 {
    assert!(base >= 2, "capacity base must be at least 2");

    let mut exponent = 0;
    let mut power: usize = 1;

    while power <= count {
        exponent += 1;
        power = match power.checked_mul(base) {
            Some(next) => next,
            // base^exponent doesn't fit in a usize, so it is greater than any count.
            None => return exponent,
        };
    }

    if exponent == 0 { 1 } else { exponent }
}

/// Plans the capacity of new allocations for a requested number of elements.
///
/// A planned capacity is always `base` raised to [`capacity_exponent`], which is strictly greater
/// than the requested count.
///
/// # Examples
/// ```
/// # use containers_lib::collections::contiguous::CapacityPlanner;
/// let planner = CapacityPlanner::DEFAULT;
/// assert_eq!(planner.capacity(0), Ok(2));
/// assert_eq!(planner.capacity(5), Ok(8));
///
/// let planner = CapacityPlanner::new(3).unwrap();
/// assert_eq!(planner.capacity(5), Ok(9));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapacityPlanner {
    base: usize,
}

impl CapacityPlanner {
    /// The base used by [`CapacityPlanner::DEFAULT`].
    pub const DEFAULT_BASE: usize = 2;

    /// A planner which sizes allocations in powers of two.
    pub const DEFAULT: CapacityPlanner = CapacityPlanner { base: Self::DEFAULT_BASE };

    /// Creates a planner using the provided `base`.
    ///
    /// # Errors
    /// Returns [`InvalidBase`] if `base` is less than 2.
    pub const fn new(base: usize) -> Result<CapacityPlanner, InvalidBase> {
        if base < 2 {
            Err(InvalidBase { base })
        } else {
            Ok(CapacityPlanner { base })
        }
    }

    /// Returns the base of this planner.
    pub const fn base(&self) -> usize {
        self.base
    }

    /// Returns the exponent for `count`, see [`capacity_exponent`].
    pub const fn exponent(&self, count: usize) -> u32 {
        capacity_exponent(count, self.base)
    }

    /// Returns the number of slots to allocate for `count` elements.
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if the planned capacity doesn't fit in a [`usize`].
    pub const fn capacity(&self, count: usize) -> Result<usize, CapacityOverflow> {
        match self.base.checked_pow(self.exponent(count)) {
            Some(cap) => Ok(cap),
            None => Err(CapacityOverflow),
        }
    }
}

impl Default for CapacityPlanner {
    fn default() -> Self {
        Self::DEFAULT
    }
}
