//! Element types for observing how a collection treats the values it owns.

use std::cell::Cell;
use std::rc::Rc;

/// A zero-sized element, for checking that collections handle types which are never allocated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZeroSizedType;

/// A shared tally of the [`Tracked`] values which have been dropped.
#[derive(Debug, Clone, Default)]
pub struct DropCounter(Rc<Cell<usize>>);

impl DropCounter {
    pub fn new() -> DropCounter {
        DropCounter::default()
    }

    /// Creates a value which increments this counter when dropped.
    pub fn track(&self, value: i32) -> Tracked {
        Tracked {
            value,
            counter: Rc::clone(&self.0),
        }
    }

    pub fn dropped(&self) -> usize {
        self.0.get()
    }
}

/// A value registered with a [`DropCounter`]. Clones are counted separately from the original.
#[derive(Debug, Clone)]
pub struct Tracked {
    pub value: i32,
    counter: Rc<Cell<usize>>,
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.counter.set(self.counter.get() + 1);
    }
}
