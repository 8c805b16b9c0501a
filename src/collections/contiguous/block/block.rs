use std::alloc::{self, Layout};
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use crate::collections::contiguous::error::{AllocFailure, CapacityOverflow, ReserveError};
use crate::util::result::ReserveResultExtension;
use crate::util::trace::trace_event;

/// An owning handle to a single contiguous allocation of `capacity` slots of `T`.
///
/// A Block doesn't track which of its slots are initialized, so it never reads or drops the values
/// it holds. Dropping a Block only releases its memory. Collections built on a Block are
/// responsible for dropping their live values first.
///
/// Zero-sized types and a capacity of zero never allocate, using a dangling pointer instead. The
/// capacity is still tracked as requested.
///
/// # Time Complexity
/// | Method | Complexity |
/// |-|-|
/// | `alloc` | `O(1)` |
/// | `capacity` | `O(1)` |
/// | `relocate` | `O(n)` |
/// | `take` | `O(1)` |
pub struct Block<T> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) cap: usize,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> Block<T> {
    /// Creates a Block with capacity 0, without allocating.
    pub const fn dangling() -> Block<T> {
        Block {
            ptr: NonNull::dangling(),
            cap: 0,
            _phantom: PhantomData,
        }
    }

    /// Allocates a Block with exactly `cap` uninitialized slots.
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if the layout for `cap` slots would exceed [`isize::MAX`] bytes,
    /// or [`AllocFailure`] if the global allocator can't satisfy the request.
    ///
    /// # Examples
    /// ```
    /// # use containers_lib::collections::contiguous::Block;
    /// let block = Block::<u32>::try_alloc(4).unwrap();
    /// assert_eq!(block.capacity(), 4);
    /// assert!(Block::<u32>::try_alloc(usize::MAX).is_err());
    /// ```
    pub fn try_alloc(cap: usize) -> Result<Block<T>, ReserveError> {
        let layout = Self::make_layout(cap)?;
        let ptr = Self::make_ptr(layout)?;

        Ok(Block {
            ptr,
            cap,
            _phantom: PhantomData,
        })
    }

    /// Allocates a Block with exactly `cap` uninitialized slots.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`]. Allocator failures are passed to
    /// [`alloc::handle_alloc_error`].
    pub fn alloc(cap: usize) -> Block<T> {
        Self::try_alloc(cap).or_handle_alloc_error()
    }

    /// Returns the number of slots in the Block.
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns a pointer to the first slot. The pointer is dangling if nothing is allocated.
    pub const fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr().cast_const()
    }

    /// Returns a mutable pointer to the first slot. The pointer is dangling if nothing is
    /// allocated.
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Moves the first `live` slots into a new allocation of `new_cap` slots, then releases the old
    /// allocation.
    ///
    /// The new allocation is completed before self is modified, so on error self still owns the
    /// original allocation and its contents. The values are moved bitwise, which is sound because
    /// the old allocation never reads or drops them afterwards.
    ///
    /// # Errors
    /// See [`Block::try_alloc`].
    ///
    /// # Panics
    /// Panics if `live` exceeds either the current or the new capacity.
    pub fn try_relocate(&mut self, live: usize, new_cap: usize) -> Result<(), ReserveError> {
        assert!(
            live <= self.cap && live <= new_cap,
            "cannot relocate {} slots between capacities {} and {}",
            live,
            self.cap,
            new_cap
        );

        if new_cap == self.cap {
            return Ok(());
        }

        let mut new_block = Block::try_alloc(new_cap)?;

        // SAFETY: Both pointers are valid for live slots, as checked above, and properly aligned.
        // The allocations are distinct, so they can't overlap. Bitwise copies of uninitialized
        // slots are allowed because copy_nonoverlapping doesn't interpret the values.
        unsafe {
            ptr::copy_nonoverlapping(self.as_ptr(), new_block.as_mut_ptr(), live);
        }

        trace_event!(old_cap = self.cap, new_cap, live, "relocated block");

        // The swapped out Block now holds the old allocation, which is released when it is dropped
        // at the end of this scope.
        mem::swap(self, &mut new_block);
        Ok(())
    }

    /// Moves the first `live` slots into a new allocation of `new_cap` slots.
    ///
    /// # Panics
    /// Panics if `live` exceeds either capacity or if memory layout size exceeds [`isize::MAX`].
    /// Allocator failures are passed to [`alloc::handle_alloc_error`].
    pub fn relocate(&mut self, live: usize, new_cap: usize) {
        self.try_relocate(live, new_cap).or_handle_alloc_error()
    }

    /// Takes the allocation out of self, leaving a dangling Block with capacity 0 in its place.
    ///
    /// # Examples
    /// ```
    /// # use containers_lib::collections::contiguous::Block;
    /// let mut block = Block::<u8>::alloc(8);
    /// let taken = block.take();
    /// assert_eq!(taken.capacity(), 8);
    /// assert_eq!(block.capacity(), 0);
    /// ```
    pub const fn take(&mut self) -> Block<T> {
        mem::replace(self, Block::dangling())
    }
}

impl<T> Block<T> {
    /// A helper function to create a [`Layout`] for `cap` slots of `T`.
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if memory layout size exceeds [`isize::MAX`].
    pub(crate) fn make_layout(cap: usize) -> Result<Layout, CapacityOverflow> {
        Layout::array::<T>(cap).map_err(|_| CapacityOverflow)
    }

    /// A helper function to create a [`NonNull`] for the provided [`Layout`]. Returns a dangling
    /// pointer for a zero-sized layout.
    ///
    /// # Errors
    /// Returns [`AllocFailure`] if the global allocator returns null.
    pub(crate) fn make_ptr(layout: Layout) -> Result<NonNull<T>, AllocFailure> {
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        // SAFETY: Zero-sized layouts have been guarded against.
        let raw_ptr = unsafe { alloc::alloc(layout) };

        NonNull::new(raw_ptr.cast()).ok_or(AllocFailure { layout })
    }
}

impl<T> Default for Block<T> {
    fn default() -> Self {
        Self::dangling()
    }
}

impl<T> Drop for Block<T> {
    fn drop(&mut self) {
        // The layout was valid when allocated, so this can only fail for a Block that was never
        // allocated in the first place.
        if let Ok(layout) = Self::make_layout(self.cap) {
            if layout.size() != 0 {
                // SAFETY: ptr was allocated in the global allocator with this same layout.
                // Zero-sized layouts aren't allocated and are guarded against deallocation.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) }
            }
        }
    }
}

// SAFETY: A Block uniquely owns its allocation, so it can be sent to another thread when T: Send.
unsafe impl<T: Send> Send for Block<T> {}
// SAFETY: Block's safe API never hands out references to its slots, so sharing it is no more
// permissive than sharing T.
unsafe impl<T: Sync> Sync for Block<T> {}

impl<T> Debug for Block<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("ptr", &self.ptr)
            .field("cap", &self.cap)
            .finish()
    }
}
