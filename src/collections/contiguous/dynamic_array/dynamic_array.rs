use std::borrow::{Borrow, BorrowMut};
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr;
use std::slice;

use crate::collections::contiguous::Block;
use crate::collections::contiguous::CapacityPlanner;
use crate::collections::contiguous::error::{
    CapacityOverflow, EmptyContainer, IndexOutOfBounds, RemoveError, ReserveError,
};
use crate::util::result::{ReserveResultExtension, ResultExtension};
use crate::util::trace::trace_event;

/// The capacity of a newly constructed DynamicArray, and the smallest capacity it grows into.
pub const MIN_CAP: usize = 2;

/// The factor by which capacity is multiplied when a push finds the DynamicArray full.
pub const GROWTH_FACTOR: usize = 2;

/// A growable contiguous collection with exclusive ownership of its storage, built on
/// [`Block<T>`].
///
/// Capacity is managed in two ways. Construction from a count or a sequence, and explicit
/// reservation, size the allocation with the default [`CapacityPlanner`], so that the capacity is
/// the smallest power of two strictly greater than the number of elements. Pushing into a full
/// DynamicArray multiplies the capacity by [`GROWTH_FACTOR`]. Capacity is never reduced by
/// removing elements.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the DynamicArray.
/// - `i`: The index of the item in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `capacity` | `O(1)` |
/// | `try_get` | `O(1)` |
/// | `index` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `pop` | `O(1)` |
/// | `remove_at` | `O(n-i)` |
/// | `take` | `O(1)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `clone` | `O(n)` |
///
/// \* If the DynamicArray doesn't have enough capacity for the new element, `push` will take
/// `O(n)`.
///
/// \** If the DynamicArray has enough capacity for the additional items already, `reserve` is
/// `O(1)`.
pub struct DynamicArray<T> {
    pub(crate) block: Block<T>,
    pub(crate) len: usize,
}

impl<T> DynamicArray<T> {
    /// Creates a new, empty DynamicArray with capacity [`MIN_CAP`].
    ///
    /// # Examples
    /// ```
    /// # use containers_lib::collections::contiguous::DynamicArray;
    /// let arr: DynamicArray<u8> = DynamicArray::new();
    /// assert_eq!(arr.len(), 0);
    /// assert_eq!(arr.capacity(), 2);
    /// ```
    pub fn new() -> DynamicArray<T> {
        DynamicArray {
            block: Block::alloc(MIN_CAP),
            len: 0,
        }
    }

    /// Creates a DynamicArray with length and capacity 0, without allocating. This is the state
    /// that [`take`](DynamicArray::take) leaves behind. The first push allocates [`MIN_CAP`]
    /// slots.
    ///
    /// # Examples
    /// ```
    /// # use containers_lib::collections::contiguous::DynamicArray;
    /// let mut arr = DynamicArray::unallocated();
    /// assert_eq!(arr.capacity(), 0);
    /// arr.push('a');
    /// assert_eq!(arr.capacity(), 2);
    /// ```
    pub const fn unallocated() -> DynamicArray<T> {
        DynamicArray {
            block: Block::dangling(),
            len: 0,
        }
    }

    /// Returns the number of elements in the DynamicArray.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the DynamicArray contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the DynamicArray can hold before it needs to reallocate.
    pub const fn capacity(&self) -> usize {
        self.block.capacity()
    }

    /// Pushes the provided value onto the end of the DynamicArray, growing the capacity by
    /// [`GROWTH_FACTOR`] if it is full.
    ///
    /// Growth allocates the new storage before touching the old one, so if it fails the
    /// DynamicArray is left exactly as it was.
    ///
    /// # Panics
    /// Panics if the memory layout of the DynamicArray would have a size that exceeds
    /// [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use containers_lib::collections::contiguous::DynamicArray;
    /// let mut arr = DynamicArray::new();
    /// arr.push(1);
    /// arr.push(2);
    /// assert_eq!(arr.capacity(), 2);
    /// arr.push(3);
    /// assert_eq!(arr.capacity(), 4);
    /// assert_eq!(&*arr, &[1, 2, 3]);
    /// ```
    pub fn push(&mut self, value: T) {
        if self.len == self.capacity() {
            self.grow();
        }
        // SAFETY: The capacity has just been adjusted to support the addition of the new item.
        unsafe { self.push_unchecked(value) }
    }

    /// Pushes the provided value onto the end of the DynamicArray, assuming that there is enough
    /// capacity to do so.
    ///
    /// # Safety
    /// It is up to the caller to ensure that the DynamicArray has enough capacity to add the
    /// provided value, using [`reserve`](DynamicArray::reserve) or by checking
    /// [`capacity`](DynamicArray::capacity). Using this method on a DynamicArray without enough
    /// capacity is undefined behavior.
    pub const unsafe fn push_unchecked(&mut self, value: T) {
        // SAFETY: It is up to the caller to ensure that len < capacity, so the slot is in bounds
        // of the allocation and currently uninitialized.
        unsafe { self.block.as_mut_ptr().add(self.len).write(value); }
        self.len += 1;
    }

    /// Pops the last value off the end of the DynamicArray, returning it if the DynamicArray
    /// wasn't empty.
    ///
    /// # Examples
    /// ```
    /// # use containers_lib::collections::contiguous::DynamicArray;
    /// let mut arr = DynamicArray::from([1, 2]);
    /// assert_eq!(arr.pop(), Some(2));
    /// assert_eq!(arr.pop(), Some(1));
    /// assert_eq!(arr.pop(), None);
    /// ```
    pub const fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            // Decrement len before reading, so the slot is no longer considered live.
            self.len -= 1;

            // SAFETY: len has just been decremented, so it is within the capacity and refers to an
            // initialized value. The value is moved out bitwise and its slot is now outside of the
            // live range, so it won't be read or dropped again.
            let value = unsafe { self.block.as_ptr().add(self.len).read() };
            Some(value)
        }
    }

    /// Removes and returns the element at `index`, shifting all following elements one position
    /// to the left to close the gap. The capacity is unchanged.
    ///
    /// # Errors
    /// Returns [`RemoveError::Empty`] if the DynamicArray has no elements, or
    /// [`RemoveError::IndexOutOfBounds`] if `index >= len`. The DynamicArray is unchanged in either
    /// case.
    ///
    /// # Examples
    /// ```
    /// # use containers_lib::collections::contiguous::DynamicArray;
    /// # use containers_lib::collections::contiguous::error::RemoveError;
    /// let mut arr = DynamicArray::from(['a', 'b', 'c']);
    /// assert_eq!(arr.remove_at(1), Ok('b'));
    /// assert_eq!(&*arr, &['a', 'c']);
    /// assert!(matches!(arr.remove_at(2), Err(RemoveError::IndexOutOfBounds(_))));
    /// ```
    pub fn remove_at(&mut self, index: usize) -> Result<T, RemoveError> {
        if self.len == 0 {
            return Err(EmptyContainer.into());
        }
        if index >= self.len {
            return Err(IndexOutOfBounds { index, len: self.len }.into());
        }

        // SAFETY: index < len, so hole points to an initialized value within the allocation. The
        // following len - index - 1 values are also initialized and in bounds. ptr::copy handles
        // the overlap between the source and destination ranges.
        let value = unsafe {
            let hole = self.block.as_mut_ptr().add(index);
            let value = hole.read();
            ptr::copy(hole.add(1), hole, self.len - index - 1);
            value
        };

        // The last slot now holds a bitwise duplicate of its neighbor, which is excluded here.
        self.len -= 1;
        Ok(value)
    }

    /// Removes and returns the first element. This is [`remove_at`](DynamicArray::remove_at) with
    /// an index of 0.
    ///
    /// # Errors
    /// Returns [`RemoveError::Empty`] if the DynamicArray has no elements.
    pub fn remove_first(&mut self) -> Result<T, RemoveError> {
        self.remove_at(0)
    }

    /// Returns a reference to the element at `index`, or [`None`] if it is out of bounds. Unlike
    /// indexing, this never panics.
    ///
    /// # Examples
    /// ```
    /// # use containers_lib::collections::contiguous::DynamicArray;
    /// let arr = DynamicArray::from([2, 3]);
    /// assert_eq!(arr.try_get(0), Some(&2));
    /// assert_eq!(arr.try_get(5), None);
    /// ```
    pub fn try_get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            // SAFETY: index < len, so the value is initialized. The returned reference borrows
            // self, preventing mutation for its lifetime.
            Some(unsafe { &*self.block.as_ptr().add(index) })
        } else {
            None
        }
    }

    /// Returns a mutable reference to the element at `index`, or [`None`] if it is out of bounds.
    pub fn try_get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            // SAFETY: index < len, so the value is initialized. The returned reference mutably
            // borrows self, preventing any other access for its lifetime.
            Some(unsafe { &mut *self.block.as_mut_ptr().add(index) })
        } else {
            None
        }
    }

    /// Ensures that the DynamicArray can hold an additional `extra` elements without reallocating.
    /// If a reallocation is required, the new capacity is planned for `len + extra` elements.
    ///
    /// # Panics
    /// Panics if the memory layout of the DynamicArray would have a size that exceeds
    /// [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use containers_lib::collections::contiguous::DynamicArray;
    /// let mut arr = DynamicArray::from([1, 2, 3]);
    /// assert_eq!(arr.capacity(), 4);
    /// arr.reserve(5);
    /// assert_eq!(arr.capacity(), 16);
    /// ```
    pub fn reserve(&mut self, extra: usize) {
        self.try_reserve(extra).or_handle_alloc_error()
    }

    /// The fallible form of [`reserve`](DynamicArray::reserve).
    ///
    /// # Errors
    /// Returns a [`ReserveError`] if the capacity would overflow or the allocator fails. The
    /// DynamicArray is unchanged in either case.
    pub fn try_reserve(&mut self, extra: usize) -> Result<(), ReserveError> {
        let required = self.len.checked_add(extra).ok_or(CapacityOverflow)?;
        if required <= self.capacity() {
            return Ok(());
        }

        let new_cap = CapacityPlanner::DEFAULT.capacity(required)?;
        self.block.try_relocate(self.len, new_cap)
    }

    /// Shortens the DynamicArray to `new_len` elements, dropping the rest. Does nothing if
    /// `new_len >= len`. The capacity is unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }

        let tail_len = self.len - new_len;
        // Shrink len first, so a panicking drop leaks the remaining values instead of dropping
        // them twice.
        self.len = new_len;

        // SAFETY: The tail_len values from new_len were initialized and are now outside of the
        // live range, so they won't be dropped again.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.block.as_mut_ptr().add(new_len),
                tail_len,
            ));
        }
    }

    /// Drops all elements, keeping the capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Moves the contents out of self, returning them in a new DynamicArray with the same length
    /// and capacity. Self is left in the [`unallocated`](DynamicArray::unallocated) state, where
    /// it can be reused or dropped.
    ///
    /// # Examples
    /// ```
    /// # use containers_lib::collections::contiguous::DynamicArray;
    /// let mut a = DynamicArray::from([1, 2, 3]);
    /// let b = a.take();
    /// assert_eq!(&*b, &[1, 2, 3]);
    /// assert_eq!((a.len(), a.capacity()), (0, 0));
    /// ```
    pub const fn take(&mut self) -> DynamicArray<T> {
        DynamicArray {
            block: self.block.take(),
            len: mem::replace(&mut self.len, 0),
        }
    }
}

impl<T> DynamicArray<T> {
    /// Creates an empty DynamicArray with the capacity planned for `count` elements.
    pub(crate) fn with_planned_capacity(count: usize) -> Result<DynamicArray<T>, ReserveError> {
        let cap = CapacityPlanner::DEFAULT.capacity(count)?;
        trace_event!(count, cap, "planned dynamic array allocation");

        Ok(DynamicArray {
            block: Block::try_alloc(cap)?,
            len: 0,
        })
    }

    /// Grows the storage by [`GROWTH_FACTOR`] so that at least one more element fits.
    ///
    /// # Panics
    /// Panics if the memory layout of the DynamicArray would have a size that exceeds
    /// [`isize::MAX`].
    pub(crate) fn grow(&mut self) {
        self.try_grow().or_handle_alloc_error()
    }

    pub(crate) fn try_grow(&mut self) -> Result<(), ReserveError> {
        let new_cap = self
            .capacity()
            .checked_mul(GROWTH_FACTOR)
            .ok_or(CapacityOverflow)?
            .max(MIN_CAP);

        self.block.try_relocate(self.len, new_cap)
    }

    /// Checks that the provided index is within the bounds of self.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    #[track_caller]
    pub(crate) fn check_index(&self, index: usize) {
        if index >= self.len {
            Err::<(), _>(IndexOutOfBounds {
                index,
                len: self.len,
            }).throw()
        }
    }
}

impl<T: Default> DynamicArray<T> {
    /// Creates a DynamicArray of `count` default values, with the capacity planned for `count`
    /// elements.
    ///
    /// # Panics
    /// Panics if the planned capacity overflows or its memory layout exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use containers_lib::collections::contiguous::DynamicArray;
    /// let arr: DynamicArray<u32> = DynamicArray::with_count(5);
    /// assert_eq!(&*arr, &[0, 0, 0, 0, 0]);
    /// assert_eq!(arr.capacity(), 8);
    /// ```
    pub fn with_count(count: usize) -> DynamicArray<T> {
        Self::try_with_count(count).or_handle_alloc_error()
    }

    /// The fallible form of [`with_count`](DynamicArray::with_count).
    ///
    /// # Errors
    /// Returns a [`ReserveError`] if the planned capacity overflows or the allocator fails.
    pub fn try_with_count(count: usize) -> Result<DynamicArray<T>, ReserveError> {
        let mut arr = Self::with_planned_capacity(count)?;

        for _ in 0..count {
            // SAFETY: The planned capacity is always greater than count.
            unsafe { arr.push_unchecked(T::default()); }
        }

        Ok(arr)
    }

    /// Resizes the DynamicArray to `new_len`, either filling the new slots with default values or
    /// dropping the elements past `new_len`.
    ///
    /// # Panics
    /// Panics if the memory layout of the DynamicArray would have a size that exceeds
    /// [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use containers_lib::collections::contiguous::DynamicArray;
    /// let mut arr = DynamicArray::from([1, 2]);
    /// arr.resize_with_default(4);
    /// assert_eq!(&*arr, &[1, 2, 0, 0]);
    /// arr.resize_with_default(1);
    /// assert_eq!(&*arr, &[1]);
    /// ```
    pub fn resize_with_default(&mut self, new_len: usize) {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }

        self.reserve(new_len - self.len);
        while self.len < new_len {
            // SAFETY: Capacity for new_len elements has just been reserved.
            unsafe { self.push_unchecked(T::default()); }
        }
    }
}

impl<T: Clone> DynamicArray<T> {
    /// Creates a DynamicArray by cloning each of the provided values in order, with the capacity
    /// planned for their count.
    ///
    /// # Panics
    /// Panics if the memory layout of the DynamicArray would have a size that exceeds
    /// [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use containers_lib::collections::contiguous::DynamicArray;
    /// let arr = DynamicArray::from_slice(&["a", "b", "c"]);
    /// assert_eq!(arr.len(), 3);
    /// assert_eq!(arr[2], "c");
    /// ```
    pub fn from_slice(values: &[T]) -> DynamicArray<T> {
        let mut arr = Self::with_planned_capacity(values.len()).or_handle_alloc_error();

        for value in values {
            // SAFETY: The planned capacity is always greater than the number of values.
            unsafe { arr.push_unchecked(value.clone()); }
        }

        arr
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        // SAFETY: All values less than len are initialized and safe to drop.
        unsafe { ptr::drop_in_place(self.deref_mut() as *mut [T]) }

        // Implicitly drop self.block, which only deallocates the memory.
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The first len slots are initialized. The pointer is nonnull and properly
        // aligned, even when dangling, and the range is entirely contained in the allocation.
        // The borrow checker enforces that self isn't mutated due to this function taking a &self.
        unsafe { slice::from_raw_parts(self.block.as_ptr(), self.len) }
    }
}

impl<T> DerefMut for DynamicArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: The first len slots are initialized. The pointer is nonnull and properly
        // aligned, even when dangling, and the range is entirely contained in the allocation.
        // The borrow checker enforces that self isn't accessed due to this function taking a
        // &mut self.
        unsafe { slice::from_raw_parts_mut(self.block.as_mut_ptr(), self.len) }
    }
}

/// Indexing is bounds checked in every build profile, panicking with the [`IndexOutOfBounds`]
/// message. Use [`try_get`](DynamicArray::try_get) to handle a missing element instead, or the
/// slice's `get_unchecked` to skip the check.
impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &Self::Output {
        self.check_index(index);
        // SAFETY: index has been checked to be less than len, so the value is initialized.
        unsafe { &*self.block.as_ptr().add(index) }
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.check_index(index);
        // SAFETY: index has been checked to be less than len, so the value is initialized.
        unsafe { &mut *self.block.as_mut_ptr().add(index) }
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        self.deref()
    }
}

impl<T> AsMut<[T]> for DynamicArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.deref_mut()
    }
}

impl<T> Borrow<[T]> for DynamicArray<T> {
    fn borrow(&self) -> &[T] {
        self.as_ref()
    }
}

impl<T> BorrowMut<[T]> for DynamicArray<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    /// Clones each element into a new allocation with the same capacity as self.
    fn clone(&self) -> Self {
        let mut arr = DynamicArray {
            block: Block::alloc(self.capacity()),
            len: 0,
        };

        for value in self.iter() {
            // SAFETY: arr has the same capacity as self, which holds len values.
            unsafe { arr.push_unchecked(value.clone()); }
        }

        arr
    }
}

impl<T: Clone> From<&[T]> for DynamicArray<T> {
    fn from(values: &[T]) -> Self {
        Self::from_slice(values)
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(values: [T; N]) -> Self {
        let mut arr = Self::with_planned_capacity(N).or_handle_alloc_error();

        for value in values {
            // SAFETY: The planned capacity is always greater than N.
            unsafe { arr.push_unchecked(value); }
        }

        arr
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: Hash> Hash for DynamicArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicArray")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.capacity())
            .finish()
    }
}
