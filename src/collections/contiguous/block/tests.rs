#![cfg(test)]

use std::ptr::NonNull;

use super::*;
use crate::collections::contiguous::error::{CapacityOverflow, ReserveError};
use crate::util::alloc::ZeroSizedType;
use crate::util::panic::assert_panics;

fn fill(block: &mut Block<usize>, count: usize) {
    for i in 0..count {
        // SAFETY: Tests only fill up to the capacity of the Block.
        unsafe { block.as_mut_ptr().add(i).write(i * 10) };
    }
}

fn read(block: &Block<usize>, count: usize) -> Vec<usize> {
    (0..count)
        // SAFETY: Tests only read slots which have been filled.
        .map(|i| unsafe { block.as_ptr().add(i).read() })
        .collect()
}

#[test]
fn test_dangling() {
    let block = Block::<u64>::dangling();
    assert_eq!(block.capacity(), 0);
    assert_eq!(block.ptr, NonNull::dangling(), "An empty Block shouldn't allocate.");

    let block = Block::<u64>::alloc(0);
    assert_eq!(
        block.ptr,
        NonNull::dangling(),
        "Allocating zero slots should produce a dangling pointer."
    );
    assert_eq!(Block::<u64>::default().capacity(), 0);
}

#[test]
fn test_zst_support() {
    let mut block = Block::<ZeroSizedType>::alloc(16);
    assert_eq!(block.capacity(), 16, "ZSTs should still track capacity.");
    assert_eq!(block.ptr, NonNull::dangling(), "ZSTs should never allocate.");

    block.relocate(16, 64);
    assert_eq!(block.capacity(), 64);
    assert_eq!(
        block.ptr,
        NonNull::dangling(),
        "Pointer shouldn't change when relocated for a ZST."
    );
}

#[test]
fn test_relocate_preserves_contents() {
    let mut block = Block::<usize>::alloc(4);
    fill(&mut block, 4);

    block.relocate(4, 8);
    assert_eq!(block.capacity(), 8);
    assert_eq!(
        read(&block, 4),
        [0, 10, 20, 30],
        "All live slots should be moved into the new allocation in order."
    );

    block.relocate(2, 2);
    assert_eq!(block.capacity(), 2, "Relocation can also shrink the Block.");
    assert_eq!(read(&block, 2), [0, 10]);

    let old_ptr = block.ptr;
    block.relocate(2, 2);
    assert_eq!(
        block.ptr, old_ptr,
        "Relocating to the same capacity shouldn't reallocate."
    );
}

#[test]
fn test_failed_relocate_is_atomic() {
    let mut block = Block::<usize>::alloc(4);
    fill(&mut block, 4);
    let old_ptr = block.ptr;

    assert_eq!(
        block.try_relocate(4, usize::MAX),
        Err(ReserveError::CapacityOverflow(CapacityOverflow))
    );
    assert_eq!(block.ptr, old_ptr, "A failed relocation should keep the old allocation.");
    assert_eq!(block.capacity(), 4);
    assert_eq!(read(&block, 4), [0, 10, 20, 30], "A failed relocation shouldn't touch contents.");

    assert_panics!({
        block.relocate(5, 8);
    }, "cannot relocate");
}

#[test]
fn test_capacity_overflow() {
    assert_eq!(
        Block::<u64>::try_alloc(isize::MAX as usize / 8 + 1).map(|b| b.capacity()),
        Err(ReserveError::CapacityOverflow(CapacityOverflow)),
        "Layouts larger than isize::MAX bytes should be rejected."
    );
    assert_panics!({
        Block::<u64>::alloc(usize::MAX);
    }, "capacity overflow");
}

#[test]
fn test_take() {
    let mut block = Block::<usize>::alloc(4);
    fill(&mut block, 3);
    let old_ptr = block.ptr;

    let taken = block.take();
    assert_eq!(taken.ptr, old_ptr, "Taking should transfer the allocation.");
    assert_eq!(taken.capacity(), 4);
    assert_eq!(read(&taken, 3), [0, 10, 20]);

    assert_eq!(block.capacity(), 0, "The source should be left empty.");
    assert_eq!(block.ptr, NonNull::dangling());
}
