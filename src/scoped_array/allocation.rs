use std::{alloc::{self, Layout, alloc}, mem, ptr::NonNull};

use crate::errors::AllocErr;

#[inline]
pub(crate) fn infallible<T>(result: Result<T, AllocErr>) -> T {
    match result {
        Ok(x) => x,
        Err(AllocErr::Layout) => panic!("invalid parameters to Layout::from_size_align"),
        Err(AllocErr::Overflow) => panic!("capacity overflow"),
        Err(AllocErr::Alloc { layout }) => alloc::handle_alloc_error(layout),
    }
}

#[inline]
pub(super) fn layout_array<T>(n: usize) -> Result<Layout, AllocErr> {

    let size = mem::size_of::<T>()
        .checked_mul(n)
        .ok_or(AllocErr::Overflow)?;

    let align = mem::align_of::<T>();

    Layout::from_size_align(size, align).map_err(AllocErr::layout)
}

/// Allocates room for `n` uninitialized `T`s.
///
/// Zero-sized requests never reach the allocator and hand back a dangling,
/// well-aligned pointer instead.
pub(super) fn allocate<T>(n: usize) -> Result<NonNull<T>, AllocErr> {
    let layout = layout_array::<T>(n)?;
    if layout.size() == 0 { return Ok(NonNull::dangling()) }

    NonNull::new(unsafe { alloc(layout) })
        .map(NonNull::cast)
        .ok_or(AllocErr::alloc(layout))
}

/// # Safety
///
/// `ptr` must come from [`allocate`] with the same `n`, and must not be used
/// afterwards.
pub(super) unsafe fn deallocate<T>(ptr: NonNull<T>, n: usize) {
    // The layout was valid when the block was allocated, so it still is.
    let Ok(layout) = layout_array::<T>(n) else { return };
    if layout.size() == 0 { return }

    unsafe { alloc::dealloc(ptr.as_ptr().cast(), layout) };
}
