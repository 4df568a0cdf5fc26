
pub(crate) mod allocation;

use std::{mem::{self, MaybeUninit}, ops::{Index, IndexMut}, ptr::NonNull, slice};

use crate::errors::AllocErr;
use allocation::{allocate, deallocate, infallible};


/// A raw allocation handed out by [`ScopedArray::release`]: the base pointer
/// and the number of `T` slots it was allocated with.
pub type RawParts<T> = (NonNull<T>, usize);

/// Sole owner of a contiguous heap allocation of `T` slots.
///
/// A `ScopedArray` only owns *memory*. It never reads, drops or otherwise
/// interprets the slots, so whoever writes into them is responsible for
/// tracking which ones are initialized. Dropping the array frees the memory
/// without dropping any element.
///
/// The type is move-only; ownership moves between arrays with
/// [`release`](Self::release), [`reset`](Self::reset) and [`swap`](Self::swap).
///
/// # Examples
///
/// ```
/// use arraylist::ScopedArray;
///
/// let mut a = ScopedArray::<u32>::with_capacity(4);
/// let mut b = ScopedArray::<u32>::new();
/// assert!(a.is_non_null());
/// assert!(!b.is_non_null());
///
/// a[0].write(7);
/// a.swap(&mut b);
///
/// assert_eq!(a.capacity(), 0);
/// assert_eq!(unsafe { b[0].assume_init() }, 7);
/// ```
pub struct ScopedArray<T> {
    ptr: Option<NonNull<T>>,
    capacity: usize,
}

unsafe impl<T: Send> Send for ScopedArray<T> {}
unsafe impl<T: Sync> Sync for ScopedArray<T> {}

impl<T> Drop for ScopedArray<T> {
    fn drop(&mut self) {
        if let Some((ptr, capacity)) = self.release() {
            unsafe { deallocate(ptr, capacity) }
        }
    }
}

impl<T> Default for ScopedArray<T> {
    #[inline]
    fn default() -> Self { Self::new() }
}

impl<T> Index<usize> for ScopedArray<T> {
    type Output = MaybeUninit<T>;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output { &self.as_uninit_slice()[index] }
}

impl<T> IndexMut<usize> for ScopedArray<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.as_uninit_mut_slice()[index]
    }
}

#[cfg(not(tarpaulin_include))]
impl<T> std::fmt::Debug for ScopedArray<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedArray")
            .field("ptr", &self.ptr)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<T> ScopedArray<T> {

    /// Creates an array that owns nothing.
    #[inline]
    pub const fn new() -> Self {
        Self { ptr: None, capacity: 0 }
    }

    /// Allocates `capacity` uninitialized slots.
    ///
    /// A capacity of zero allocates nothing and yields the same state as
    /// [`new`](Self::new).
    ///
    /// # Panics
    ///
    /// Panics if the byte size overflows, and aborts through
    /// [`handle_alloc_error`](std::alloc::handle_alloc_error) if the allocator
    /// fails. See [`try_with_capacity`](Self::try_with_capacity) for a
    /// fallible version.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        infallible(Self::try_with_capacity(capacity))
    }

    /// Allocates `capacity` uninitialized slots, reporting failure instead of
    /// panicking.
    ///
    /// ```
    /// use arraylist::ScopedArray;
    ///
    /// assert!(ScopedArray::<u64>::try_with_capacity(8).is_ok());
    /// assert!(ScopedArray::<u64>::try_with_capacity(usize::MAX).is_err());
    /// ```
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocErr> {
        if capacity == 0 { return Ok(Self::new()) }
        let ptr = allocate::<T>(capacity)?;
        Ok(Self { ptr: Some(ptr), capacity })
    }

    /// Takes ownership of an existing allocation.
    ///
    /// # Safety
    ///
    /// `ptr` must have been obtained from [`release`](Self::release) (or
    /// [`into_raw_parts`](Self::into_raw_parts)) of a `ScopedArray<T>` with the
    /// same `capacity`, and nothing else may own it. `capacity` must be
    /// nonzero.
    #[inline]
    pub unsafe fn from_raw_parts(ptr: NonNull<T>, capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self { ptr: Some(ptr), capacity }
    }

    /// Gives up the allocation without freeing it.
    #[inline]
    pub fn into_raw_parts(mut self) -> Option<RawParts<T>> { self.release() }

    /// Number of slots in the owned allocation, zero when nothing is owned.
    #[inline(always)]
    pub const fn capacity(&self) -> usize { self.capacity }

    /// Returns `true` while the array owns an allocation.
    #[inline(always)]
    pub const fn is_non_null(&self) -> bool { self.ptr.is_some() }

    /// Raw pointer to the first slot. Dangling (but aligned) when nothing is
    /// owned.
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        match self.ptr {
            Some(ptr) => ptr.as_ptr().cast_const(),
            None => NonNull::<T>::dangling().as_ptr().cast_const(),
        }
    }

    /// Mutable raw pointer to the first slot. Dangling (but aligned) when
    /// nothing is owned.
    #[inline]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        match self.ptr {
            Some(ptr) => ptr.as_ptr(),
            None => NonNull::<T>::dangling().as_ptr(),
        }
    }

    /// Every slot of the allocation, initialized or not.
    #[inline]
    pub fn as_uninit_slice(&self) -> &[MaybeUninit<T>] {
        unsafe { slice::from_raw_parts(self.as_ptr().cast(), self.capacity) }
    }

    /// Every slot of the allocation, mutably.
    #[inline]
    pub fn as_uninit_mut_slice(&mut self) -> &mut [MaybeUninit<T>] {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr().cast(), self.capacity) }
    }

    /// Relinquishes ownership of the allocation and returns it without
    /// freeing it. The array is left empty.
    ///
    /// ```
    /// use arraylist::ScopedArray;
    ///
    /// let mut a = ScopedArray::<u8>::with_capacity(3);
    /// let parts = a.release().unwrap();
    /// assert!(!a.is_non_null());
    ///
    /// // Hand the memory back so it gets freed.
    /// let b = unsafe { ScopedArray::from_raw_parts(parts.0, parts.1) };
    /// assert_eq!(b.capacity(), 3);
    /// ```
    #[inline]
    pub fn release(&mut self) -> Option<RawParts<T>> {
        let capacity = mem::replace(&mut self.capacity, 0);
        self.ptr.take().map(|ptr| (ptr, capacity))
    }

    /// Frees the current allocation, if any, and takes ownership of `parts`.
    /// Passing `None` simply frees the current allocation.
    ///
    /// Resetting to the allocation the array already owns frees nothing and
    /// only adopts the capacity of `parts`.
    ///
    /// # Safety
    ///
    /// `parts` must satisfy the contract of [`from_raw_parts`](Self::from_raw_parts).
    pub unsafe fn reset(&mut self, parts: Option<RawParts<T>>) {
        // Zero-sized allocations all share the dangling pointer, so the same
        // pointer may come back with a different capacity.
        if let Some((ptr, capacity)) = parts {
            if self.ptr == Some(ptr) {
                self.capacity = capacity;
                return
            }
        }

        if let Some((ptr, capacity)) = self.release() {
            unsafe { deallocate(ptr, capacity) }
        }
        if let Some((ptr, capacity)) = parts {
            debug_assert!(capacity > 0);
            self.ptr = Some(ptr);
            self.capacity = capacity;
        }
    }

    /// Exchanges the allocations owned by `self` and `other`.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }
}
