
use std::{fmt, mem::{self, ManuallyDrop}, ops::{Deref, DerefMut, Index, IndexMut}, ptr, slice::{self, SliceIndex}};

use crate::{
    errors::{AllocErr, OutOfRange},
    scoped_array::{ScopedArray, allocation::infallible},
};

/// A contiguous growable array backed by a single [`ScopedArray`].
///
/// Capacity starts at zero and doubles (`0 → 1 → 2 → 4 …`) whenever an
/// insertion finds the list full. Removing elements never gives memory back;
/// only [`clear`](Self::clear) does.
///
/// # Examples
///
/// ```
/// use arraylist::ArrayList;
///
/// let mut list = ArrayList::new();
/// list.add(10);
/// list.add(20);
/// list.insert(1, 15).unwrap();
/// assert_eq!(list, [10, 15, 20]);
///
/// assert_eq!(list.remove(0), Ok(10));
/// assert_eq!(list, [15, 20]);
/// assert_eq!(list.len(), 2);
/// ```
///
/// # Indexing
///
/// The checked accessors [`get`](Self::get), [`set`](Self::set),
/// [`insert`](Self::insert) and [`remove`](Self::remove) return an
/// [`OutOfRange`] error for a bad index and leave the list untouched.
///
/// ```
/// use arraylist::{ArrayList, OutOfRange};
///
/// let mut list = ArrayList::from([1, 2, 3]);
/// assert_eq!(list.get(3), Err(OutOfRange { index: 3, len: 3 }));
/// assert_eq!(list.insert(4, 0), Err(OutOfRange { index: 4, len: 3 }));
/// assert_eq!(list, [1, 2, 3]);
/// ```
///
/// Plain indexing goes through the slice and panics instead.
/// ```should_panic
/// use arraylist::ArrayList;
///
/// let list = ArrayList::from([1, 2, 3]);
/// println!("{}", list[3]); // Panics!
/// ```
///
/// # Capacity
///
/// Only the `len` first slots of the buffer hold elements. Bounds are always
/// checked against [`len`](Self::len), never against
/// [`capacity`](Self::capacity).
///
/// ```
/// use arraylist::ArrayList;
///
/// let mut list = ArrayList::new();
/// assert_eq!(list.capacity(), 0);
/// assert_eq!(list.add('a'), 1);
/// assert_eq!(list.add('b'), 2);
/// assert_eq!(list.add('c'), 4);
///
/// list.remove(0).unwrap();
/// assert_eq!(list.capacity(), 4);
///
/// list.clear();
/// assert_eq!(list.capacity(), 0);
/// ```
pub struct ArrayList<T> {
    buf: ScopedArray<T>,
    len: usize,
}

impl<T: PartialEq> PartialEq for ArrayList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len &&
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for ArrayList<T> {}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for ArrayList<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<&[T; N]> for ArrayList<T> {
    fn eq(&self, other: &&[T; N]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq> PartialEq<[T]> for ArrayList<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq> PartialEq<&[T]> for ArrayList<T> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for ArrayList<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Clone> Clone for ArrayList<T> {

    /// Deep copy with the same capacity as `self`.
    fn clone(&self) -> Self {
        let mut list = Self {
            buf: ScopedArray::with_capacity(self.capacity()),
            len: 0,
        };

        // `len` trails the writes so a panicking `T::clone` drops only what
        // was actually written.
        for value in self.as_slice() {
            unsafe { list.buf.as_mut_ptr().add(list.len).write(value.clone()) };
            list.len += 1;
        }
        list
    }

    /// Copy-and-swap: the old contents of `self` are dropped only once the
    /// copy has fully succeeded.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T> Default for ArrayList<T> {
    #[inline]
    fn default() -> Self { Self::new() }
}

impl<T> Drop for ArrayList<T> {
    fn drop(&mut self) {
        // The buffer frees its memory afterwards.
        unsafe { ptr::drop_in_place(self.as_mut_slice()) }
    }
}

impl<T> Deref for ArrayList<T> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &Self::Target { self.as_slice() }
}

impl<T> DerefMut for ArrayList<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target { self.as_mut_slice() }
}

impl<T, I: SliceIndex<[T]>> Index<I> for ArrayList<T> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(&**self, index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for ArrayList<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(&mut **self, index)
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T, const N: usize> From<[T; N]> for ArrayList<T> {

    /// Creates a list holding the array's elements, with a capacity of `N`.
    ///
    /// ```
    /// use arraylist::ArrayList;
    ///
    /// let list = ArrayList::from([1, 2, 3]);
    /// assert_eq!(list.capacity(), 3);
    /// ```
    fn from(arr: [T; N]) -> Self {
        let arr = ManuallyDrop::new(arr);
        let mut list = Self { buf: ScopedArray::with_capacity(N), len: N };

        unsafe { ptr::copy_nonoverlapping(
            arr.as_ptr(),
            list.buf.as_mut_ptr(),
            N
        )}
        list
    }
}

impl<T> From<Vec<T>> for ArrayList<T> {

    /// Creates a list holding the vec's elements, with a capacity equal to
    /// the vec's length.
    fn from(vec: Vec<T>) -> Self {
        let mut list = Self { buf: ScopedArray::with_capacity(vec.len()), len: 0 };

        vec.into_iter().for_each(|value| {
            unsafe { list.buf.as_mut_ptr().add(list.len).write(value) };
            list.len += 1;
        });
        list
    }
}

impl<T> From<ArrayList<T>> for Vec<T> {
    fn from(mut list: ArrayList<T>) -> Self {
        let len = mem::replace(&mut list.len, 0);
        let mut vec = Vec::with_capacity(len);

        // `list` now holds no elements, so dropping it only frees the buffer.
        unsafe {
            ptr::copy_nonoverlapping(list.buf.as_ptr(), vec.as_mut_ptr(), len);
            vec.set_len(len);
        }
        vec
    }
}

impl<T> ArrayList<T> {

    /// Constructs a new, empty `ArrayList<T>`.
    ///
    /// Nothing is allocated until the first element is added.
    #[inline]
    pub const fn new() -> Self {
        Self { buf: ScopedArray::new(), len: 0 }
    }

    /// Creates a list of `count` clones of `value`, with a capacity of
    /// exactly `count`.
    ///
    /// ```
    /// use arraylist::ArrayList;
    ///
    /// let list = ArrayList::with_len(3, "x");
    /// assert_eq!(list, ["x", "x", "x"]);
    /// assert_eq!(list.capacity(), 3);
    /// ```
    pub fn with_len(count: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut list = Self { buf: ScopedArray::with_capacity(count), len: 0 };
        if count == 0 { return list }

        for _ in 1..count {
            unsafe { list.buf.as_mut_ptr().add(list.len).write(value.clone()) };
            list.len += 1;
        }
        unsafe { list.buf.as_mut_ptr().add(list.len).write(value) };
        list.len += 1;

        list
    }

    /// Number of elements in the list.
    #[inline(always)]
    pub const fn len(&self) -> usize { self.len }

    /// Returns `true` if the list holds no elements.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool { self.len == 0 }

    /// Number of slots allocated, always at least [`len`](Self::len).
    #[inline(always)]
    pub const fn capacity(&self) -> usize { self.buf.capacity() }

    #[inline]
    fn check_index(&self, index: usize) -> Result<(), OutOfRange> {
        match index < self.len {
            true => Ok(()),
            false => Err(OutOfRange::new(index, self.len)),
        }
    }

    /// Doubles the capacity, or allocates a single slot if nothing is
    /// allocated yet.
    #[cold]
    fn grow(&mut self) {
        infallible(self.try_grow());
    }

    fn try_grow(&mut self) -> Result<(), AllocErr> {
        let new_cap = match self.capacity() {
            0 => 1,
            cap => cap.checked_mul(2).ok_or(AllocErr::Overflow)?,
        };

        let mut grown = ScopedArray::<T>::try_with_capacity(new_cap)?;
        debug_assert!(new_cap > self.len);

        // Bitwise move: the old slots are left logically uninitialized and
        // the old buffer only frees its memory.
        unsafe {
            ptr::copy_nonoverlapping(self.buf.as_ptr(), grown.as_mut_ptr(), self.len);
            self.buf.reset(grown.release());
        }

        Ok(())
    }

    /// Appends an element to the back of the list and returns the capacity
    /// afterwards.
    ///
    /// Equivalent to `insert(list.len(), value)`, but cannot fail.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `usize`.
    ///
    /// # Time Complexity
    ///
    /// Amortized *O*(1).
    #[inline]
    pub fn add(&mut self, value: T) -> usize {
        if self.len == self.capacity() { self.grow() }

        unsafe { self.buf.as_mut_ptr().add(self.len).write(value) };
        self.len += 1;
        self.capacity()
    }

    /// Inserts an element at position `index`, shifting all elements after
    /// it to the right, and returns the capacity afterwards.
    ///
    /// `index == len` appends.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if `index > len`; the list is left unchanged
    /// and `value` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use arraylist::ArrayList;
    ///
    /// let mut list = ArrayList::from([1, 3]);
    /// assert_eq!(list.insert(1, 2), Ok(4));
    /// assert_eq!(list, [1, 2, 3]);
    ///
    /// assert!(list.insert(5, 0).is_err());
    /// ```
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(`len - index`) time, plus a reallocation when full.
    pub fn insert(&mut self, index: usize, value: T) -> Result<usize, OutOfRange> {
        if index > self.len { return Err(OutOfRange::new(index, self.len)) }
        if self.len == self.capacity() { self.grow() }

        unsafe {
            let ptr = self.buf.as_mut_ptr().add(index);
            ptr::copy(ptr, ptr.add(1), self.len - index);
            ptr::write(ptr, value);
        }
        self.len += 1;
        Ok(self.capacity())
    }

    /// Removes and returns the element at position `index`, shifting all
    /// elements after it to the left.
    ///
    /// The capacity is left as is.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use arraylist::ArrayList;
    ///
    /// let mut list = ArrayList::from([1, 2, 3]);
    /// assert_eq!(list.remove(1), Ok(2));
    /// assert_eq!(list, [1, 3]);
    /// assert!(list.remove(2).is_err());
    /// ```
    pub fn remove(&mut self, index: usize) -> Result<T, OutOfRange> {
        self.check_index(index)?;
        self.len -= 1;
        unsafe {
            let ptr = self.buf.as_mut_ptr().add(index);
            let removed = ptr::read(ptr);
            ptr::copy(ptr.add(1), ptr, self.len - index);
            Ok(removed)
        }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if `index >= len`, even when the slot is
    /// allocated.
    #[inline]
    pub fn get(&self, index: usize) -> Result<&T, OutOfRange> {
        self.check_index(index)?;
        Ok(unsafe { self.get_unchecked(index) })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if `index >= len`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        self.check_index(index)?;
        Ok(unsafe { self.get_unchecked_mut(index) })
    }

    /// Overwrites the element at `index`, dropping the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if `index >= len`; the list is left unchanged.
    ///
    /// ```
    /// use arraylist::ArrayList;
    ///
    /// let mut list = ArrayList::from(["a", "b"]);
    /// list.set(1, "c").unwrap();
    /// assert_eq!(list, ["a", "c"]);
    /// assert!(list.set(2, "d").is_err());
    /// ```
    #[inline]
    pub fn set(&mut self, index: usize, value: T) -> Result<(), OutOfRange> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Returns a reference to the element at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// Calling this with `index >= len` is [undefined behavior](<https://doc.rust-lang.org/reference/behavior-considered-undefined.html>).
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        unsafe { &*self.buf.as_ptr().add(index) }
    }

    /// Returns a mutable reference to the element at `index` without bounds
    /// checking.
    ///
    /// # Safety
    ///
    /// Calling this with `index >= len` is [undefined behavior](<https://doc.rust-lang.org/reference/behavior-considered-undefined.html>).
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        unsafe { &mut *self.buf.as_mut_ptr().add(index) }
    }

    /// Drops every element and frees the buffer, leaving both length and
    /// capacity at zero.
    ///
    /// The list stays usable and grows again from scratch.
    pub fn clear(&mut self) {
        let elements: *mut [T] = self.as_mut_slice();
        self.len = 0;
        unsafe {
            ptr::drop_in_place(elements);
            self.buf.reset(None);
        }
    }

    /// Exchanges the contents of two lists without allocating.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        self.buf.swap(&mut other.buf);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Moves the contents out, leaving `self` empty with no capacity.
    ///
    /// ```
    /// use arraylist::ArrayList;
    ///
    /// let mut src = ArrayList::from([1, 2]);
    /// let dst = src.take();
    ///
    /// assert_eq!(dst, [1, 2]);
    /// assert!(src.is_empty());
    /// assert_eq!(src.capacity(), 0);
    /// ```
    #[inline]
    pub fn take(&mut self) -> Self { mem::replace(self, Self::new()) }

    /// Replaces the contents of `self` with those of `source`, leaving
    /// `source` empty with no capacity. The previous contents of `self` are
    /// dropped.
    pub fn move_from(&mut self, source: &mut Self) {
        self.swap(source);
        source.clear();
    }

    /// Extracts a slice of the list's elements.
    ///
    /// Equivalent to `&list[..]`.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // `len` tracks the initialized prefix of the buffer.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// Extracts a mutable slice of the list's elements.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr(), self.len) }
    }
}
