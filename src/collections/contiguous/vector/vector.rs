use std::borrow::{Borrow, BorrowMut};
use std::cmp;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem::{self, MaybeUninit};
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};
use std::slice;

use crate::collections::contiguous::Array;
use crate::util::error::{CapacityOverflow, EmptyCollection, IndexOutOfBounds, TryReserveError};
use crate::util::result::ResultExtension;

const GROWTH_FACTOR: usize = 2;

/// A variable size contiguous collection, based on [`Array<T>`].
///
/// The Vector owns a single buffer of `cap` slots, the first `len` of which are initialized. When
/// the buffer is full, a new one is built (at least [`GROWTH_FACTOR`] times larger) and the
/// elements are moved across before the old buffer is released. If the new buffer can't be
/// allocated, the Vector is left exactly as it was.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Vector.
///
/// | Method | Complexity |
/// |-|-|
/// | `at` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `push_unchecked` | `O(1)` |
/// | `pop` | `O(1)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `resize` | `O(n)` |
/// | `shrink_to_fit` | `O(n)` |
/// | `swap` | `O(1)` |
///
/// \* If the Vector doesn't have enough capacity for the new element, `push` will take `O(n)`.
///
/// \** If the Vector already has the requested capacity, `reserve` is `O(1)`.
pub struct Vector<T> {
    pub(crate) arr: Array<MaybeUninit<T>>,
    pub(crate) len: usize,
}

impl<T> Vector<T> {
    /// Creates a new Vector with length and capacity 0. Memory will be allocated when the capacity
    /// changes.
    ///
    /// # Examples
    /// ```
    /// # use containers::collections::contiguous::Vector;
    /// let vec: Vector<u8> = Vector::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.cap(), 0);
    /// ```
    pub const fn new() -> Vector<T> {
        Vector {
            arr: Array::new(),
            len: 0,
        }
    }

    /// Creates a new, empty Vector with capacity exactly equal to `cap`.
    ///
    /// # Errors
    /// Returns a [`TryReserveError`] if the buffer can't be allocated.
    pub fn try_with_cap(cap: usize) -> Result<Vector<T>, TryReserveError> {
        Ok(Vector {
            arr: Array::try_new_uninit(cap)?,
            len: 0,
        })
    }

    /// Creates a new, empty Vector with capacity exactly equal to `cap`, allowing values to be
    /// added without reallocation.
    ///
    /// # Panics
    /// Panics if the buffer can't be allocated.
    ///
    /// # Examples
    /// ```
    /// # use containers::collections::contiguous::Vector;
    /// let mut vec: Vector<u8> = Vector::with_cap(5);
    /// assert_eq!(vec.cap(), 5);
    /// vec.extend([1_u8, 2, 3, 4, 5]);
    /// assert_eq!(vec.cap(), 5);
    /// ```
    pub fn with_cap(cap: usize) -> Vector<T> {
        Self::try_with_cap(cap).throw()
    }

    /// Returns the length of the Vector.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Vector contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity of the Vector. The capacity is exactly the value chosen by the
    /// most recent capacity change, see [`reserve`](Vector::reserve) for the growth policy.
    pub const fn cap(&self) -> usize {
        self.arr.size()
    }

    /// Returns a pointer to the underlying buffer, or [`None`] if the Vector has capacity 0.
    pub fn data(&self) -> Option<NonNull<T>> {
        self.arr.data().map(NonNull::cast)
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        let len = self.len;
        self.get(index).ok_or(IndexOutOfBounds { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        let len = self.len;
        self.get_mut(index).ok_or(IndexOutOfBounds { index, len })
    }

    /// Push the provided value onto the end of the Vector, growing the buffer if required.
    ///
    /// # Errors
    /// Returns a [`TryReserveError`] if the buffer needed to grow and couldn't. In that case
    /// `value` is dropped and the Vector is unchanged.
    pub fn try_push(&mut self, value: T) -> Result<(), TryReserveError> {
        let required = self.len.checked_add(1).ok_or(CapacityOverflow)?;
        self.try_reserve(required)?;

        // SAFETY: The capacity has just been adjusted to support the addition of the new item.
        unsafe { self.push_unchecked(value) }
        Ok(())
    }

    /// Push the provided value onto the end of the Vector, increasing the capacity if required.
    ///
    /// # Panics
    /// Panics if the buffer needed to grow and couldn't.
    ///
    /// # Examples
    /// ```
    /// # use containers::collections::contiguous::Vector;
    /// let mut vec = Vector::<u8>::new();
    /// for i in 0..=5 {
    ///     vec.push(i);
    /// }
    /// assert_eq!(&*vec, &[0, 1, 2, 3, 4, 5]);
    /// assert_eq!(vec.cap(), 8);
    /// ```
    #[doc(alias = "push_back")]
    pub fn push(&mut self, value: T) {
        self.try_push(value).throw()
    }

    /// Push the provided value onto the end of the Vector, assuming that there is enough capacity
    /// to do so.
    ///
    /// # Safety
    /// It is up to the caller to ensure that `len < cap`, using methods like
    /// [`reserve`](Vector::reserve) or [`with_cap`](Vector::with_cap). Using this method on a
    /// Vector without enough capacity is undefined behavior.
    pub unsafe fn push_unchecked(&mut self, value: T) {
        // SAFETY: It is up to the caller to ensure that the Vector has enough capacity for this
        // push, leading to the pointer write being in bounds of the buffer.
        unsafe { self.arr.ptr.add(self.len).write(MaybeUninit::new(value)) };
        self.len += 1;
    }

    /// Removes the last value from the Vector and returns it. The buffer itself isn't touched, so
    /// the capacity stays the same.
    ///
    /// # Errors
    /// Returns [`EmptyCollection`] if the Vector has no elements.
    ///
    /// # Examples
    /// ```
    /// # use containers::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = (0..3).collect();
    /// assert_eq!(vec.pop(), Ok(2));
    /// assert_eq!(vec.pop(), Ok(1));
    /// assert_eq!(vec.pop(), Ok(0));
    /// assert!(vec.pop().is_err());
    /// ```
    #[doc(alias = "pop_back")]
    pub fn pop(&mut self) -> Result<T, EmptyCollection> {
        if self.len == 0 {
            return Err(EmptyCollection);
        }

        self.len -= 1;

        // SAFETY: len has just been decremented and the old last element is initialized. Reading
        // it moves it out of the buffer, the slot is considered uninitialized from now on because
        // it is >= len.
        Ok(unsafe { self.arr.ptr.add(self.len).read().assume_init() })
    }

    /// Ensures that the capacity of the Vector is at least `desired_cap`.
    ///
    /// Does nothing if the capacity is already large enough. Otherwise the new capacity is the
    /// larger of `desired_cap` and double the current capacity.
    ///
    /// # Errors
    /// Returns a [`TryReserveError`] if the new buffer can't be allocated, in which case the Vector
    /// is left exactly as it was.
    pub fn try_reserve(&mut self, desired_cap: usize) -> Result<(), TryReserveError> {
        if desired_cap <= self.cap() {
            return Ok(());
        }

        let doubled = self.cap().saturating_mul(GROWTH_FACTOR);
        self.rebuild(cmp::max(desired_cap, doubled))
    }

    /// Ensures that the capacity of the Vector is at least `desired_cap`.
    ///
    /// # Panics
    /// Panics if the new buffer can't be allocated.
    ///
    /// # Examples
    /// ```
    /// # use containers::collections::contiguous::Vector;
    /// let mut vec: Vector<u8> = Vector::with_cap(4);
    /// vec.reserve(5);
    /// assert_eq!(vec.cap(), 8);
    /// vec.reserve(20);
    /// assert_eq!(vec.cap(), 20);
    /// vec.reserve(3);
    /// assert_eq!(vec.cap(), 20);
    /// ```
    pub fn reserve(&mut self, desired_cap: usize) {
        self.try_reserve(desired_cap).throw()
    }

    /// Shortens the Vector to `new_len`, dropping the removed elements. Does nothing if the Vector
    /// is already short enough. The capacity is unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }

        let old_len = mem::replace(&mut self.len, new_len);

        // SAFETY: The elements in new_len..old_len are initialized and, since len has already
        // been updated, no longer reachable through self.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.arr.ptr.add(new_len).as_ptr().cast::<T>(),
                old_len - new_len,
            ));
        }
    }

    /// Drops every element, leaving the capacity unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Rebuilds the buffer with capacity exactly equal to the length.
    ///
    /// # Errors
    /// Returns a [`TryReserveError`] if the new buffer can't be allocated, in which case the Vector
    /// is left exactly as it was.
    pub fn try_shrink_to_fit(&mut self) -> Result<(), TryReserveError> {
        if self.len == self.cap() {
            return Ok(());
        }

        self.rebuild(self.len)
    }

    /// Rebuilds the buffer with capacity exactly equal to the length.
    ///
    /// # Panics
    /// Panics if the new buffer can't be allocated.
    pub fn shrink_to_fit(&mut self) {
        self.try_shrink_to_fit().throw()
    }

    /// Exchanges the contents of two Vectors. Never allocates and never fails.
    pub fn swap(&mut self, other: &mut Vector<T>) {
        self.arr.swap(&mut other.arr);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Moves every element into a freshly allocated buffer of `new_cap` slots and releases the old
    /// one. Nothing changes if the allocation fails.
    ///
    /// `new_cap` must be at least `len`.
    pub(crate) fn rebuild(&mut self, new_cap: usize) -> Result<(), TryReserveError> {
        debug_assert!(new_cap >= self.len);

        let mut buffer = Array::<T>::try_new_uninit(new_cap)?;

        // SAFETY: Both buffers are valid for at least len elements and are separate allocations.
        // The old buffer only holds MaybeUninit values, so the moved-from copies are never dropped.
        unsafe {
            ptr::copy_nonoverlapping(self.arr.ptr.as_ptr(), buffer.ptr.as_ptr(), self.len);
        }

        tracing::trace!(old_cap = self.cap(), new_cap, len = self.len, "rebuilt vector buffer");
        self.arr.swap(&mut buffer);
        Ok(())
    }
}

impl<T: Default> Vector<T> {
    /// Creates a Vector with both length and capacity equal to `len`, filled with the default
    /// value of `T`.
    ///
    /// # Errors
    /// Returns a [`TryReserveError`] if the buffer can't be allocated.
    pub fn try_with_len(len: usize) -> Result<Vector<T>, TryReserveError> {
        let mut vec = Self::try_with_cap(len)?;
        vec.try_resize(len)?;
        Ok(vec)
    }

    /// Creates a Vector with both length and capacity equal to `len`, filled with the default
    /// value of `T`.
    ///
    /// # Panics
    /// Panics if the buffer can't be allocated.
    pub fn with_len(len: usize) -> Vector<T> {
        Self::try_with_len(len).throw()
    }

    /// Sets the length of the Vector to `new_len`. Reserves `new_len` first (following the usual
    /// growth policy), then either default-constructs the newly exposed elements or drops the
    /// elements past the end. Shrinking never reduces the capacity.
    ///
    /// # Errors
    /// Returns a [`TryReserveError`] if the buffer needed to grow and couldn't, in which case the
    /// Vector is left exactly as it was.
    pub fn try_resize(&mut self, new_len: usize) -> Result<(), TryReserveError> {
        self.try_reserve(new_len)?;

        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }

        while self.len < new_len {
            // SAFETY: The capacity has been reserved for new_len elements above.
            unsafe { self.push_unchecked(T::default()) }
        }
        Ok(())
    }

    /// Sets the length of the Vector to `new_len`.
    ///
    /// # Panics
    /// Panics if the buffer needed to grow and couldn't.
    ///
    /// # Examples
    /// ```
    /// # use containers::collections::contiguous::Vector;
    /// let mut vec: Vector<u8> = [1, 2, 3].into_iter().collect();
    /// vec.resize(5);
    /// assert_eq!(&*vec, &[1, 2, 3, 0, 0]);
    /// vec.resize(1);
    /// assert_eq!(&*vec, &[1]);
    /// assert_eq!(vec.cap(), 6);
    /// ```
    pub fn resize(&mut self, new_len: usize) {
        self.try_resize(new_len).throw()
    }
}

impl<T: Clone> Vector<T> {
    /// Creates an independent copy of self with the same capacity.
    ///
    /// # Errors
    /// Returns a [`TryReserveError`] if the buffer can't be allocated.
    pub fn try_clone(&self) -> Result<Vector<T>, TryReserveError> {
        let mut vec = Self::try_with_cap(self.cap())?;

        for value in self.iter() {
            // SAFETY: vec has the same capacity as self, so it can hold all of self's elements.
            unsafe { vec.push_unchecked(value.clone()) }
        }

        Ok(vec)
    }

    /// Replaces the contents of self with a copy of `source`. The copy is built before anything in
    /// self is touched, so a failed allocation leaves self unchanged.
    ///
    /// # Errors
    /// Returns a [`TryReserveError`] if the buffer can't be allocated.
    pub fn try_clone_from(&mut self, source: &Vector<T>) -> Result<(), TryReserveError> {
        let mut copy = source.try_clone()?;
        self.swap(&mut copy);
        Ok(())
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<A: IntoIterator<Item = T>>(&mut self, iter: A) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let iter = value.into_iter();
        let mut vec = Vector::with_cap(iter.size_hint().0);

        for item in iter {
            vec.push(item);
        }

        vec
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        self.clear();
        // Implicitly drop self.arr, containing only MaybeUninit values without a drop of their own.
        // Doing so also deallocates the owned memory.
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: Vector is valid as a slice for len values, which are all initialized. The pointer
        // is nonnull, properly aligned and the range entirely contained within this Vector.
        unsafe { slice::from_raw_parts(self.arr.ptr.as_ptr().cast(), self.len) }
    }
}

impl<T> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: As for deref, and the mutable borrow of self prevents any other access.
        unsafe { slice::from_raw_parts_mut(self.arr.ptr.as_ptr().cast(), self.len) }
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> AsMut<[T]> for Vector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Borrow<[T]> for Vector<T> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T> BorrowMut<[T]> for Vector<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;

    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;

    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// SAFETY: The Array within a Vector is uniquely owned, so Send and Sync follow from T.
unsafe impl<T: Send> Send for Vector<T> {}
// SAFETY: Vector's safe API obeys all rules of the borrow checker, so no interior mutability
// occurs.
unsafe impl<T: Sync> Sync for Vector<T> {}

impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        self.try_clone().throw()
    }

    fn clone_from(&mut self, source: &Self) {
        self.try_clone_from(source).throw()
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: Hash> Hash for Vector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for Vector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

impl<T: Debug> Display for Vector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "!")?;
        f.debug_list().entries(self.iter()).finish()
    }
}
