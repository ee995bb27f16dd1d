use std::alloc::{self, Layout};
use std::borrow::{Borrow, BorrowMut};
use std::cmp;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem::{self, ManuallyDrop, MaybeUninit};
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};
use std::slice;

use crate::util::error::{CapacityOverflow, IndexOutOfBounds, OutOfMemory, TryReserveError};
use crate::util::option::OptionExtension;
use crate::util::result::ResultExtension;

/// A buffer of exactly `size` elements, allocated once and never resized. Similar to a
/// [`Box<[T]>`](Box<T>).
///
/// An Array of size 0 holds no allocation at all, which is observable through
/// [`data`](Array::data). All elements are initialized for the whole lifetime of the Array.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Array.
///
/// | Method | Complexity |
/// |-|-|
/// | `at` | `O(1)` |
/// | `size` | `O(1)` |
/// | `swap` | `O(1)` |
/// | `fill_from` | `O(n)` |
/// | `clone` | `O(n)` |
pub struct Array<T> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) size: usize,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> Array<T> {
    /// Creates a new Array with size 0. Nothing is allocated.
    ///
    /// # Examples
    /// ```
    /// # use containers::collections::contiguous::Array;
    /// let arr: Array<u8> = Array::new();
    /// assert_eq!(arr.size(), 0);
    /// assert!(arr.data().is_none());
    /// ```
    pub const fn new() -> Array<T> {
        Array {
            ptr: NonNull::dangling(),
            size: 0,
            _phantom: PhantomData,
        }
    }

    /// Returns the size of the Array.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns true if the Array has size 0 (and therefore owns no allocation).
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns a pointer to the first element, or [`None`] if the Array has size 0. The pointer
    /// is stable across moves of the Array itself.
    pub const fn data(&self) -> Option<NonNull<T>> {
        if self.size == 0 {
            None
        } else {
            Some(self.ptr)
        }
    }

    /// Creates a new Array of [`MaybeUninit<T>`] with the provided `size`, leaving every element
    /// uninitialized.
    ///
    /// # Errors
    /// Returns a [`CapacityOverflow`] if the memory layout size would exceed [`isize::MAX`], or
    /// [`OutOfMemory`] if the allocator refuses the request. Nothing is allocated in either case.
    pub fn try_new_uninit(size: usize) -> Result<Array<MaybeUninit<T>>, TryReserveError> {
        let layout = Array::<MaybeUninit<T>>::make_layout(size)?;
        let ptr = Array::<MaybeUninit<T>>::make_ptr(layout)?;

        Ok(Array {
            ptr,
            size,
            _phantom: PhantomData,
        })
    }

    /// Creates a new Array of [`MaybeUninit<T>`] with the provided `size`.
    ///
    /// # Panics
    /// Panics if the allocation can't be made, see [`Array::try_new_uninit`].
    pub fn new_uninit(size: usize) -> Array<MaybeUninit<T>> {
        Self::try_new_uninit(size).throw()
    }

    /// Creates an Array of `size` elements, where the element at each index `i` is produced by
    /// `f(i)`.
    ///
    /// # Errors
    /// See [`Array::try_new_uninit`]. `f` isn't invoked if the allocation fails.
    pub fn try_from_fn<F>(size: usize, mut f: F) -> Result<Array<T>, TryReserveError>
    where
        F: FnMut(usize) -> T,
    {
        let arr = Self::try_new_uninit(size)?;

        for i in 0..size {
            // SAFETY: i < size, so the offset is within the allocated range of the Array and can't
            // exceed isize::MAX bytes.
            unsafe {
                arr.ptr.add(i).write(MaybeUninit::new(f(i)));
            }
        }

        // SAFETY: Every element has just been written.
        Ok(unsafe { arr.assume_init() })
    }

    /// Creates an Array of `size` elements produced by `f`.
    ///
    /// # Panics
    /// Panics if the allocation can't be made, see [`Array::try_new_uninit`].
    ///
    /// # Examples
    /// ```
    /// # use containers::collections::contiguous::Array;
    /// let arr = Array::from_fn(4, |i| i * i);
    /// assert_eq!(&*arr, &[0, 1, 4, 9]);
    /// ```
    pub fn from_fn<F: FnMut(usize) -> T>(size: usize, f: F) -> Array<T> {
        Self::try_from_fn(size, f).throw()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= size`. Unchecked access is available through the
    /// slice returned by [`Deref`].
    pub fn at(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        let len = self.size;
        self.get(index).ok_or(IndexOutOfBounds { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= size`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        let len = self.size;
        self.get_mut(index).ok_or(IndexOutOfBounds { index, len })
    }

    /// Exchanges the allocations of two Arrays. Never allocates and never fails.
    pub fn swap(&mut self, other: &mut Array<T>) {
        mem::swap(self, other);
    }

    /// Decomposes an `Array<T>` into its raw components without dropping anything.
    pub(crate) fn into_parts(self) -> (NonNull<T>, usize) {
        let this = ManuallyDrop::new(self);
        (this.ptr, this.size)
    }

    /// Creates a [`Layout`] for `size` elements of type `T`.
    pub(crate) fn make_layout(size: usize) -> Result<Layout, CapacityOverflow> {
        Layout::array::<T>(size).map_err(|_| CapacityOverflow)
    }

    /// Allocates memory for the provided [`Layout`], or returns a dangling pointer for a zero-sized
    /// layout.
    ///
    /// # Errors
    /// Returns [`OutOfMemory`] if the global allocator returns null. Unlike
    /// [`alloc::handle_alloc_error`], this gives the caller a chance to leave its state untouched.
    pub(crate) fn make_ptr(layout: Layout) -> Result<NonNull<T>, OutOfMemory> {
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        // SAFETY: Zero-sized layouts have been guarded against.
        let raw = unsafe { alloc::alloc(layout) };
        NonNull::new(raw.cast()).ok_or(OutOfMemory {
            bytes: layout.size(),
        })
    }
}

impl<T: Default> Array<T> {
    /// Creates a new Array by repeating the default value of `T` `size` times.
    ///
    /// # Errors
    /// See [`Array::try_new_uninit`].
    pub fn try_repeat_default(size: usize) -> Result<Array<T>, TryReserveError> {
        Self::try_from_fn(size, |_| T::default())
    }

    /// Creates a new Array by repeating the default value of `T` `size` times.
    ///
    /// # Panics
    /// Panics if the allocation can't be made, see [`Array::try_new_uninit`].
    ///
    /// # Examples
    /// ```
    /// # use containers::collections::contiguous::Array;
    /// let arr: Array<u32> = Array::repeat_default(3);
    /// assert_eq!(&*arr, &[0, 0, 0]);
    /// ```
    pub fn repeat_default(size: usize) -> Array<T> {
        Self::try_repeat_default(size).throw()
    }
}

impl<T: Clone> Array<T> {
    /// Copies `min(self.size(), other.size())` elements from the front of `other` into the front of
    /// self. Any remaining elements of self are left untouched.
    ///
    /// # Examples
    /// ```
    /// # use containers::collections::contiguous::Array;
    /// let mut arr = Array::from([9, 9, 9, 9, 9]);
    /// arr.fill_from(&Array::from([1, 2, 3]));
    /// assert_eq!(&*arr, &[1, 2, 3, 9, 9]);
    /// ```
    pub fn fill_from(&mut self, other: &Array<T>) {
        let limit = cmp::min(self.size, other.size);
        self[..limit].clone_from_slice(&other[..limit]);
    }

    /// Creates an independent copy of self.
    ///
    /// # Errors
    /// See [`Array::try_new_uninit`].
    pub fn try_clone(&self) -> Result<Array<T>, TryReserveError> {
        Array::try_from_fn(self.size, |i| self[i].clone())
    }

    /// Replaces the contents of self with a copy of `source`. The copy is built first and then
    /// swapped in, so if it can't be allocated, self is left unchanged.
    ///
    /// # Errors
    /// See [`Array::try_new_uninit`].
    pub fn try_clone_from(&mut self, source: &Array<T>) -> Result<(), TryReserveError> {
        let mut copy = source.try_clone()?;
        self.swap(&mut copy);
        Ok(())
    }
}

impl<T> Array<MaybeUninit<T>> {
    /// Assume that all values of an `Array<MaybeUninit<T>>` are initialized.
    ///
    /// # Safety
    /// It is up to the caller to guarantee that the Array is properly initialized. Failing to do so
    /// is undefined behavior.
    pub unsafe fn assume_init(self) -> Array<T> {
        let (ptr, size) = self.into_parts();
        Array {
            ptr: ptr.cast(),
            size,
            _phantom: PhantomData,
        }
    }
}

impl<T, const N: usize> From<[T; N]> for Array<T> {
    /// Moves the elements of a fixed-size array into a new Array.
    ///
    /// # Panics
    /// Panics if the allocation can't be made.
    fn from(value: [T; N]) -> Self {
        let mut items = value.into_iter();
        // UNREACHABLE: from_fn invokes the closure exactly N times.
        Array::from_fn(N, |_| unsafe { items.next().unreachable() })
    }
}

impl<T> Default for Array<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Array<T> {
    fn drop(&mut self) {
        // SAFETY: All size elements are initialized and owned by self, so they can be dropped in
        // place exactly once here.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.size));
        }

        // UNREACHABLE: The same layout was already computed successfully during construction.
        let layout = unsafe { Self::make_layout(self.size).ok().unreachable() };

        if layout.size() != 0 {
            // SAFETY: ptr was allocated in the global allocator with this exact layout. Zero-sized
            // layouts are never allocated and are guarded against here.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) }
        }
    }
}

impl<T> Deref for Array<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The held data uses Layout::array(size) and is therefore valid and properly
        // aligned for size elements, all of which are initialized. The dangling pointer used for
        // size 0 is valid for empty slices.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.size) }
    }
}

impl<T> DerefMut for Array<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: As for deref, and the mutable borrow of self prevents any other access.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.size) }
    }
}

impl<T> AsRef<[T]> for Array<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> AsMut<[T]> for Array<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Borrow<[T]> for Array<T> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T> BorrowMut<[T]> for Array<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

// SAFETY: Arrays uniquely own their allocation, so sending one is the same as sending its
// elements.
unsafe impl<T: Send> Send for Array<T> {}
// SAFETY: Array's safe API follows the borrow rules and has no interior mutability.
unsafe impl<T: Sync> Sync for Array<T> {}

impl<T: Clone> Clone for Array<T> {
    fn clone(&self) -> Self {
        self.try_clone().throw()
    }

    fn clone_from(&mut self, source: &Self) {
        self.try_clone_from(source).throw()
    }
}

impl<T: PartialEq> PartialEq for Array<T> {
    /// Arrays are equal if they have the same size and equal elements at every index.
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for Array<T> {}

impl<T: Hash> Hash for Array<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for Array<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("contents", &&**self)
            .field("size", &self.size)
            .finish()
    }
}

impl<T: Debug> Display for Array<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
