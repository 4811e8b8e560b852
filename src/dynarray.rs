use core::fmt;
use core::mem::{self, size_of, ManuallyDrop};
use core::ops::{Index, IndexMut};
use core::ptr::{self, NonNull};
use core::slice;

use crate::allocator::{Allocator, Global};
use crate::cursor::{Cursor, CursorMut, Direction, Forward, Reverse, Window, WindowMut};
use crate::error::{fatal, ArrayError};
use crate::iter::{IntoIter, Iter, IterMut};
use crate::raw::RawBuf;

/// Capacity of an array built with [`DynArray::new`].
pub const DEFAULT_CAPACITY: usize = 10;
/// Numerator of the growth factor β = 3/2.
pub const GROWTH_NUMERATOR: usize = 3;
/// Denominator of the growth factor β = 3/2.
pub const GROWTH_DENOMINATOR: usize = 2;

/// `ceil(β × n)`.
fn scaled_capacity(n: usize) -> Result<usize, ArrayError> {
    n.checked_mul(GROWTH_NUMERATOR)
        .map(|scaled| scaled.div_ceil(GROWTH_DENOMINATOR))
        .ok_or(ArrayError::CapacityOverflow { requested: n })
}

/// A growable contiguous array over memory from an [`Allocator`].
///
/// Slots `[0, len)` of the buffer hold live elements, `[len, capacity)` are
/// uninitialised. Every operation that may need memory returns a `Result`
/// and leaves the array untouched when the allocator fails.
pub struct DynArray<T, A: Allocator = Global> {
    buf: RawBuf<T, A>,
    len: usize,
}

impl<T> DynArray<T, Global> {
    /// Creates an empty array with [`DEFAULT_CAPACITY`] slots.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::AllocFailed` if the initial block cannot be allocated.
    pub fn new() -> Result<Self, ArrayError> {
        Self::new_in(Global)
    }

    /// Creates an empty array with exactly `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the block cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArrayError> {
        Self::with_capacity_in(capacity, Global)
    }

    /// Creates an array of `n` default values with capacity `ceil(β n)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the block cannot be allocated.
    pub fn with_len(n: usize) -> Result<Self, ArrayError>
    where
        T: Default,
    {
        Self::with_len_in(n, Global)
    }

    /// Creates an array of `n` clones of `value` with capacity `ceil(β n)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the block cannot be allocated.
    pub fn from_elem(n: usize, value: T) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        Self::from_elem_in(n, value, Global)
    }

    /// Creates an array holding clones of `items`, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the block cannot be allocated.
    pub fn from_slice(items: &[T]) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        Self::from_slice_in(items, Global)
    }

    /// Creates an array from an exact-size iterator, with capacity
    /// `ceil(β len)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the block cannot be allocated.
    pub fn try_from_iter<I>(iter: I) -> Result<Self, ArrayError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        Self::try_from_iter_in(iter, Global)
    }

    /// Creates an array holding clones of the elements in `[first, last)`, in
    /// the cursors' traversal order.
    ///
    /// # Errors
    ///
    /// Returns an error if the block cannot be allocated.
    pub fn from_range<'a, D: Direction>(
        first: Cursor<'a, T, D>,
        last: Cursor<'a, T, D>,
    ) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        Self::try_from_iter(first.to(last).cloned())
    }
}

impl<T, A: Allocator> DynArray<T, A> {
    /// An array with no capacity. Does not allocate.
    #[must_use]
    pub fn empty_in(alloc: A) -> Self {
        Self {
            buf: RawBuf::dangling(alloc),
            len: 0,
        }
    }

    /// Creates an empty array with [`DEFAULT_CAPACITY`] slots from `alloc`.
    ///
    /// # Errors
    ///
    /// Returns an error if the block cannot be allocated.
    pub fn new_in(alloc: A) -> Result<Self, ArrayError> {
        Self::with_capacity_in(DEFAULT_CAPACITY, alloc)
    }

    /// Creates an empty array with exactly `capacity` slots from `alloc`.
    ///
    /// # Errors
    ///
    /// Returns an error if the block cannot be allocated.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, ArrayError> {
        Ok(Self {
            buf: RawBuf::with_capacity_in(capacity, alloc)?,
            len: 0,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the block cannot be allocated.
    pub fn with_len_in(n: usize, alloc: A) -> Result<Self, ArrayError>
    where
        T: Default,
    {
        let mut array = Self::with_capacity_in(scaled_capacity(n)?, alloc)?;
        for _ in 0..n {
            // SAFETY: capacity was reserved for n elements
            unsafe { array.push_unchecked(T::default()) };
        }
        Ok(array)
    }

    /// # Errors
    ///
    /// Returns an error if the block cannot be allocated.
    pub fn from_elem_in(n: usize, value: T, alloc: A) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        let mut array = Self::with_capacity_in(scaled_capacity(n)?, alloc)?;
        array.fill_from((0..n).map(|_| value.clone()));
        Ok(array)
    }

    /// # Errors
    ///
    /// Returns an error if the block cannot be allocated.
    pub fn from_slice_in(items: &[T], alloc: A) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        Self::try_from_iter_in(items.iter().cloned(), alloc)
    }

    /// # Errors
    ///
    /// Returns an error if the block cannot be allocated.
    pub fn try_from_iter_in<I>(iter: I, alloc: A) -> Result<Self, ArrayError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        let mut array = Self::with_capacity_in(scaled_capacity(iter.len())?, alloc)?;
        for item in iter {
            array.push_back(item)?;
        }
        Ok(array)
    }

    /// Deep copy with the same length and capacity and its own buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the block cannot be allocated.
    pub fn try_clone(&self) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        let mut copy = Self::with_capacity_in(self.capacity(), self.buf.allocator().clone())?;
        copy.fill_from(self.iter().cloned());
        Ok(copy)
    }

    /// Transfers the buffer out, leaving `self` empty with zero capacity.
    ///
    /// The emptied array owns nothing, so dropping or reusing it is safe.
    #[must_use]
    pub fn take(&mut self) -> Self {
        let empty = Self::empty_in(self.buf.allocator().clone());
        mem::replace(self, empty)
    }

    // ---------------
    // Element access
    // ---------------

    /// Checked access.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::OutOfRange` if `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T, ArrayError> {
        self.get(index).ok_or(ArrayError::OutOfRange { index, len: self.len })
    }

    /// Checked mutable access.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::OutOfRange` if `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, ArrayError> {
        let len = self.len;
        self.get_mut(index).ok_or(ArrayError::OutOfRange { index, len })
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Unchecked access.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len`.
    #[must_use]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        unsafe { &*self.buf.ptr().add(index) }
    }

    /// Unchecked mutable access.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len`.
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        unsafe { &mut *self.buf.ptr().add(index) }
    }

    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Pointer to the first slot. Dangling (but aligned) when the capacity is
    /// zero.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [0, len) is initialised; the pointer is non-null and aligned
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, and we hold the only borrow
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    #[must_use]
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    // ---------------
    // Capacity
    // ---------------

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Largest length any array of `T` could reach.
    #[must_use]
    pub fn max_size(&self) -> usize {
        match size_of::<T>() {
            0 => usize::MAX,
            size => isize::MAX.unsigned_abs() / size,
        }
    }

    /// Grows the capacity to exactly `n` if `n > capacity`; never shrinks.
    ///
    /// # Errors
    ///
    /// Returns an error if the new block cannot be allocated; the array is
    /// left unchanged.
    pub fn reserve(&mut self, n: usize) -> Result<(), ArrayError> {
        if n > self.capacity() {
            self.reallocate(n)?;
        }
        Ok(())
    }

    /// Reallocates to `capacity == len` if there is spare capacity.
    ///
    /// # Errors
    ///
    /// Returns an error if the new block cannot be allocated; the array is
    /// left unchanged.
    pub fn shrink_to_fit(&mut self) -> Result<(), ArrayError> {
        if self.capacity() > self.len {
            self.reallocate(self.len)?;
        }
        Ok(())
    }

    /// Resizes to `n`, filling new slots with clones of `value`.
    ///
    /// Shrinking drops the trailing elements. Growing past the capacity
    /// reallocates to exactly `n` first.
    ///
    /// # Errors
    ///
    /// Returns an error if the new block cannot be allocated; the array is
    /// left unchanged.
    pub fn resize(&mut self, n: usize, value: T) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        self.resize_with(n, || value.clone())
    }

    /// Resizes to `n`, filling new slots with `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns an error if the new block cannot be allocated.
    pub fn resize_default(&mut self, n: usize) -> Result<(), ArrayError>
    where
        T: Default,
    {
        self.resize_with(n, T::default)
    }

    /// Resizes to `n`, filling new slots with values produced by `f`.
    ///
    /// # Errors
    ///
    /// Returns an error if the new block cannot be allocated.
    pub fn resize_with<F>(&mut self, n: usize, f: F) -> Result<(), ArrayError>
    where
        F: FnMut() -> T,
    {
        if n <= self.len {
            self.truncate(n);
            return Ok(());
        }
        self.reserve(n)?;
        self.fill_from(core::iter::repeat_with(f).take(n - self.len));
        Ok(())
    }

    /// Drops the elements at `n..len`. No-op if `n >= len`.
    pub fn truncate(&mut self, n: usize) {
        if n >= self.len {
            return;
        }
        let old_len = self.len;
        // Shorten first: if a destructor panics the rest leak instead of
        // being dropped twice.
        self.len = n;
        self.destroy_range(n, old_len);
    }

    // ---------------
    // Modifiers
    // ---------------

    /// Replaces the contents with `n` clones of `value`, reusing the buffer
    /// when it is large enough and otherwise reallocating to `ceil(β n)`.
    ///
    /// # Errors
    ///
    /// Returns an error if a larger block cannot be allocated; the array is
    /// left unchanged.
    pub fn assign_fill(&mut self, n: usize, value: T) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        self.prepare_assign(n)?;
        self.fill_from((0..n).map(|_| value.clone()));
        Ok(())
    }

    /// Replaces the contents with clones of `items`.
    ///
    /// # Errors
    ///
    /// Returns an error if a larger block cannot be allocated; the array is
    /// left unchanged.
    pub fn assign_slice(&mut self, items: &[T]) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        self.assign_iter(items.iter().cloned())
    }

    /// Replaces the contents with the items of an exact-size iterator.
    ///
    /// # Errors
    ///
    /// Returns an error if a larger block cannot be allocated; the array is
    /// left unchanged.
    pub fn assign_iter<I>(&mut self, iter: I) -> Result<(), ArrayError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        self.prepare_assign(iter.len())?;
        for item in iter {
            self.push_back(item)?;
        }
        Ok(())
    }

    /// Appends `value`, growing to `max(1, ceil(β capacity))` when full.
    ///
    /// # Errors
    ///
    /// Returns an error if the array is full and a larger block cannot be
    /// allocated; the array is left unchanged.
    pub fn push_back(&mut self, value: T) -> Result<(), ArrayError> {
        self.grow_one()?;
        // SAFETY: grow_one guarantees a free slot
        unsafe { self.push_unchecked(value) };
        Ok(())
    }

    /// Appends the value produced by `make`, constructed directly into the new
    /// slot, and returns a reference to it.
    ///
    /// `make` only runs once room has been made.
    ///
    /// # Errors
    ///
    /// Returns an error if the array is full and a larger block cannot be
    /// allocated.
    pub fn emplace_back<F>(&mut self, make: F) -> Result<&mut T, ArrayError>
    where
        F: FnOnce() -> T,
    {
        self.grow_one()?;
        // SAFETY: grow_one guarantees a free slot
        Ok(unsafe { self.push_unchecked(make()) })
    }

    /// Removes and returns the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot was live and is now outside [0, len)
        Some(unsafe { ptr::read(self.buf.ptr().add(self.len)) })
    }

    /// Inserts `value` before position `pos`, shifting `[pos, len)` one slot
    /// to the right. Returns a cursor at the inserted element.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::OutOfRange` if `pos > len`, or an allocation
    /// error; in both cases the array is left unchanged.
    pub fn insert(
        &mut self,
        pos: usize,
        value: T,
    ) -> Result<CursorMut<'_, T, Forward>, ArrayError> {
        self.check_position(pos)?;
        self.grow_one()?;
        // SAFETY: pos <= len < capacity; the tail moves into free capacity
        unsafe {
            let at = self.buf.ptr().add(pos);
            ptr::copy(at, at.add(1), self.len - pos);
            self.buf.allocator().construct(NonNull::new_unchecked(at), value);
        }
        self.len += 1;
        Ok(self.cursor_mut_at(pos))
    }

    /// Inserts clones of `items` before `pos`.
    ///
    /// # Errors
    ///
    /// As for [`insert`](Self::insert).
    pub fn insert_slice(
        &mut self,
        pos: usize,
        items: &[T],
    ) -> Result<CursorMut<'_, T, Forward>, ArrayError>
    where
        T: Clone,
    {
        self.insert_iter(pos, items.iter().cloned())
    }

    /// Inserts `n` clones of `value` before `pos`.
    ///
    /// # Errors
    ///
    /// As for [`insert`](Self::insert).
    pub fn insert_fill(
        &mut self,
        pos: usize,
        n: usize,
        value: T,
    ) -> Result<CursorMut<'_, T, Forward>, ArrayError>
    where
        T: Clone,
    {
        self.insert_iter(pos, (0..n).map(|_| value.clone()))
    }

    /// Inserts the items of an exact-size iterator before `pos`, preserving
    /// their order. Grows to `ceil(β (len + n))` if they do not fit.
    ///
    /// The items are staged in a separate block first, so a panicking
    /// iterator or a failed allocation leaves the array untouched.
    ///
    /// # Errors
    ///
    /// As for [`insert`](Self::insert).
    pub fn insert_iter<I>(
        &mut self,
        pos: usize,
        iter: I,
    ) -> Result<CursorMut<'_, T, Forward>, ArrayError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        self.check_position(pos)?;
        let iter = iter.into_iter();
        let mut staged = Self::with_capacity_in(iter.len(), self.buf.allocator().clone())?;
        for item in iter {
            staged.push_back(item)?;
        }

        let n = staged.len;
        match n {
            0 => return Ok(self.cursor_mut_at(pos)),
            1 => self.grow_one()?,
            _ => self.grow_for(n)?,
        }
        // SAFETY: capacity >= len + n; the staged elements are moved bitwise
        // and forgotten by `staged` below
        unsafe {
            let at = self.buf.ptr().add(pos);
            ptr::copy(at, at.add(n), self.len - pos);
            ptr::copy_nonoverlapping(staged.buf.ptr(), at, n);
        }
        staged.len = 0;
        self.len += n;
        Ok(self.cursor_mut_at(pos))
    }

    /// Removes and returns the element at `pos`, shifting the tail left.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::OutOfRange` if `pos >= len`.
    pub fn erase(&mut self, pos: usize) -> Result<T, ArrayError> {
        if pos >= self.len {
            return Err(ArrayError::OutOfRange { index: pos, len: self.len });
        }
        // SAFETY: pos < len; the hole is closed before len is updated
        unsafe {
            let at = self.buf.ptr().add(pos);
            let value = ptr::read(at);
            ptr::copy(at.add(1), at, self.len - pos - 1);
            self.len -= 1;
            Ok(value)
        }
    }

    /// Drops the elements in `[start, end)` and closes the gap.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::InvalidRange` if `start > end`, or
    /// `ArrayError::OutOfRange` if `end > len`.
    pub fn erase_range(&mut self, start: usize, end: usize) -> Result<(), ArrayError> {
        if start > end {
            return Err(ArrayError::InvalidRange { start, end });
        }
        if end > self.len {
            return Err(ArrayError::OutOfRange { index: end, len: self.len });
        }
        let old_len = self.len;
        // A panicking destructor leaks the tail rather than double-dropping it.
        self.len = start;
        self.destroy_range(start, end);
        // SAFETY: [end, old_len) is live and moves down into the hole
        unsafe {
            let base = self.buf.ptr();
            ptr::copy(base.add(end), base.add(start), old_len - end);
        }
        self.len = old_len - (end - start);
        Ok(())
    }

    /// Exchanges buffers, lengths, capacities and allocators. No element moves.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Drops every element; the capacity is kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    // ---------------
    // Cursors and iterators
    // ---------------

    fn owner(&self) -> *const () {
        (self as *const Self).cast::<()>()
    }

    fn window(&self) -> Window<'_, T> {
        Window::contiguous(self.owner(), self.as_slice())
    }

    fn window_mut(&mut self) -> WindowMut<'_, T> {
        let owner = self.owner();
        WindowMut::contiguous(owner, self.as_mut_slice())
    }

    /// Cursor at the first element (equal to `end()` when empty).
    #[must_use]
    pub fn begin(&self) -> Cursor<'_, T, Forward> {
        Cursor::new(self.window(), 0)
    }

    /// Cursor one past the last element.
    #[must_use]
    pub fn end(&self) -> Cursor<'_, T, Forward> {
        Cursor::new(self.window(), self.len)
    }

    /// Reverse cursor at the last element.
    #[must_use]
    pub fn rbegin(&self) -> Cursor<'_, T, Reverse> {
        Cursor::new(self.window(), 0)
    }

    /// Reverse cursor one before the first element.
    #[must_use]
    pub fn rend(&self) -> Cursor<'_, T, Reverse> {
        Cursor::new(self.window(), self.len)
    }

    /// Forward cursor at index `n`.
    #[must_use]
    pub fn cursor_at(&self, n: usize) -> Cursor<'_, T, Forward> {
        Cursor::new(self.window(), n)
    }

    pub fn begin_mut(&mut self) -> CursorMut<'_, T, Forward> {
        CursorMut::new(self.window_mut(), 0)
    }

    pub fn end_mut(&mut self) -> CursorMut<'_, T, Forward> {
        let len = self.len;
        CursorMut::new(self.window_mut(), len)
    }

    pub fn rbegin_mut(&mut self) -> CursorMut<'_, T, Reverse> {
        CursorMut::new(self.window_mut(), 0)
    }

    pub fn rend_mut(&mut self) -> CursorMut<'_, T, Reverse> {
        let len = self.len;
        CursorMut::new(self.window_mut(), len)
    }

    pub fn cursor_mut_at(&mut self, n: usize) -> CursorMut<'_, T, Forward> {
        CursorMut::new(self.window_mut(), n)
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, Forward> {
        self.begin().to(self.end())
    }

    #[must_use]
    pub fn iter_rev(&self) -> Iter<'_, T, Reverse> {
        self.rbegin().to(self.rend())
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T, Forward> {
        IterMut::new(self.window_mut())
    }

    pub fn iter_rev_mut(&mut self) -> IterMut<'_, T, Reverse> {
        IterMut::new(self.window_mut())
    }

    // ---------------
    // Private
    // ---------------

    fn reallocate(&mut self, new_cap: usize) -> Result<(), ArrayError> {
        // SAFETY: [0, len) is initialised and every caller passes new_cap >= len
        unsafe { self.buf.reallocate(self.len, new_cap) }
    }

    /// Makes room for one more element.
    fn grow_one(&mut self) -> Result<(), ArrayError> {
        if self.len == self.capacity() {
            let next = scaled_capacity(self.capacity())?.max(1);
            self.reallocate(next)?;
        }
        Ok(())
    }

    /// Makes room for `additional` more elements, growing to
    /// `ceil(β (len + additional))` when they do not fit.
    fn grow_for(&mut self, additional: usize) -> Result<(), ArrayError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(ArrayError::CapacityOverflow { requested: additional })?;
        if required > self.capacity() {
            self.reallocate(scaled_capacity(required)?)?;
        }
        Ok(())
    }

    /// Clears, then guarantees room for `n` elements. Allocates before
    /// clearing so a failure leaves the contents intact.
    fn prepare_assign(&mut self, n: usize) -> Result<(), ArrayError> {
        if n > self.capacity() {
            let fresh =
                RawBuf::with_capacity_in(scaled_capacity(n)?, self.buf.allocator().clone())?;
            self.clear();
            self.buf = fresh;
        } else {
            self.clear();
        }
        Ok(())
    }

    fn check_position(&self, pos: usize) -> Result<(), ArrayError> {
        if pos > self.len {
            Err(ArrayError::OutOfRange { index: pos, len: self.len })
        } else {
            Ok(())
        }
    }

    /// # Safety
    ///
    /// `len < capacity`.
    unsafe fn push_unchecked(&mut self, value: T) -> &mut T {
        debug_assert!(self.len < self.capacity());
        unsafe {
            let slot = NonNull::new_unchecked(self.buf.ptr().add(self.len));
            self.buf.allocator().construct(slot, value);
            self.len += 1;
            &mut *slot.as_ptr()
        }
    }

    /// Writes items into free capacity. The caller reserves room for all of
    /// them.
    fn fill_from<I: Iterator<Item = T>>(&mut self, items: I) {
        for item in items {
            debug_assert!(self.len < self.capacity(), "fill_from overran reserved capacity");
            // SAFETY: callers reserve room for every item
            unsafe { self.push_unchecked(item) };
        }
    }

    /// Drops `[start, end)` through the allocator. The caller has already
    /// moved `len` out of the range.
    fn destroy_range(&mut self, start: usize, end: usize) {
        let alloc = self.buf.allocator();
        for index in start..end {
            // SAFETY: the slot is live and is not reachable through len
            unsafe { alloc.destroy(NonNull::new_unchecked(self.buf.ptr().add(index))) };
        }
    }
}

impl<T, A: Allocator> Drop for DynArray<T, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone, A: Allocator> Clone for DynArray<T, A> {
    /// # Panics
    ///
    /// Panics if the copy cannot be allocated.
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| fatal(err))
    }
}

impl<T> Default for DynArray<T, Global> {
    /// # Panics
    ///
    /// Panics if the initial block cannot be allocated.
    fn default() -> Self {
        Self::new().unwrap_or_else(|err| fatal(err))
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for DynArray<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq<U>, U, A: Allocator, B: Allocator> PartialEq<DynArray<U, B>> for DynArray<T, A> {
    fn eq(&self, other: &DynArray<U, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: Allocator> Eq for DynArray<T, A> {}

impl<T: PartialEq<U>, U, A: Allocator> PartialEq<[U]> for DynArray<T, A> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, A: Allocator, const M: usize> PartialEq<[U; M]> for DynArray<T, A> {
    fn eq(&self, other: &[U; M]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, A: Allocator> Index<usize> for DynArray<T, A> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T, A: Allocator> IndexMut<usize> for DynArray<T, A> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T, A: Allocator> AsRef<[T]> for DynArray<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> AsMut<[T]> for DynArray<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator> Extend<T> for DynArray<T, A> {
    /// # Panics
    ///
    /// Panics if the array cannot grow.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            if let Err(err) = self.push_back(item) {
                fatal(err);
            }
        }
    }
}

impl<'a, T: Copy + 'a, A: Allocator> Extend<&'a T> for DynArray<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for DynArray<T, Global> {
    /// # Panics
    ///
    /// Panics if the array cannot grow.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new().unwrap_or_else(|err| fatal(err));
        array.extend(iter);
        array
    }
}

impl<T, A: Allocator> IntoIterator for DynArray<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        let array = ManuallyDrop::new(self);
        // SAFETY: the buffer is moved out exactly once and `array` is never
        // dropped, so ownership of [0, len) passes to the iterator
        unsafe { IntoIter::new(ptr::read(&array.buf), array.len) }
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a DynArray<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, Forward>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut DynArray<T, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, Forward>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// SAFETY: the array uniquely owns its elements and its block
unsafe impl<T: Send, A: Allocator + Send> Send for DynArray<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for DynArray<T, A> {}
