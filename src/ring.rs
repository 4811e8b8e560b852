use core::fmt;
use core::mem::MaybeUninit;
use core::ops::{Index, IndexMut};
use core::slice;

use crate::cursor::{Cursor, CursorMut, Forward, Reverse, Window, WindowMut};
use crate::iter::{Iter, IterMut, RingIntoIter};

/// A fixed-capacity ring buffer stored inline, overwriting its oldest element
/// when full.
///
/// `head` is the slot of the oldest live element and `tail` the slot of the
/// newest; logical index `n` lives in physical slot `(head + n) mod N`.
/// Slots outside the live range are uninitialised.
pub struct RingBuffer<T, const N: usize> {
    slots: [MaybeUninit<T>; N],
    head: usize,
    tail: usize,
    len: usize,
}

impl<T, const N: usize> RingBuffer<T, N> {
    const NON_ZERO: () = assert!(N > 0, "RingBuffer capacity must be non-zero");

    #[must_use]
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_ZERO;
        Self {
            slots: [const { MaybeUninit::uninit() }; N],
            head: 0,
            tail: N - 1,
            len: 0,
        }
    }

    #[inline]
    const fn advance(slot: usize) -> usize {
        if slot + 1 == N {
            0
        } else {
            slot + 1
        }
    }

    #[inline]
    const fn retreat(slot: usize) -> usize {
        if slot == 0 {
            N - 1
        } else {
            slot - 1
        }
    }

    #[inline]
    fn physical(&self, index: usize) -> usize {
        (self.head + index) % N
    }

    /// Appends `value` after the newest element.
    ///
    /// When the buffer is full the oldest element is overwritten and
    /// returned; `len` saturates at `N`.
    pub fn push_back(&mut self, value: T) -> Option<T> {
        self.tail = Self::advance(self.tail);
        let evicted = if self.len == N {
            // Full: the new tail is the old head.
            self.head = Self::advance(self.head);
            log::trace!("ring buffer full, overwriting slot {}", self.tail);
            // SAFETY: every slot is live when full; the value is moved out
            // before the slot is rewritten
            Some(unsafe { self.slots[self.tail].assume_init_read() })
        } else {
            self.len += 1;
            None
        };
        self.slots[self.tail].write(value);
        evicted
    }

    /// Appends the value produced by `make` and returns a reference to it.
    /// An evicted oldest element is dropped.
    pub fn emplace_back<F>(&mut self, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        self.push_back(make());
        // SAFETY: the slot at tail was just written
        unsafe { self.slots[self.tail].assume_init_mut() }
    }

    /// Removes and returns the oldest element.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: head is live while len > 0; it leaves the live range below
        let value = unsafe { self.slots[self.head].assume_init_read() };
        self.head = Self::advance(self.head);
        self.len -= 1;
        Some(value)
    }

    /// Removes and returns the newest element.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: tail is live while len > 0; it leaves the live range below
        let value = unsafe { self.slots[self.tail].assume_init_read() };
        self.tail = Self::retreat(self.tail);
        self.len -= 1;
        Some(value)
    }

    /// The oldest element.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// The newest element.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|last| self.get(last))
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.len.checked_sub(1).and_then(|last| self.get_mut(last))
    }

    /// Element at logical index `index` (0 is the oldest).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        // SAFETY: bounds checked
        (index < self.len).then(|| unsafe { self.get_unchecked(index) })
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            // SAFETY: bounds checked
            Some(unsafe { self.get_unchecked_mut(index) })
        } else {
            None
        }
    }

    /// Element at logical index `index`, mapped to slot `(head + index) mod N`
    /// without a range check.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len`.
    #[must_use]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        unsafe { self.slots.get_unchecked(self.physical(index)).assume_init_ref() }
    }

    /// # Safety
    ///
    /// `index` must be less than `len`.
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        let slot = self.physical(index);
        unsafe { self.slots.get_unchecked_mut(slot).assume_init_mut() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[must_use]
    pub const fn max_size(&self) -> usize {
        N
    }

    /// Drops every live element and rewinds head and tail.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
        self.head = 0;
        self.tail = N - 1;
    }

    /// The live elements as two slices, oldest first. The second slice is
    /// empty unless the contents wrap past the end of the storage.
    #[must_use]
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let (first, second) = self.split_ranges();
        let base = self.slots.as_ptr().cast::<T>();
        // SAFETY: both ranges cover live slots only
        unsafe {
            (
                slice::from_raw_parts(base.add(first.0), first.1),
                slice::from_raw_parts(base, second),
            )
        }
    }

    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let (first, second) = self.split_ranges();
        let base = self.slots.as_mut_ptr().cast::<T>();
        // SAFETY: the ranges are live and disjoint
        unsafe {
            (
                slice::from_raw_parts_mut(base.add(first.0), first.1),
                slice::from_raw_parts_mut(base, second),
            )
        }
    }

    /// `((start, len), wrapped_len)` of the live range.
    fn split_ranges(&self) -> ((usize, usize), usize) {
        let contiguous = (N - self.head).min(self.len);
        ((self.head, contiguous), self.len - contiguous)
    }

    // ---------------
    // Cursors and iterators
    // ---------------

    fn owner(&self) -> *const () {
        (self as *const Self).cast::<()>()
    }

    fn window(&self) -> Window<'_, T> {
        let base = self.slots.as_ptr().cast::<T>();
        // SAFETY: the live range is borrowed with self
        unsafe { Window::wrapped(self.owner(), base, self.head, N, self.len) }
    }

    fn window_mut(&mut self) -> WindowMut<'_, T> {
        let owner = self.owner();
        let base = self.slots.as_mut_ptr().cast::<T>();
        // SAFETY: the live range is exclusively borrowed with self
        unsafe { WindowMut::wrapped(owner, base, self.head, N, self.len) }
    }

    /// Cursor at the oldest element.
    #[must_use]
    pub fn begin(&self) -> Cursor<'_, T, Forward> {
        Cursor::new(self.window(), 0)
    }

    #[must_use]
    pub fn end(&self) -> Cursor<'_, T, Forward> {
        Cursor::new(self.window(), self.len)
    }

    /// Reverse cursor at the newest element.
    #[must_use]
    pub fn rbegin(&self) -> Cursor<'_, T, Reverse> {
        Cursor::new(self.window(), 0)
    }

    #[must_use]
    pub fn rend(&self) -> Cursor<'_, T, Reverse> {
        Cursor::new(self.window(), self.len)
    }

    pub fn begin_mut(&mut self) -> CursorMut<'_, T, Forward> {
        CursorMut::new(self.window_mut(), 0)
    }

    pub fn rbegin_mut(&mut self) -> CursorMut<'_, T, Reverse> {
        CursorMut::new(self.window_mut(), 0)
    }

    /// Oldest to newest.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, Forward> {
        self.begin().to(self.end())
    }

    /// Newest to oldest.
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
}

impl<T, const N: usize> Drop for RingBuffer<T, N> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize> Clone for RingBuffer<T, N> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for RingBuffer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, const N: usize> PartialEq for RingBuffer<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, const N: usize> Eq for RingBuffer<T, N> {}

impl<T, const N: usize> Index<usize> for RingBuffer<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!("index {index} out of range for ring buffer of length {}", self.len),
        }
    }
}

impl<T, const N: usize> IndexMut<usize> for RingBuffer<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("index {index} out of range for ring buffer of length {len}"),
        }
    }
}

impl<T, const N: usize> Extend<T> for RingBuffer<T, N> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T, const N: usize> FromIterator<T> for RingBuffer<T, N> {
    /// Keeps the newest `N` items.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut ring = Self::new();
        ring.extend(iter);
        ring
    }
}

impl<T, const N: usize> IntoIterator for RingBuffer<T, N> {
    type Item = T;
    type IntoIter = RingIntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        RingIntoIter::new(self)
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a RingBuffer<T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, Forward>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut RingBuffer<T, N> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, Forward>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
