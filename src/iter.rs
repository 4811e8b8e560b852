use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ptr::{self, NonNull};
use core::slice;

use crate::allocator::Allocator;
use crate::cursor::{Direction, Forward, Position, Window, WindowMut};
use crate::raw::RawBuf;
use crate::ring::RingBuffer;

/// Iterator over shared references, in the direction `D`.
///
/// Produced by `iter()`/`iter_rev()` on either container, or by
/// [`Cursor::to`](crate::Cursor::to) for an arbitrary cursor range.
///
/// This iterator implements `Clone`.
pub struct Iter<'a, T, D: Direction = Forward> {
    window: Window<'a, T>,
    front: isize,
    back: isize,
    _direction: PhantomData<D>,
}

impl<'a, T, D: Direction> Iter<'a, T, D> {
    /// Logical range `[from, to)` clamped to the live window.
    pub(crate) fn between(window: Window<'a, T>, from: isize, to: isize) -> Self {
        let len = isize::try_from(window.len()).unwrap_or(isize::MAX);
        let front = from.clamp(0, len);
        let back = to.clamp(front, len);
        Self {
            window,
            front,
            back,
            _direction: PhantomData,
        }
    }

    fn slot(&self, index: isize) -> Option<&'a T> {
        self.window.slot(Position::<D>::new(index).slot(self.window.len())?)
    }
}

impl<T, D: Direction> Clone for Iter<'_, T, D> {
    fn clone(&self) -> Self {
        Self {
            window: self.window,
            front: self.front,
            back: self.back,
            _direction: PhantomData,
        }
    }
}

impl<'a, T, D: Direction> Iterator for Iter<'a, T, D> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.slot(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len();
        (remaining, Some(remaining))
    }
}

impl<T, D: Direction> DoubleEndedIterator for Iter<'_, T, D> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.slot(self.back)
    }
}

impl<T, D: Direction> ExactSizeIterator for Iter<'_, T, D> {
    fn len(&self) -> usize {
        usize::try_from(self.back - self.front).unwrap_or(0)
    }
}

impl<T, D: Direction> FusedIterator for Iter<'_, T, D> {}

impl<T: fmt::Debug, D: Direction> fmt::Debug for Iter<'_, T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Iterator over mutable references, in the direction `D`.
pub struct IterMut<'a, T, D: Direction = Forward> {
    window: WindowMut<'a, T>,
    front: usize,
    back: usize,
    _direction: PhantomData<D>,
}

impl<'a, T, D: Direction> IterMut<'a, T, D> {
    pub(crate) fn new(window: WindowMut<'a, T>) -> Self {
        let back = window.len();
        Self {
            window,
            front: 0,
            back,
            _direction: PhantomData,
        }
    }

    fn slot(&mut self, index: usize) -> Option<&'a mut T> {
        let slot = D::slot(self.window.len(), index);
        // SAFETY: every logical index is yielded at most once, so the
        // returned references never alias
        self.window.slot_ptr(slot).map(|ptr| unsafe { &mut *ptr })
    }
}

impl<'a, T, D: Direction> Iterator for IterMut<'a, T, D> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let index = self.front;
        self.front += 1;
        self.slot(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T, D: Direction> DoubleEndedIterator for IterMut<'_, T, D> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.slot(self.back)
    }
}

impl<T, D: Direction> ExactSizeIterator for IterMut<'_, T, D> {}

impl<T, D: Direction> FusedIterator for IterMut<'_, T, D> {}

/// Owning iterator over the elements of a [`DynArray`](crate::DynArray).
///
/// Elements not yet yielded are dropped with the iterator.
pub struct IntoIter<T, A: Allocator> {
    buf: RawBuf<T, A>,
    start: usize,
    end: usize,
}

impl<T, A: Allocator> IntoIter<T, A> {
    /// # Safety
    ///
    /// Slots `[0, len)` of `buf` must be initialised and owned by the caller.
    pub(crate) unsafe fn new(buf: RawBuf<T, A>, len: usize) -> Self {
        Self { buf, start: 0, end: len }
    }

    /// The elements not yet yielded.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [start, end) is still initialised
        unsafe { slice::from_raw_parts(self.buf.ptr().add(self.start), self.end - self.start) }
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: the slot is initialised and is read exactly once
        let item = unsafe { ptr::read(self.buf.ptr().add(self.start)) };
        self.start += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: the slot is initialised and is read exactly once
        Some(unsafe { ptr::read(self.buf.ptr().add(self.end)) })
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        let alloc = self.buf.allocator();
        while self.start < self.end {
            let slot = self.start;
            self.start += 1;
            // SAFETY: slots in [start, end) are live and dropped once each
            unsafe { alloc.destroy(NonNull::new_unchecked(self.buf.ptr().add(slot))) };
        }
    }
}

// SAFETY: the iterator owns its elements exactly like the array did
unsafe impl<T: Send, A: Allocator + Send> Send for IntoIter<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for IntoIter<T, A> {}

/// Owning iterator over a [`RingBuffer`], oldest element first.
pub struct RingIntoIter<T, const N: usize> {
    ring: RingBuffer<T, N>,
}

impl<T, const N: usize> RingIntoIter<T, N> {
    pub(crate) fn new(ring: RingBuffer<T, N>) -> Self {
        Self { ring }
    }
}

impl<T, const N: usize> Iterator for RingIntoIter<T, N> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.ring.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ring.len(), Some(self.ring.len()))
    }
}

impl<T, const N: usize> DoubleEndedIterator for RingIntoIter<T, N> {
    fn next_back(&mut self) -> Option<T> {
        self.ring.pop_back()
    }
}

impl<T, const N: usize> ExactSizeIterator for RingIntoIter<T, N> {}

impl<T, const N: usize> FusedIterator for RingIntoIter<T, N> {}

impl<T: fmt::Debug, const N: usize> fmt::Debug for RingIntoIter<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RingIntoIter").field(&self.ring).finish()
    }
}
