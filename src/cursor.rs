//! Random-access cursors over the live elements of a container.
//!
//! A cursor is a position, not an owner: it pairs a [`Window`] onto the
//! container's storage with a signed logical index. The window describes the
//! live elements as `len` slots starting at physical slot `head` of a block of
//! `modulus` slots, so the same arithmetic serves the contiguous
//! [`DynArray`](crate::DynArray) (`head == 0`) and the wrapping
//! [`RingBuffer`](crate::RingBuffer).
//!
//! Direction is a type parameter ([`Forward`] or [`Reverse`]); mutability is
//! the choice between [`Cursor`] and [`CursorMut`]. Both share [`Position`]
//! for stepping and slot lookup.

use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::iter::Iter;

mod sealed {
    pub trait Sealed {}
}

/// Traversal direction of a cursor or iterator.
pub trait Direction: sealed::Sealed {
    /// `true` when logical index 0 is the last live element.
    const REVERSED: bool;

    /// Maps a logical index in `[0, len)` to a slot offset from the head.
    #[inline]
    fn slot(len: usize, index: usize) -> usize {
        if Self::REVERSED {
            len - 1 - index
        } else {
            index
        }
    }
}

/// Front-to-back traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Forward;

/// Back-to-front traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Reverse;

impl sealed::Sealed for Forward {}
impl sealed::Sealed for Reverse {}

impl Direction for Forward {
    const REVERSED: bool = false;
}

impl Direction for Reverse {
    const REVERSED: bool = true;
}

/// Shared view of `len` live slots starting at `head` in a block of
/// `modulus` slots.
///
/// `owner` is the address of the container the window was taken from. It
/// identifies the container even when `base` is dangling (zero capacity or a
/// zero-sized `T`).
pub(crate) struct Window<'a, T> {
    owner: *const (),
    base: *const T,
    head: usize,
    modulus: usize,
    len: usize,
    _marker: PhantomData<&'a T>,
}

impl<T> Clone for Window<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Window<'_, T> {}

impl<'a, T> Window<'a, T> {
    pub(crate) fn contiguous(owner: *const (), slice: &'a [T]) -> Self {
        Self {
            owner,
            base: slice.as_ptr(),
            head: 0,
            modulus: slice.len(),
            len: slice.len(),
            _marker: PhantomData,
        }
    }

    /// # Safety
    ///
    /// The `len` slots starting at `head` (wrapping at `modulus`) must be live
    /// for `'a` and not mutated during it. `head < modulus` unless `len == 0`.
    pub(crate) unsafe fn wrapped(
        owner: *const (),
        base: *const T,
        head: usize,
        modulus: usize,
        len: usize,
    ) -> Self {
        debug_assert!(len <= modulus);
        Self {
            owner,
            base,
            head,
            modulus,
            len,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Slot `offset` counted from the head, if live.
    #[inline]
    pub(crate) fn slot(&self, offset: usize) -> Option<&'a T> {
        if offset >= self.len {
            return None;
        }
        let physical = (self.head + offset) % self.modulus;
        // SAFETY: offset < len, so the physical slot is live for 'a
        Some(unsafe { &*self.base.add(physical) })
    }

    fn same_owner(&self, other: &Window<'_, T>) -> bool {
        core::ptr::eq(self.owner, other.owner)
    }
}

/// Mutable counterpart of [`Window`]. Not `Copy`: two of them over the same
/// storage would alias.
pub(crate) struct WindowMut<'a, T> {
    owner: *const (),
    base: *mut T,
    head: usize,
    modulus: usize,
    len: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> WindowMut<'a, T> {
    pub(crate) fn contiguous(owner: *const (), slice: &'a mut [T]) -> Self {
        Self {
            owner,
            base: slice.as_mut_ptr(),
            head: 0,
            modulus: slice.len(),
            len: slice.len(),
            _marker: PhantomData,
        }
    }

    /// # Safety
    ///
    /// As for [`Window::wrapped`], and the slots must be exclusively borrowed
    /// for `'a`.
    pub(crate) unsafe fn wrapped(
        owner: *const (),
        base: *mut T,
        head: usize,
        modulus: usize,
        len: usize,
    ) -> Self {
        debug_assert!(len <= modulus);
        Self {
            owner,
            base,
            head,
            modulus,
            len,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn as_window(&self) -> Window<'_, T> {
        // SAFETY: the shared view is bounded by the borrow of `self`
        unsafe { Window::wrapped(self.owner, self.base, self.head, self.modulus, self.len) }
    }

    /// Raw pointer to slot `offset` counted from the head, if live.
    #[inline]
    pub(crate) fn slot_ptr(&self, offset: usize) -> Option<*mut T> {
        if offset >= self.len {
            return None;
        }
        let physical = (self.head + offset) % self.modulus;
        // SAFETY: offset < len keeps the pointer inside the block
        Some(unsafe { self.base.add(physical) })
    }
}

/// Signed logical index plus its traversal direction.
pub(crate) struct Position<D> {
    index: isize,
    _direction: PhantomData<D>,
}

impl<D> Clone for Position<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for Position<D> {}

impl<D: Direction> Position<D> {
    #[inline]
    pub(crate) fn new(index: isize) -> Self {
        Self {
            index,
            _direction: PhantomData,
        }
    }

    pub(crate) fn at(index: usize) -> Self {
        Self::new(isize::try_from(index).unwrap_or(isize::MAX))
    }

    #[inline]
    pub(crate) fn index(self) -> isize {
        self.index
    }

    #[inline]
    pub(crate) fn offset(&mut self, delta: isize) {
        self.index = self.index.wrapping_add(delta);
    }

    /// Slot offset from the head for this position, or `None` outside
    /// `[0, len)`.
    #[inline]
    pub(crate) fn slot(self, len: usize) -> Option<usize> {
        let index = usize::try_from(self.index).ok()?;
        (index < len).then(|| D::slot(len, index))
    }
}

/// A shared, copyable random-access cursor.
///
/// Obtained from `begin`/`end`/`rbegin`/`rend` on a container. Two cursors
/// compare by position, never by the values they point at: they are equal
/// only when they belong to the same container, move in the same direction
/// and sit at the same logical index. Cursors of different directions or
/// containers are unordered (`partial_cmp` returns `None`).
///
/// The cursor borrows its container, so the container cannot be mutated (and
/// the cursor invalidated) while it is alive.
pub struct Cursor<'a, T, D: Direction = Forward> {
    window: Window<'a, T>,
    pos: Position<D>,
}

impl<T, D: Direction> Clone for Cursor<'_, T, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, D: Direction> Copy for Cursor<'_, T, D> {}

impl<'a, T, D: Direction> Cursor<'a, T, D> {
    pub(crate) fn new(window: Window<'a, T>, index: usize) -> Self {
        Self {
            window,
            pos: Position::at(index),
        }
    }

    /// Logical index; `0` is `begin`, the container length is `end`.
    #[must_use]
    pub fn index(&self) -> isize {
        self.pos.index()
    }

    /// The element under the cursor, or `None` at `end`/`rend` or any other
    /// position outside the live range.
    #[must_use]
    pub fn get(&self) -> Option<&'a T> {
        self.window.slot(self.pos.slot(self.window.len())?)
    }

    /// The element `offset` positions away, without moving.
    #[must_use]
    pub fn peek(&self, offset: isize) -> Option<&'a T> {
        (*self + offset).get()
    }

    /// `true` at or past the one-past-the-end position.
    #[must_use]
    pub fn is_end(&self) -> bool {
        usize::try_from(self.pos.index()).is_ok_and(|index| index >= self.window.len())
    }

    /// Steps one position in the cursor's direction (pre-increment).
    pub fn move_next(&mut self) -> &mut Self {
        self.pos.offset(1);
        self
    }

    /// Steps one position against the cursor's direction (pre-decrement).
    pub fn move_prev(&mut self) -> &mut Self {
        self.pos.offset(-1);
        self
    }

    /// Steps forward and returns the cursor as it was (post-increment).
    pub fn fetch_next(&mut self) -> Self {
        let previous = *self;
        self.pos.offset(1);
        previous
    }

    /// Steps backward and returns the cursor as it was (post-decrement).
    pub fn fetch_prev(&mut self) -> Self {
        let previous = *self;
        self.pos.offset(-1);
        previous
    }

    /// Signed distance from `origin` to `self`, in steps of this direction.
    #[must_use]
    pub fn offset_from(&self, origin: &Self) -> isize {
        self.pos.index().wrapping_sub(origin.pos.index())
    }

    /// Iterator over `[self, last)`. Empty if `last` is not after `self` or
    /// belongs to another container.
    #[must_use]
    pub fn to(self, last: Self) -> Iter<'a, T, D> {
        if !self.window.same_owner(&last.window) {
            return Iter::between(self.window, 0, 0);
        }
        Iter::between(self.window, self.pos.index(), last.pos.index())
    }

    fn comparable<E: Direction>(&self, other: &Cursor<'_, T, E>) -> bool {
        D::REVERSED == E::REVERSED && self.window.same_owner(&other.window)
    }
}

impl<T, D: Direction> Add<isize> for Cursor<'_, T, D> {
    type Output = Self;

    fn add(mut self, rhs: isize) -> Self {
        self.pos.offset(rhs);
        self
    }
}

impl<T, D: Direction> Sub<isize> for Cursor<'_, T, D> {
    type Output = Self;

    fn sub(mut self, rhs: isize) -> Self {
        self.pos.offset(rhs.wrapping_neg());
        self
    }
}

impl<T, D: Direction> AddAssign<isize> for Cursor<'_, T, D> {
    fn add_assign(&mut self, rhs: isize) {
        self.pos.offset(rhs);
    }
}

impl<T, D: Direction> SubAssign<isize> for Cursor<'_, T, D> {
    fn sub_assign(&mut self, rhs: isize) {
        self.pos.offset(rhs.wrapping_neg());
    }
}

impl<'b, T, D: Direction, E: Direction> PartialEq<Cursor<'b, T, E>> for Cursor<'_, T, D> {
    fn eq(&self, other: &Cursor<'b, T, E>) -> bool {
        self.comparable(other) && self.pos.index() == other.pos.index()
    }
}

impl<T, D: Direction> Eq for Cursor<'_, T, D> {}

impl<'b, T, D: Direction, E: Direction> PartialOrd<Cursor<'b, T, E>> for Cursor<'_, T, D> {
    fn partial_cmp(&self, other: &Cursor<'b, T, E>) -> Option<Ordering> {
        if self.comparable(other) {
            Some(self.pos.index().cmp(&other.pos.index()))
        } else {
            None
        }
    }
}

impl<T, D: Direction> fmt::Debug for Cursor<'_, T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.pos.index())
            .field("len", &self.window.len())
            .field("reversed", &D::REVERSED)
            .finish()
    }
}

/// A mutable random-access cursor.
///
/// Same positioning rules as [`Cursor`], but it can write through to the
/// element under it. It is neither `Clone` nor `Copy`, so there is no
/// post-increment; reborrow with [`as_cursor`](Self::as_cursor) to compare
/// positions or measure distances.
pub struct CursorMut<'a, T, D: Direction = Forward> {
    window: WindowMut<'a, T>,
    pos: Position<D>,
}

impl<'a, T, D: Direction> CursorMut<'a, T, D> {
    pub(crate) fn new(window: WindowMut<'a, T>, index: usize) -> Self {
        Self {
            window,
            pos: Position::at(index),
        }
    }

    #[must_use]
    pub fn index(&self) -> isize {
        self.pos.index()
    }

    #[must_use]
    pub fn get(&self) -> Option<&T> {
        let slot = self.pos.slot(self.window.len())?;
        // SAFETY: live slot, shared for the borrow of self
        self.window.slot_ptr(slot).map(|ptr| unsafe { &*ptr })
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        let slot = self.pos.slot(self.window.len())?;
        // SAFETY: live slot, exclusive for the borrow of self
        self.window.slot_ptr(slot).map(|ptr| unsafe { &mut *ptr })
    }

    /// Consumes the cursor, returning a reference that lives as long as the
    /// container borrow.
    #[must_use]
    pub fn into_mut(self) -> Option<&'a mut T> {
        let slot = self.pos.slot(self.window.len())?;
        // SAFETY: live slot; the cursor gives up its exclusive borrow
        self.window.slot_ptr(slot).map(|ptr| unsafe { &mut *ptr })
    }

    /// Replaces the element under the cursor, returning the old value.
    pub fn replace(&mut self, value: T) -> Option<T> {
        self.get_mut().map(|slot| core::mem::replace(slot, value))
    }

    #[must_use]
    pub fn is_end(&self) -> bool {
        usize::try_from(self.pos.index()).is_ok_and(|index| index >= self.window.len())
    }

    pub fn move_next(&mut self) -> &mut Self {
        self.pos.offset(1);
        self
    }

    pub fn move_prev(&mut self) -> &mut Self {
        self.pos.offset(-1);
        self
    }

    /// A shared cursor at the same position, borrowing from this one.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, T, D> {
        Cursor {
            window: self.window.as_window(),
            pos: self.pos,
        }
    }
}

impl<T, D: Direction> AddAssign<isize> for CursorMut<'_, T, D> {
    fn add_assign(&mut self, rhs: isize) {
        self.pos.offset(rhs);
    }
}

impl<T, D: Direction> SubAssign<isize> for CursorMut<'_, T, D> {
    fn sub_assign(&mut self, rhs: isize) {
        self.pos.offset(rhs.wrapping_neg());
    }
}

impl<T, D: Direction> fmt::Debug for CursorMut<'_, T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("index", &self.pos.index())
            .field("len", &self.window.len())
            .field("reversed", &D::REVERSED)
            .finish()
    }
}

// SAFETY: a window is a borrow of `T`s; it is as thread-safe as `&T` / `&mut T`
unsafe impl<T: Sync> Send for Window<'_, T> {}
unsafe impl<T: Sync> Sync for Window<'_, T> {}
unsafe impl<T: Send> Send for WindowMut<'_, T> {}
unsafe impl<T: Sync> Sync for WindowMut<'_, T> {}
