use core::alloc::Layout;
use core::ptr::{self, NonNull};

use crate::error::ArrayError;

/// Raw memory capability consumed by [`DynArray`](crate::DynArray).
///
/// The container only ever asks for blocks of whole elements, so the
/// capability is expressed in element counts rather than byte layouts.
/// Containers never forward zero-sized requests: a block of zero capacity, or
/// a block of a zero-sized type, is represented by a dangling pointer and
/// never reaches the allocator.
///
/// Implementations are expected to be cheap handles; the container clones
/// its allocator when it needs a second block (reallocation, staging an
/// insertion, cloning the container).
pub trait Allocator: Clone {
    /// Acquires uninitialised storage for `count` values of `T`.
    ///
    /// # Errors
    ///
    /// Returns `ArrayError::CapacityOverflow` if the block size cannot be
    /// represented, or `ArrayError::AllocFailed` if no memory is available.
    fn allocate<T>(&self, count: usize) -> Result<NonNull<T>, ArrayError>;

    /// Releases a block obtained from [`allocate`](Self::allocate).
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate::<T>(count)` on an equivalent allocator
    /// and must not be used afterwards. Live values in the block are not
    /// dropped.
    unsafe fn deallocate<T>(&self, ptr: NonNull<T>, count: usize);

    /// Constructs `value` in place at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes and properly aligned. Whatever the slot
    /// held before is overwritten without being dropped.
    unsafe fn construct<T>(&self, ptr: NonNull<T>, value: T) {
        unsafe { ptr.as_ptr().write(value) };
    }

    /// Drops the value at `ptr` in place, leaving the slot uninitialised.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a live, properly aligned value that is not used
    /// again until it is reconstructed.
    unsafe fn destroy<T>(&self, ptr: NonNull<T>) {
        unsafe { ptr::drop_in_place(ptr.as_ptr()) };
    }
}

pub(crate) fn array_layout<T>(count: usize) -> Result<Layout, ArrayError> {
    Layout::array::<T>(count).map_err(|_| ArrayError::CapacityOverflow { requested: count })
}

/// The platform heap, reached through the global allocator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Global;

impl Allocator for Global {
    fn allocate<T>(&self, count: usize) -> Result<NonNull<T>, ArrayError> {
        let layout = array_layout::<T>(count)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        // SAFETY: the layout has a non-zero size
        let raw = unsafe { alloc::alloc::alloc(layout) };
        NonNull::new(raw.cast::<T>()).ok_or(ArrayError::AllocFailed {
            size: layout.size(),
            align: layout.align(),
        })
    }

    unsafe fn deallocate<T>(&self, ptr: NonNull<T>, count: usize) {
        let Ok(layout) = array_layout::<T>(count) else {
            return;
        };
        if layout.size() != 0 {
            unsafe { alloc::alloc::dealloc(ptr.as_ptr().cast::<u8>(), layout) };
        }
    }
}
