use core::mem::size_of;
use core::ptr::{self, NonNull};

use crate::allocator::Allocator;
use crate::error::ArrayError;

/// An owned block of `cap` uninitialised slots together with the allocator
/// that produced it.
///
/// `RawBuf` releases its block on drop but never drops the values stored in
/// it: tracking which slots are live is the owner's job.
pub(crate) struct RawBuf<T, A: Allocator> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: A,
}

impl<T, A: Allocator> RawBuf<T, A> {
    /// A buffer of zero capacity. Never touches the allocator.
    pub(crate) fn dangling(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            alloc,
        }
    }

    pub(crate) fn with_capacity_in(cap: usize, alloc: A) -> Result<Self, ArrayError> {
        if cap == 0 || size_of::<T>() == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap,
                alloc,
            });
        }

        match alloc.allocate::<T>(cap) {
            Ok(ptr) => Ok(Self { ptr, cap, alloc }),
            Err(err) => {
                log::debug!("allocation of {cap} slots failed: {err}");
                Err(err)
            }
        }
    }

    #[inline]
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Moves the first `len` slots into a fresh block of `new_cap` slots and
    /// adopts it. On error nothing has changed.
    ///
    /// # Safety
    ///
    /// Slots `[0, len)` must be initialised and `len <= new_cap`,
    /// `len <= self.capacity()`.
    pub(crate) unsafe fn reallocate(
        &mut self,
        len: usize,
        new_cap: usize,
    ) -> Result<(), ArrayError> {
        debug_assert!(len <= new_cap && len <= self.cap);

        let fresh = Self::with_capacity_in(new_cap, self.alloc.clone())?;
        // Bitwise moves cannot fail, so the transfer is all-or-nothing.
        unsafe { ptr::copy_nonoverlapping(self.ptr.as_ptr(), fresh.ptr.as_ptr(), len) };
        log::trace!("reallocated array storage: {} -> {} slots", self.cap, new_cap);

        // The old block drops here with its slots treated as uninitialised.
        *self = fresh;
        Ok(())
    }
}

impl<T, A: Allocator> Drop for RawBuf<T, A> {
    fn drop(&mut self) {
        if self.cap != 0 && size_of::<T>() != 0 {
            unsafe { self.alloc.deallocate(self.ptr, self.cap) };
        }
    }
}
