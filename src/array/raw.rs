//! # Raw Storage
//!
//! `RawStorage<T>` owns one contiguous block of uninitialized slots for `T`.
//! It knows nothing about which slots are live or about index bases: it only
//! allocates, resizes and releases the block, and charges the attached
//! [`MemoryBudget`] for every byte it holds.
//!
//! ## Allocation Events
//!
//! ```text
//! with_capacity(n)     alloc(Layout::array::<T>(n))
//! resize(n), n > cap   budget.allocate(delta) -> realloc  (refund on failure)
//! resize(n), n < cap   realloc -> budget.release(delta)
//! resize(0)            dealloc -> budget.release(all)
//! drop                 dealloc -> budget.release(all)
//! ```
//!
//! Every event may move the block, so the owner must re-derive anything
//! computed from [`RawStorage::origin`] after calling a mutating method.
//!
//! ## Zero-Sized Types
//!
//! Blocks for zero-sized `T` are never allocated. The origin is a dangling,
//! well-aligned pointer and the capacity is reported as `usize::MAX`.

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem::{self, ManuallyDrop};
use std::ptr::NonNull;
use std::sync::Arc;

use super::error::AllocationError;
use crate::config::MAX_ALLOC_BYTES;
use crate::memory::MemoryBudget;

#[derive(Debug)]
pub(crate) struct RawStorage<T> {
    origin: NonNull<T>,
    capacity: usize,
    budget: Option<Arc<MemoryBudget>>,
    _owns: PhantomData<T>,
}

// SAFETY: RawStorage exclusively owns its block; sending or sharing it is as
// safe as sending or sharing the `T` values stored in it.
unsafe impl<T: Send> Send for RawStorage<T> {}
unsafe impl<T: Sync> Sync for RawStorage<T> {}

impl<T> RawStorage<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    pub(crate) fn new(budget: Option<Arc<MemoryBudget>>) -> Self {
        Self {
            origin: NonNull::dangling(),
            capacity: if Self::IS_ZST { usize::MAX } else { 0 },
            budget,
            _owns: PhantomData,
        }
    }

    pub(crate) fn with_capacity(
        capacity: usize,
        budget: Option<Arc<MemoryBudget>>,
    ) -> Result<Self, AllocationError> {
        let mut raw = Self::new(budget);
        raw.resize(capacity)?;
        Ok(raw)
    }

    /// Adopts the block of a `Vec` that has been taken apart.
    ///
    /// # Safety
    ///
    /// `origin` and `capacity` must come from a `Vec<T>` that will not be
    /// used or dropped again.
    pub(crate) unsafe fn from_vec_parts(origin: NonNull<T>, capacity: usize) -> Self {
        Self {
            origin,
            capacity: if Self::IS_ZST { usize::MAX } else { capacity },
            budget: None,
            _owns: PhantomData,
        }
    }

    #[inline(always)]
    pub(crate) fn origin(&self) -> *mut T {
        self.origin.as_ptr()
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn budget(&self) -> Option<&Arc<MemoryBudget>> {
        self.budget.as_ref()
    }

    /// Bytes currently held by the block.
    pub(crate) fn allocated_bytes(&self) -> usize {
        if Self::IS_ZST {
            0
        } else {
            self.capacity * mem::size_of::<T>()
        }
    }

    fn layout_for(capacity: usize) -> Result<Layout, AllocationError> {
        match Layout::array::<T>(capacity) {
            Ok(layout) if layout.size() <= MAX_ALLOC_BYTES => Ok(layout),
            _ => Err(AllocationError::CapacityOverflow {
                requested: capacity,
            }),
        }
    }

    /// Moves the block to one with exactly `new_capacity` slots.
    ///
    /// The first `min(capacity, new_capacity)` slots keep their bytes. On
    /// error the block, capacity and budget charge are unchanged.
    pub(crate) fn resize(&mut self, new_capacity: usize) -> Result<(), AllocationError> {
        if Self::IS_ZST || new_capacity == self.capacity {
            return Ok(());
        }
        if new_capacity == 0 {
            self.release();
            return Ok(());
        }

        let new_layout = Self::layout_for(new_capacity)?;
        let old_bytes = self.allocated_bytes();
        let new_bytes = new_layout.size();

        if new_bytes > old_bytes {
            if let Some(budget) = &self.budget {
                budget.allocate(new_bytes - old_bytes)?;
            }
        }

        let ptr = if self.capacity == 0 {
            // SAFETY: new_layout has a non-zero size (T is not zero-sized and
            // new_capacity > 0).
            unsafe { alloc::alloc(new_layout) }
        } else {
            // SAFETY: the block was allocated with this exact layout by a
            // previous resize (or by Vec, which uses Layout::array as well),
            // and new_bytes is non-zero and no larger than isize::MAX.
            unsafe {
                let old_layout =
                    Layout::from_size_align_unchecked(old_bytes, mem::align_of::<T>());
                alloc::realloc(self.origin.as_ptr().cast::<u8>(), old_layout, new_bytes)
            }
        };

        let Some(origin) = NonNull::new(ptr.cast::<T>()) else {
            if new_bytes > old_bytes {
                if let Some(budget) = &self.budget {
                    budget.release(new_bytes - old_bytes);
                }
            }
            return Err(AllocationError::AllocatorFailure { bytes: new_bytes });
        };

        if new_bytes < old_bytes {
            if let Some(budget) = &self.budget {
                budget.release(old_bytes - new_bytes);
            }
        }

        self.origin = origin;
        self.capacity = new_capacity;
        Ok(())
    }

    /// Frees the block and returns to the unallocated state.
    pub(crate) fn release(&mut self) {
        if Self::IS_ZST || self.capacity == 0 {
            return;
        }

        let bytes = self.allocated_bytes();
        // SAFETY: capacity > 0 means the block was allocated with this layout.
        unsafe {
            let layout = Layout::from_size_align_unchecked(bytes, mem::align_of::<T>());
            alloc::dealloc(self.origin.as_ptr().cast::<u8>(), layout);
        }
        if let Some(budget) = &self.budget {
            budget.release(bytes);
        }

        self.origin = NonNull::dangling();
        self.capacity = 0;
    }

    /// Gives up ownership of the block without freeing it.
    ///
    /// The budget is credited, since the bytes leave its accounting.
    pub(crate) fn into_raw_parts(self) -> (NonNull<T>, usize) {
        let me = ManuallyDrop::new(self);
        if let Some(budget) = &me.budget {
            budget.release(me.allocated_bytes());
        }
        // SAFETY: `me` is never dropped, so the Arc is moved out exactly once.
        let budget = unsafe { std::ptr::read(&me.budget) };
        drop(budget);
        (me.origin, me.capacity)
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        self.release();
    }
}
