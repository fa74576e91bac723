//! # OffsetVec
//!
//! A contiguous, growable array whose valid indices are
//! `[base, base + len)` for a configurable `base` (0, 1, or any `isize`).
//!
//! ## Biased Origin
//!
//! Instead of subtracting `base` on every access, the vector stores a
//! pointer that has already been moved `base` slots *backwards* from the
//! start of the block:
//!
//! ```text
//!            biased = origin - base          origin
//!                 │                             │
//!                 ▼                             ▼
//!   . . . . . . . ┆ (not owned, never read) ┆ [ e0 | e1 | e2 | ... | e(len-1) | spare ]
//!                                             index: base  base+1       base+len-1
//!
//!   address(i) = biased + i
//! ```
//!
//! `biased` is re-derived only when the block changes: construction,
//! growth, `shrink_to_fit` and `rebase`. `get`/`set` and their unchecked
//! forms add the caller's index to it and nothing else. The pointer is
//! formed with `wrapping_offset`, so it may point outside the block; it is
//! only dereferenced at offsets that land inside the live prefix.
//!
//! ## Bounds Checks
//!
//! Checked accessors test `(i - base) as usize < len` with wrapping
//! arithmetic, a single unsigned comparison that rejects indices on both
//! sides of the range. The unchecked accessors skip it and make an
//! out-of-range index undefined behaviour.
//!
//! ## Lifecycle
//!
//! | Operation        | Elements            | Capacity           | Bias recomputed |
//! |------------------|---------------------|--------------------|-----------------|
//! | `create`         | default-filled      | exactly `len`      | yes             |
//! | `push`           | +1                  | grows when full    | on growth       |
//! | `pop`/`truncate` | dropped from tail   | kept               | no              |
//! | `clear`          | all dropped         | kept               | no              |
//! | `shrink_to_fit`  | unchanged           | reduced to `len`   | yes             |
//! | `rebase`         | unchanged           | unchanged          | yes             |
//! | drop             | all dropped         | released once      | -               |

use std::fmt;
use std::iter::Zip;
use std::mem::{self, ManuallyDrop};
use std::ops::{Index, IndexMut, Range};
use std::ptr::{self, NonNull};
use std::slice;
use std::sync::Arc;

use super::base::{ConstBase, IndexBase, RuntimeBase};
use super::error::{AllocationError, ArrayError};
use super::growth::GrowthPolicy;
use super::raw::RawStorage;
use crate::memory::MemoryBudget;

/// Growable array indexed from a configurable base.
pub struct OffsetVec<T, B: IndexBase = RuntimeBase> {
    /// `origin - base`. Dereferenced only at indices in `[base, base + len)`.
    biased: *mut T,
    len: usize,
    base: B,
    growth: GrowthPolicy,
    buf: RawStorage<T>,
}

// SAFETY: OffsetVec exclusively owns its elements, like Vec<T>.
unsafe impl<T: Send, B: IndexBase + Send> Send for OffsetVec<T, B> {}
unsafe impl<T: Sync, B: IndexBase + Sync> Sync for OffsetVec<T, B> {}

pub type Iter<'a, T> = slice::Iter<'a, T>;
pub type IterMut<'a, T> = slice::IterMut<'a, T>;
pub type Indexed<'a, T> = Zip<Range<isize>, slice::Iter<'a, T>>;
pub type IndexedMut<'a, T> = Zip<Range<isize>, slice::IterMut<'a, T>>;

/// Returns `base + len` when the whole range fits in `isize`.
#[inline]
fn index_space_end(base: isize, len: usize) -> Result<isize, ArrayError> {
    base.checked_add_unsigned(len)
        .ok_or(ArrayError::IndexSpaceOverflow { base, len })
}

impl<T> OffsetVec<T, RuntimeBase> {
    /// Creates an empty vector. Does not allocate.
    pub fn new(base: isize) -> Self {
        Self::new_in(RuntimeBase(base))
    }

    /// Creates a vector of `initial_length` default values at indices
    /// `[base, base + initial_length)`.
    pub fn create(base: isize, initial_length: usize) -> Result<Self, ArrayError>
    where
        T: Default,
    {
        Self::create_in(RuntimeBase(base), initial_length)
    }

    pub fn with_capacity(base: isize, capacity: usize) -> Result<Self, ArrayError> {
        Self::with_capacity_in(RuntimeBase(base), capacity)
    }

    pub fn from_elem(base: isize, len: usize, value: T) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        Self::from_elem_in(RuntimeBase(base), len, value)
    }

    /// Adopts the elements and the allocation of `vec`. `vec[0]` becomes
    /// index `base`.
    pub fn from_vec(base: isize, vec: Vec<T>) -> Result<Self, ArrayError> {
        Self::from_vec_in(RuntimeBase(base), vec)
    }

    /// Moves the whole index range so that it starts at `new_base`.
    ///
    /// Elements stay where they are; only the biased origin is re-derived.
    pub fn rebase(&mut self, new_base: isize) -> Result<(), ArrayError> {
        index_space_end(new_base, self.len)?;
        let old_base = self.first_index();
        self.base = RuntimeBase(new_base);
        self.rebias();
        log::trace!(
            "offset vector rebased: {} -> {}, len {}",
            old_base,
            new_base,
            self.len
        );
        Ok(())
    }
}

impl<T, const L: isize> OffsetVec<T, ConstBase<L>> {
    pub fn new_const() -> Self {
        Self::new_in(ConstBase)
    }

    pub fn create_const(initial_length: usize) -> Result<Self, ArrayError>
    where
        T: Default,
    {
        Self::create_in(ConstBase, initial_length)
    }

    pub fn with_capacity_const(capacity: usize) -> Result<Self, ArrayError> {
        Self::with_capacity_in(ConstBase, capacity)
    }

    pub fn from_vec_const(vec: Vec<T>) -> Result<Self, ArrayError> {
        Self::from_vec_in(ConstBase, vec)
    }
}

impl<T, B: IndexBase> OffsetVec<T, B> {
    fn from_storage(base: B, growth: GrowthPolicy, buf: RawStorage<T>) -> Self {
        let mut v = Self {
            biased: ptr::null_mut(),
            len: 0,
            base,
            growth,
            buf,
        };
        v.rebias();
        v
    }

    pub fn new_in(base: B) -> Self {
        Self::from_storage(base, GrowthPolicy::default(), RawStorage::new(None))
    }

    pub fn with_capacity_in(base: B, capacity: usize) -> Result<Self, ArrayError> {
        Self::with_options(base, capacity, GrowthPolicy::default(), None)
    }

    pub(crate) fn with_options(
        base: B,
        capacity: usize,
        growth: GrowthPolicy,
        budget: Option<Arc<MemoryBudget>>,
    ) -> Result<Self, ArrayError> {
        let buf = RawStorage::with_capacity(capacity, budget)?;
        let v = Self::from_storage(base, growth, buf);
        log::trace!(
            "offset vector allocated: capacity {}, base {}",
            v.capacity(),
            v.first_index()
        );
        Ok(v)
    }

    pub fn create_in(base: B, initial_length: usize) -> Result<Self, ArrayError>
    where
        T: Default,
    {
        index_space_end(base.base(), initial_length)?;
        let mut v = Self::with_capacity_in(base, initial_length)?;
        v.fill_with(initial_length, T::default)?;
        Ok(v)
    }

    pub fn from_elem_in(base: B, len: usize, value: T) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        index_space_end(base.base(), len)?;
        let mut v = Self::with_capacity_in(base, len)?;
        v.fill_with(len, || value.clone())?;
        Ok(v)
    }

    pub fn from_vec_in(base: B, vec: Vec<T>) -> Result<Self, ArrayError> {
        index_space_end(base.base(), vec.len())?;

        let mut vec = ManuallyDrop::new(vec);
        let len = vec.len();
        let capacity = vec.capacity();
        // SAFETY: Vec's pointer is never null, and `vec` is never touched
        // again, so its block is adopted exactly once.
        let buf = unsafe {
            RawStorage::from_vec_parts(NonNull::new_unchecked(vec.as_mut_ptr()), capacity)
        };

        let mut v = Self::from_storage(base, GrowthPolicy::default(), buf);
        v.len = len;
        Ok(v)
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub fn base(&self) -> B {
        self.base
    }

    /// The smallest valid index.
    #[inline(always)]
    pub fn first_index(&self) -> isize {
        self.base.base()
    }

    /// One past the largest valid index.
    #[inline]
    pub fn end_index(&self) -> isize {
        // base + len always fits in isize; wrapping keeps the cast of large
        // zero-sized-type lengths correct.
        self.first_index().wrapping_add(self.len as isize)
    }

    pub fn indices(&self) -> Range<isize> {
        self.first_index()..self.end_index()
    }

    #[inline(always)]
    pub fn contains_index(&self, index: isize) -> bool {
        (index.wrapping_sub(self.first_index()) as usize) < self.len
    }

    pub fn growth_policy(&self) -> GrowthPolicy {
        self.growth
    }

    pub fn set_growth_policy(&mut self, growth: GrowthPolicy) {
        self.growth = growth;
    }

    pub fn memory_budget(&self) -> Option<&Arc<MemoryBudget>> {
        self.buf.budget()
    }

    #[cold]
    #[inline(never)]
    fn out_of_range(&self, index: isize) -> ArrayError {
        ArrayError::IndexOutOfRange {
            index,
            first: self.first_index(),
            end: self.end_index(),
        }
    }

    #[inline(always)]
    fn rebias(&mut self) {
        self.biased = self
            .buf
            .origin()
            .wrapping_offset(self.first_index().wrapping_neg());
    }

    #[inline(always)]
    fn slot(&self, index: isize) -> *mut T {
        self.biased.wrapping_offset(index)
    }

    #[inline]
    pub fn get(&self, index: isize) -> Result<&T, ArrayError> {
        if self.contains_index(index) {
            // SAFETY: index is inside [base, base + len), so the slot is an
            // initialized element of the current block.
            Ok(unsafe { &*self.slot(index) })
        } else {
            Err(self.out_of_range(index))
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: isize) -> Result<&mut T, ArrayError> {
        if self.contains_index(index) {
            // SAFETY: as in get; &mut self gives exclusive access.
            Ok(unsafe { &mut *self.slot(index) })
        } else {
            Err(self.out_of_range(index))
        }
    }

    /// Stores `value` at `index` and returns the value it replaced.
    #[inline]
    pub fn set(&mut self, index: isize, value: T) -> Result<T, ArrayError> {
        self.get_mut(index).map(|slot| mem::replace(slot, value))
    }

    /// # Safety
    ///
    /// `index` must lie in `[first_index(), end_index())`.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: isize) -> &T {
        debug_assert!(self.contains_index(index), "get_unchecked index {} out of range", index);
        &*self.slot(index)
    }

    /// # Safety
    ///
    /// `index` must lie in `[first_index(), end_index())`.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: isize) -> &mut T {
        debug_assert!(self.contains_index(index), "get_unchecked_mut index {} out of range", index);
        &mut *self.slot(index)
    }

    /// Stores `value` at `index`, dropping the previous element.
    ///
    /// # Safety
    ///
    /// `index` must lie in `[first_index(), end_index())`.
    #[inline(always)]
    pub unsafe fn set_unchecked(&mut self, index: isize, value: T) {
        debug_assert!(self.contains_index(index), "set_unchecked index {} out of range", index);
        *self.slot(index) = value;
    }

    pub fn swap(&mut self, a: isize, b: isize) -> Result<(), ArrayError> {
        if !self.contains_index(a) {
            return Err(self.out_of_range(a));
        }
        if !self.contains_index(b) {
            return Err(self.out_of_range(b));
        }
        // SAFETY: both slots are live; ptr::swap handles a == b.
        unsafe { ptr::swap(self.slot(a), self.slot(b)) };
        Ok(())
    }

    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Appends `value` at index `end_index()`.
    ///
    /// When the block is full it is replaced by one chosen by the growth
    /// policy. On failure the vector is unchanged and `value` is dropped.
    #[inline]
    pub fn push(&mut self, value: T) -> Result<(), ArrayError> {
        if self.len == self.capacity() {
            self.reserve(1)?;
        } else {
            index_space_end(self.first_index(), self.len + 1)?;
        }
        let index = self.end_index();
        // SAFETY: len < capacity, so the slot at base + len is inside the
        // block and currently uninitialized.
        unsafe { self.slot(index).write(value) };
        self.len += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot at the old last index is initialized and is no
        // longer counted by len, so it is read out exactly once.
        Some(unsafe { self.slot(self.end_index()).read() })
    }

    /// Makes room for at least `additional` more elements, growing by the
    /// growth policy.
    pub fn reserve(&mut self, additional: usize) -> Result<(), ArrayError> {
        let required = self.required_capacity(additional)?;
        if required <= self.capacity() {
            return Ok(());
        }
        let new_capacity =
            self.growth
                .next_capacity(self.capacity(), required, mem::size_of::<T>());
        self.reallocate(new_capacity)
    }

    /// Makes room for exactly `additional` more elements.
    pub fn reserve_exact(&mut self, additional: usize) -> Result<(), ArrayError> {
        let required = self.required_capacity(additional)?;
        if required <= self.capacity() {
            return Ok(());
        }
        self.reallocate(required)
    }

    fn required_capacity(&self, additional: usize) -> Result<usize, ArrayError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(AllocationError::CapacityOverflow {
                requested: usize::MAX,
            })?;
        index_space_end(self.first_index(), required)?;
        Ok(required)
    }

    /// Moves the elements to a block of `new_capacity` slots and re-derives
    /// the biased origin.
    fn reallocate(&mut self, new_capacity: usize) -> Result<(), ArrayError> {
        debug_assert!(new_capacity >= self.len);
        let old_capacity = self.capacity();
        self.buf.resize(new_capacity)?;
        self.rebias();
        log::trace!(
            "offset vector reallocated: capacity {} -> {}, base {}, len {}",
            old_capacity,
            self.capacity(),
            self.first_index(),
            self.len
        );
        Ok(())
    }

    /// Releases spare capacity. The block is freed when the vector is empty.
    pub fn shrink_to_fit(&mut self) -> Result<(), ArrayError> {
        if mem::size_of::<T>() == 0 || self.capacity() == self.len {
            return Ok(());
        }
        self.reallocate(self.len)
    }

    /// Drops the elements at logical positions `new_len..len`. Capacity is kept.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail_len = self.len - new_len;
        // SAFETY: slots [new_len, len) are initialized. len is lowered before
        // dropping so a panicking destructor cannot lead to a double drop.
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.buf.origin().add(new_len), tail_len);
            self.len = new_len;
            ptr::drop_in_place(tail);
        }
    }

    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Grows with values from `f` or truncates so that `len() == new_len`.
    pub fn resize_with<F>(&mut self, new_len: usize, f: F) -> Result<(), ArrayError>
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            Ok(())
        } else {
            self.fill_with(new_len - self.len, f)
        }
    }

    pub fn resize(&mut self, new_len: usize, value: T) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        self.resize_with(new_len, || value.clone())
    }

    pub(crate) fn fill_with<F>(&mut self, count: usize, mut f: F) -> Result<(), ArrayError>
    where
        F: FnMut() -> T,
    {
        self.reserve(count)?;
        for _ in 0..count {
            // SAFETY: reserve made room for `count` more slots; len is bumped
            // after each write so a panic in `f` leaves only live elements
            // counted.
            unsafe { self.buf.origin().add(self.len).write(f()) };
            self.len += 1;
        }
        Ok(())
    }

    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        self.reserve(items.len())?;
        for item in items {
            // SAFETY: reserve made room for items.len() more slots.
            unsafe { self.buf.origin().add(self.len).write(item.clone()) };
            self.len += 1;
        }
        Ok(())
    }

    /// Appends every item of `iter`.
    ///
    /// All or nothing: if a push fails, the items appended by this call are
    /// dropped again and the vector keeps its previous length. Capacity
    /// gained before the failure is kept.
    pub fn try_extend<I>(&mut self, iter: I) -> Result<(), ArrayError>
    where
        I: IntoIterator<Item = T>,
    {
        let start = self.len;
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(lower)?;
        for item in iter {
            if let Err(err) = self.push(item) {
                self.truncate(start);
                return Err(err);
            }
        }
        Ok(())
    }

    /// Copies the vector into a new block charged to the same budget.
    ///
    /// Prefer this over `clone` for budgeted vectors: a refused copy comes
    /// back as `ArrayError::Allocation` instead of a panic.
    pub fn try_clone(&self) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        let mut out = Self::with_options(
            self.base,
            self.len,
            self.growth,
            self.buf.budget().cloned(),
        )?;
        out.extend_from_slice(self.as_slice())?;
        Ok(out)
    }

    /// The live elements as a 0-based slice. `as_slice()[k]` is the element
    /// at index `first_index() + k`.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: origin is non-null and aligned, and the first len slots
        // are initialized.
        unsafe { slice::from_raw_parts(self.buf.origin(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in as_slice; &mut self gives exclusive access.
        unsafe { slice::from_raw_parts_mut(self.buf.origin(), self.len) }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Iterates `(index, &element)` pairs in the vector's own index space.
    pub fn indexed(&self) -> Indexed<'_, T> {
        self.indices().zip(self.as_slice().iter())
    }

    pub fn indexed_mut(&mut self) -> IndexedMut<'_, T> {
        let indices = self.indices();
        indices.zip(self.as_mut_slice().iter_mut())
    }

    /// Converts into a `Vec` without copying. Element `first_index() + k`
    /// becomes `vec[k]`.
    pub fn into_vec(self) -> Vec<T> {
        let me = ManuallyDrop::new(self);
        let len = me.len;
        // SAFETY: `me` is never dropped, so the storage is moved out once.
        let buf = unsafe { ptr::read(&me.buf) };
        let (origin, capacity) = buf.into_raw_parts();
        // SAFETY: the block was allocated by the global allocator with
        // Layout::array::<T>(capacity) and its first len slots are live.
        unsafe { Vec::from_raw_parts(origin.as_ptr(), len, capacity) }
    }
}

impl<T, B: IndexBase> Drop for OffsetVec<T, B> {
    fn drop(&mut self) {
        // SAFETY: the live prefix is dropped exactly once here; the storage
        // field frees the block afterwards.
        unsafe { ptr::drop_in_place(self.as_mut_slice() as *mut [T]) }
    }
}

impl<T, B: IndexBase> Index<isize> for OffsetVec<T, B> {
    type Output = T;

    #[inline]
    fn index(&self, index: isize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T, B: IndexBase> IndexMut<isize> for OffsetVec<T, B> {
    #[inline]
    fn index_mut(&mut self, index: isize) -> &mut T {
        if !self.contains_index(index) {
            panic!("{}", self.out_of_range(index));
        }
        // SAFETY: index checked above.
        unsafe { &mut *self.slot(index) }
    }
}

impl<T: Clone, B: IndexBase> Clone for OffsetVec<T, B> {
    /// # Panics
    ///
    /// Panics when the copy cannot be allocated, including when the shared
    /// memory budget refuses it. Use `try_clone` to handle that case.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(v) => v,
            Err(err) => panic!("failed to clone offset vector: {}", err),
        }
    }
}

impl<T: fmt::Debug, B: IndexBase> fmt::Debug for OffsetVec<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.indexed()).finish()
    }
}

impl<T, U, B1, B2> PartialEq<OffsetVec<U, B2>> for OffsetVec<T, B1>
where
    T: PartialEq<U>,
    B1: IndexBase,
    B2: IndexBase,
{
    fn eq(&self, other: &OffsetVec<U, B2>) -> bool {
        self.first_index() == other.first_index() && self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, B: IndexBase> Eq for OffsetVec<T, B> {}

impl<T, B: IndexBase + Default> Default for OffsetVec<T, B> {
    fn default() -> Self {
        Self::new_in(B::default())
    }
}

impl<T, B: IndexBase> AsRef<[T]> for OffsetVec<T, B> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, B: IndexBase> IntoIterator for OffsetVec<T, B> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'a, T, B: IndexBase> IntoIterator for &'a OffsetVec<T, B> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, B: IndexBase> IntoIterator for &'a mut OffsetVec<T, B> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::base::OneBased;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct DropCounter(Rc<Cell<usize>>);

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_create_fills_defaults() {
        let v = OffsetVec::<u32>::create(1, 10).unwrap();
        assert_eq!(v.len(), 10);
        assert_eq!(v.capacity(), 10);
        assert_eq!(v.first_index(), 1);
        assert_eq!(v.end_index(), 11);
        for i in 1..11 {
            assert_eq!(*v.get(i).unwrap(), 0);
        }
    }

    #[test]
    fn test_new_does_not_allocate() {
        let v = OffsetVec::<u64>::new(5);
        assert!(v.is_empty());
        assert_eq!(v.capacity(), 0);
        assert_eq!(v.indices(), 5..5);
    }

    #[test]
    fn test_get_rejects_both_sides() {
        let v = OffsetVec::<u8>::create(1, 3).unwrap();
        assert_eq!(
            v.get(0).unwrap_err(),
            ArrayError::IndexOutOfRange {
                index: 0,
                first: 1,
                end: 4
            }
        );
        assert!(v.get(4).unwrap_err().is_index_out_of_range());
        assert!(v.get(isize::MIN).is_err());
        assert!(v.get(isize::MAX).is_err());
    }

    #[test]
    fn test_set_returns_previous() {
        let mut v = OffsetVec::<i32>::create(1, 3).unwrap();
        assert_eq!(v.set(2, 7).unwrap(), 0);
        assert_eq!(v.set(2, 9).unwrap(), 7);
        assert_eq!(v[2], 9);
        assert!(v.set(0, 1).is_err());
        assert_eq!(v.as_slice(), &[0, 9, 0]);
    }

    #[test]
    fn test_negative_base() {
        let mut v = OffsetVec::from_vec(-3, vec![10, 20, 30, 40]).unwrap();
        assert_eq!(v[-3], 10);
        assert_eq!(v[0], 40);
        v[-1] = 35;
        assert_eq!(v.as_slice(), &[10, 20, 35, 40]);
        assert!(v.get(1).is_err());
        assert!(v.get(-4).is_err());
    }

    #[test]
    fn test_extreme_bases() {
        let v = OffsetVec::from_vec(isize::MIN, vec![1u8, 2, 3]).unwrap();
        assert_eq!(v[isize::MIN], 1);
        assert_eq!(v[isize::MIN + 2], 3);
        assert!(v.get(isize::MAX).is_err());

        let mut w = OffsetVec::<u8>::create(isize::MAX - 2, 2).unwrap();
        assert_eq!(w.end_index(), isize::MAX);
        assert_eq!(
            w.push(1).unwrap_err(),
            ArrayError::IndexSpaceOverflow {
                base: isize::MAX - 2,
                len: 3
            }
        );
        assert_eq!(w.len(), 2);
    }

    #[test]
    fn test_create_rejects_index_space_overflow() {
        let err = OffsetVec::<u8>::create(isize::MAX, 1).unwrap_err();
        assert_eq!(
            err,
            ArrayError::IndexSpaceOverflow {
                base: isize::MAX,
                len: 1
            }
        );
    }

    #[test]
    #[should_panic(expected = "index 0 out of range: valid indices are 1..3")]
    fn test_index_panics_out_of_range() {
        let v = OffsetVec::<u8>::create(1, 2).unwrap();
        let _ = v[0];
    }

    #[test]
    fn test_unchecked_access() {
        let mut v = OffsetVec::<u64>::create(1, 4).unwrap();
        unsafe {
            v.set_unchecked(1, 11);
            v.set_unchecked(4, 44);
            *v.get_unchecked_mut(2) += 22;
            assert_eq!(*v.get_unchecked(1), 11);
            assert_eq!(*v.get_unchecked(2), 22);
            assert_eq!(*v.get_unchecked(4), 44);
        }
    }

    #[test]
    fn test_push_grows_and_preserves() {
        let mut v = OffsetVec::<u64>::new(1);
        let mut capacities = Vec::new();
        for i in 0..100u64 {
            v.push(i * 3).unwrap();
            if capacities.last() != Some(&v.capacity()) {
                capacities.push(v.capacity());
            }
        }
        assert_eq!(capacities, vec![4, 8, 16, 32, 64, 128]);
        for (k, i) in v.indices().enumerate() {
            assert_eq!(v[i], k as u64 * 3);
        }
    }

    #[test]
    fn test_pop_and_truncate_keep_capacity() {
        let mut v = OffsetVec::from_vec(1, vec![1, 2, 3, 4, 5]).unwrap();
        let capacity = v.capacity();
        assert_eq!(v.pop(), Some(5));
        assert_eq!(v.end_index(), 5);
        v.truncate(2);
        assert_eq!(v.as_slice(), &[1, 2]);
        assert_eq!(v.capacity(), capacity);
        v.truncate(10);
        assert_eq!(v.len(), 2);
        v.clear();
        assert!(v.is_empty());
        assert_eq!(v.pop(), None);
        assert_eq!(v.capacity(), capacity);
    }

    #[test]
    fn test_shrink_to_fit_rebiases() {
        let mut v = OffsetVec::<u32>::with_capacity(1, 64).unwrap();
        for i in 0..10 {
            v.push(i).unwrap();
        }
        v.shrink_to_fit().unwrap();
        assert_eq!(v.capacity(), 10);
        for (k, i) in v.indices().enumerate() {
            assert_eq!(v[i], k as u32);
        }

        v.clear();
        v.shrink_to_fit().unwrap();
        assert_eq!(v.capacity(), 0);
        v.push(5).unwrap();
        assert_eq!(v[1], 5);
    }

    #[test]
    fn test_rebase_moves_indices() {
        let mut v = OffsetVec::from_vec(0, vec!['a', 'b', 'c']).unwrap();
        v.rebase(1).unwrap();
        assert_eq!(v[1], 'a');
        assert_eq!(v[3], 'c');
        assert!(v.get(0).is_err());

        v.rebase(-10).unwrap();
        assert_eq!(v[-8], 'c');
        assert!(v.rebase(isize::MAX - 1).is_err());
        assert_eq!(v.first_index(), -10);
    }

    #[test]
    fn test_const_base_matches_runtime_base() {
        let mut a = OffsetVec::<i64, OneBased>::create_const(5).unwrap();
        let mut b = OffsetVec::<i64>::create(1, 5).unwrap();
        for i in 1..=5 {
            a[i] = i as i64 * 10;
            b[i] = i as i64 * 10;
        }
        a.push(60).unwrap();
        b.push(60).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[6], 60);
        assert!(a.get(0).is_err());
    }

    #[test]
    fn test_swap() {
        let mut v = OffsetVec::from_vec(1, vec![1, 2, 3]).unwrap();
        v.swap(1, 3).unwrap();
        v.swap(2, 2).unwrap();
        assert_eq!(v.as_slice(), &[3, 2, 1]);
        assert!(v.swap(0, 1).is_err());
        assert!(v.swap(1, 4).is_err());
    }

    #[test]
    fn test_resize() {
        let mut v = OffsetVec::<u8>::create(1, 2).unwrap();
        v.resize(5, 9).unwrap();
        assert_eq!(v.as_slice(), &[0, 0, 9, 9, 9]);
        v.resize(1, 0).unwrap();
        assert_eq!(v.as_slice(), &[0]);
        let mut n = 0;
        v.resize_with(4, || {
            n += 1;
            n
        })
        .unwrap();
        assert_eq!(v.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_extend() {
        let mut v = OffsetVec::<u16>::new(1);
        v.extend_from_slice(&[1, 2, 3]).unwrap();
        v.try_extend(4..=6).unwrap();
        assert_eq!(v.as_slice(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(v[6], 6);
    }

    #[test]
    fn test_indexed_iteration() {
        let mut v = OffsetVec::from_vec(1, vec![5, 6, 7]).unwrap();
        let pairs: Vec<(isize, i32)> = v.indexed().map(|(i, x)| (i, *x)).collect();
        assert_eq!(pairs, vec![(1, 5), (2, 6), (3, 7)]);

        for (i, x) in v.indexed_mut() {
            *x += i as i32;
        }
        assert_eq!(v.as_slice(), &[6, 8, 10]);

        let sum: i32 = (&v).into_iter().sum();
        assert_eq!(sum, 24);
        for x in &mut v {
            *x = 0;
        }
        assert_eq!(v.into_iter().collect::<Vec<_>>(), vec![0, 0, 0]);
    }

    #[test]
    fn test_into_vec_round_trip_keeps_allocation() {
        let mut source = Vec::with_capacity(32);
        source.extend([1u32, 2, 3]);
        let ptr = source.as_ptr();

        let v = OffsetVec::from_vec(1, source).unwrap();
        assert_eq!(v.capacity(), 32);
        let back = v.into_vec();
        assert_eq!(back.as_ptr(), ptr);
        assert_eq!(back, vec![1, 2, 3]);
    }

    #[test]
    fn test_clone_and_eq() {
        let v = OffsetVec::from_vec(1, vec![String::from("a"), String::from("b")]).unwrap();
        let w = v.clone();
        assert_eq!(v, w);
        assert_eq!(w.capacity(), 2);

        let shifted = OffsetVec::from_vec(0, vec![String::from("a"), String::from("b")]).unwrap();
        assert_ne!(v, shifted);
    }

    #[test]
    fn test_debug_uses_own_indices() {
        let v = OffsetVec::from_vec(1, vec![10, 20]).unwrap();
        assert_eq!(format!("{:?}", v), "{1: 10, 2: 20}");
    }

    #[test]
    fn test_drops_each_element_once() {
        let drops = Rc::new(Cell::new(0));
        {
            let mut v = OffsetVec::new(1);
            for _ in 0..20 {
                v.push(DropCounter(Rc::clone(&drops))).unwrap();
            }
            v.truncate(15);
            assert_eq!(drops.get(), 5);
            drop(v.pop());
            assert_eq!(drops.get(), 6);
            v.set(1, DropCounter(Rc::clone(&drops))).unwrap();
            assert_eq!(drops.get(), 7);
            unsafe { v.set_unchecked(2, DropCounter(Rc::clone(&drops))) };
            assert_eq!(drops.get(), 8);
            v.shrink_to_fit().unwrap();
            assert_eq!(drops.get(), 8);
        }
        assert_eq!(drops.get(), 8 + 14);
    }

    #[test]
    fn test_zero_sized_elements() {
        let mut v = OffsetVec::<()>::create(1, 3).unwrap();
        assert_eq!(v.capacity(), usize::MAX);
        v.push(()).unwrap();
        assert_eq!(v.len(), 4);
        assert!(v.get(4).is_ok());
        assert!(v.get(5).is_err());
        v.shrink_to_fit().unwrap();
        assert_eq!(v.pop(), Some(()));
        assert_eq!(v.into_vec().len(), 3);
    }

    #[test]
    fn test_growth_policy_is_applied() {
        let mut v = OffsetVec::<u64>::new(1);
        v.set_growth_policy(GrowthPolicy::new(4).unwrap().with_min_capacity(2));
        v.push(1).unwrap();
        assert_eq!(v.capacity(), 2);
        v.push(2).unwrap();
        v.push(3).unwrap();
        assert_eq!(v.capacity(), 8);
    }

    #[test]
    fn test_reserve_exact() {
        let mut v = OffsetVec::<u8>::new(1);
        v.reserve_exact(13).unwrap();
        assert_eq!(v.capacity(), 13);
        v.reserve(13).unwrap();
        assert_eq!(v.capacity(), 13);
        assert!(matches!(
            v.reserve(usize::MAX).unwrap_err(),
            ArrayError::IndexSpaceOverflow { .. }
        ));
        assert_eq!(v.capacity(), 13);

        let mut w = OffsetVec::<u64>::new(0);
        assert!(matches!(
            w.reserve(isize::MAX as usize / 4).unwrap_err(),
            ArrayError::Allocation(AllocationError::CapacityOverflow { .. })
        ));
        assert_eq!(w.capacity(), 0);
    }

    #[test]
    fn test_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OffsetVec<u64>>();
        assert_send_sync::<OffsetVec<String, OneBased>>();
    }
}
