//! # Shared Offset Vector
//!
//! `OffsetVec` is single-threaded: growth moves the block and invalidates
//! every outstanding reference. `SharedOffsetVec` puts one vector behind an
//! `Arc<RwLock<..>>` so several threads can use it.
//!
//! ## Locking
//!
//! | Operation                        | Lock       |
//! |----------------------------------|------------|
//! | `get_cloned`, `len`, `read`      | shared     |
//! | `set`, `push`, `truncate`, `write` | exclusive |
//!
//! A push that grows the block holds the exclusive lock for the whole
//! relocation, so no reader can observe the old block after it is freed.
//! References never escape a lock guard: `read` and `write` hand a borrow to
//! a closure and release the lock when it returns.

use std::sync::Arc;

use eyre::{Result, WrapErr};
use parking_lot::RwLock;

use super::base::{IndexBase, RuntimeBase};
use super::error::ArrayError;
use super::offset_vec::OffsetVec;

pub struct SharedOffsetVec<T, B: IndexBase = RuntimeBase> {
    inner: Arc<RwLock<OffsetVec<T, B>>>,
}

impl<T, B: IndexBase> Clone for SharedOffsetVec<T, B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, B: IndexBase> SharedOffsetVec<T, B> {
    pub fn new(vec: OffsetVec<T, B>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(vec)),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn first_index(&self) -> isize {
        self.inner.read().first_index()
    }

    pub fn get_cloned(&self, index: isize) -> Result<T, ArrayError>
    where
        T: Clone,
    {
        self.inner.read().get(index).cloned()
    }

    pub fn set(&self, index: isize, value: T) -> Result<T, ArrayError> {
        self.inner.write().set(index, value)
    }

    /// Appends `value` and returns the index it was stored at.
    pub fn push(&self, value: T) -> Result<isize, ArrayError> {
        let mut guard = self.inner.write();
        let index = guard.end_index();
        guard.push(value)?;
        Ok(index)
    }

    pub fn truncate(&self, new_len: usize) {
        self.inner.write().truncate(new_len);
    }

    /// Runs `f` with shared access to the vector.
    pub fn read<R>(&self, f: impl FnOnce(&OffsetVec<T, B>) -> R) -> R {
        f(&self.inner.read())
    }

    /// Runs `f` with exclusive access to the vector.
    pub fn write<R>(&self, f: impl FnOnce(&mut OffsetVec<T, B>) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Appends every item under one exclusive lock. Appends nothing when any
    /// of the pushes fails.
    pub fn extend_locked<I>(&self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let mut guard = self.inner.write();
        let start = guard.len();
        guard
            .try_extend(items)
            .wrap_err_with(|| format!("failed to extend shared offset vector of length {}", start))
    }

    /// Takes the vector back when this is the last handle.
    pub fn try_unwrap(self) -> std::result::Result<OffsetVec<T, B>, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(lock) => Ok(lock.into_inner()),
            Err(inner) => Err(Self { inner }),
        }
    }
}

impl<T, B: IndexBase> From<OffsetVec<T, B>> for SharedOffsetVec<T, B> {
    fn from(vec: OffsetVec<T, B>) -> Self {
        Self::new(vec)
    }
}
