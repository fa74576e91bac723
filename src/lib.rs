//! # basevec - Offset-Base Arrays
//!
//! basevec provides [`OffsetVec`], a contiguous, growable array whose valid
//! indices start at a configurable base `L` (commonly 0 or 1) instead of a
//! hard-coded 0:
//!
//! - **Zero per-access translation**: the base is folded into a biased
//!   origin pointer once per allocation event, `get(i)` reads `biased + i`
//! - **Checked and unchecked access**: `get`/`set` report
//!   [`ArrayError::IndexOutOfRange`], `get_unchecked`/`set_unchecked` skip
//!   the test for proven-valid hot paths
//! - **Runtime or compile-time base**: [`RuntimeBase`] or [`ConstBase`]
//! - **Optional memory budget**: hard byte limits through [`MemoryBudget`]
//!
//! ## Quick Start
//!
//! ```ignore
//! use basevec::OffsetVec;
//!
//! let mut v = OffsetVec::<u32>::create(1, 1000)?;
//! v.set(1, 42)?;
//! for _ in 0..500 {
//!     v.push(7)?;
//! }
//! assert_eq!(*v.get(1)?, 42);
//! assert!(v.get(0).is_err());
//! assert!(v.get(1501).is_err());
//! ```
//!
//! ## Cost Model
//!
//! | Operation               | Cost                | Bias recomputed |
//! |-------------------------|---------------------|-----------------|
//! | `get` / `set`           | O(1), one compare   | no              |
//! | `get_unchecked`         | O(1), no compare    | no              |
//! | `push`                  | amortized O(1)      | on growth       |
//! | growth                  | O(n) relocation     | yes             |
//! | `shrink_to_fit`         | O(n) relocation     | yes             |
//!
//! Growth relocates the elements exactly as a 0-based `Vec` would, so a
//! non-zero base adds no asymptotic cost anywhere.
//!
//! ## Fallible Operations
//!
//! Everything that may allocate returns `Result<_, ArrayError>`, and a
//! failed call leaves the elements and indices untouched. The standard
//! traits cannot report errors, so two of them panic instead:
//!
//! | Panicking            | Fallible form             |
//! |----------------------|---------------------------|
//! | `v.clone()`          | `v.try_clone()?`          |
//! | `v[i]`, `v[i] = x`   | `v.get(i)?`, `v.set(i, x)?` |
//!
//! Vectors attached to a [`MemoryBudget`] should use the fallible forms,
//! since a budget refusal is an expected outcome there.
//!
//! ## Module Overview
//!
//! - [`array`]: `OffsetVec`, index bases, growth policy, shared handle
//! - [`memory`]: memory budget accounting
//! - [`config`]: centralized constants

pub mod array;
pub mod config;
pub mod memory;

pub use array::{
    AllocationError, ArrayError, ConstBase, GrowthPolicy, IndexBase, OffsetVec, OffsetVecBuilder,
    OneBased, RuntimeBase, SharedOffsetVec, ZeroBased,
};
pub use memory::{BudgetStats, MemoryBudget, MemoryError};
