//! # Offset-Base Arrays
//!
//! This module provides [`OffsetVec`], a growable contiguous array whose
//! first index is a configurable base rather than a hard-coded 0.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  SharedOffsetVec   (Arc<RwLock<OffsetVec>>)   │
//! ├──────────────────────────────────────────────┤
//! │  OffsetVec<T, B: IndexBase>                   │
//! │    biased origin, len, growth policy          │
//! │    checked / unchecked indexed access         │
//! ├───────────────────────┬──────────────────────┤
//! │  IndexBase            │  GrowthPolicy        │
//! │  RuntimeBase, ConstBase│  factor, min cap    │
//! ├───────────────────────┴──────────────────────┤
//! │  RawStorage<T>  (alloc / realloc / dealloc)   │
//! ├──────────────────────────────────────────────┤
//! │  MemoryBudget   (optional byte accounting)    │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Key Property
//!
//! Translating a caller index into a slot costs nothing per access beyond
//! what a 0-based array pays: the base is folded into the stored origin
//! whenever the backing block changes, and `get(i)` addresses `biased + i`.
//!
//! ## Module Overview
//!
//! - `offset_vec`: the container and its trait impls
//! - `base`: runtime and compile-time index bases
//! - `growth`: capacity policy for pushes into a full block
//! - `raw`: ownership of the backing block, budget charging
//! - `builder`: fluent configuration
//! - `shared`: reader/writer-locked handle for multi-threaded use
//! - `error`: `ArrayError` and `AllocationError`

mod base;
mod builder;
mod error;
mod growth;
mod offset_vec;
mod raw;
mod shared;

pub use base::{ConstBase, IndexBase, OneBased, RuntimeBase, ZeroBased};
pub use builder::OffsetVecBuilder;
pub use error::{AllocationError, ArrayError};
pub use growth::GrowthPolicy;
pub use offset_vec::{Indexed, IndexedMut, Iter, IterMut, OffsetVec};
pub use shared::SharedOffsetVec;
