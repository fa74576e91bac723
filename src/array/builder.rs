//! # OffsetVec Builder
//!
//! Fluent configuration for offset vectors that need more than a base and a
//! length: a preallocated capacity, a custom growth policy, or a shared
//! memory budget.
//!
//! ## Configuration Options
//!
//! | Option          | Default              | Description                              |
//! |-----------------|----------------------|------------------------------------------|
//! | base            | 0                    | First valid index                        |
//! | length          | 0                    | Number of initial elements               |
//! | capacity        | `length`             | Slots allocated up front (>= length)     |
//! | growth_factor   | 2                    | Capacity multiplier when full (>= 2)     |
//! | min_capacity    | by element size      | First non-zero capacity                  |
//! | memory_budget   | none                 | Byte accounting with a hard limit        |
//!
//! ## Usage
//!
//! ```ignore
//! let budget = Arc::new(MemoryBudget::with_limit(1 << 20));
//!
//! let v: OffsetVec<f64> = OffsetVecBuilder::new()
//!     .base(1)
//!     .length(1000)
//!     .capacity(4096)
//!     .growth_factor(3)
//!     .memory_budget(Arc::clone(&budget))
//!     .build()?;
//! ```
//!
//! `build` reports failures as `eyre::Report`; the underlying
//! [`ArrayError`](super::ArrayError) is still reachable with `downcast_ref`.

use std::sync::Arc;

use eyre::{Result, WrapErr};

use super::base::RuntimeBase;
use super::growth::GrowthPolicy;
use super::offset_vec::OffsetVec;
use crate::config::DEFAULT_GROWTH_FACTOR;
use crate::memory::MemoryBudget;

/// Builder for [`OffsetVec`] with a runtime base.
#[derive(Debug, Clone, Default)]
pub struct OffsetVecBuilder {
    base: isize,
    length: usize,
    capacity: Option<usize>,
    growth_factor: Option<usize>,
    min_capacity: Option<usize>,
    budget: Option<Arc<MemoryBudget>>,
}

impl OffsetVecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base(mut self, base: isize) -> Self {
        self.base = base;
        self
    }

    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Capacity to allocate up front. Values below `length` are raised to it.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn growth_factor(mut self, factor: usize) -> Self {
        self.growth_factor = Some(factor);
        self
    }

    pub fn min_capacity(mut self, min_capacity: usize) -> Self {
        self.min_capacity = Some(min_capacity);
        self
    }

    pub fn memory_budget(mut self, budget: Arc<MemoryBudget>) -> Self {
        self.budget = Some(budget);
        self
    }

    fn growth_policy(&self) -> Result<GrowthPolicy> {
        let factor = self.growth_factor.unwrap_or(DEFAULT_GROWTH_FACTOR);
        let policy = GrowthPolicy::new(factor).wrap_err("invalid offset vector configuration")?;
        Ok(match self.min_capacity {
            Some(min) => policy.with_min_capacity(min),
            None => policy,
        })
    }

    /// Builds a vector of `length` default values.
    pub fn build<T: Default>(self) -> Result<OffsetVec<T>> {
        self.build_with(T::default)
    }

    /// Builds a vector of `length` copies of `value`.
    pub fn build_filled<T: Clone>(self, value: T) -> Result<OffsetVec<T>> {
        self.build_with(|| value.clone())
    }

    pub fn build_with<T, F>(self, f: F) -> Result<OffsetVec<T>>
    where
        F: FnMut() -> T,
    {
        let growth = self.growth_policy()?;
        let base = self.base;
        let length = self.length;
        let capacity = self.capacity.unwrap_or(length).max(length);

        let mut v = OffsetVec::with_options(RuntimeBase(base), capacity, growth, self.budget)
            .wrap_err_with(|| {
                format!(
                    "failed to allocate {} slots for offset vector at base {}",
                    capacity, base
                )
            })?;
        v.fill_with(length, f).wrap_err_with(|| {
            format!(
                "failed to initialize {} elements of offset vector at base {}",
                length, base
            )
        })?;

        Ok(v)
    }
}
