//! # Growth Policy
//!
//! Decides the capacity of the next backing block when a push finds the
//! current one full.
//!
//! ```text
//! next = max(current * factor, required, min_capacity)
//! ```
//!
//! `factor >= 2` is enforced so a run of N pushes moves O(N) elements in
//! total. `min_capacity` defaults to a size-dependent floor (see
//! [`min_non_zero_capacity`]) so tiny vectors skip the 1 → 2 → 4 steps.

use eyre::{bail, Result};

use crate::config::{min_non_zero_capacity, DEFAULT_GROWTH_FACTOR, MIN_GROWTH_FACTOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthPolicy {
    factor: usize,
    min_capacity: Option<usize>,
}

impl GrowthPolicy {
    pub fn new(factor: usize) -> Result<Self> {
        if factor < MIN_GROWTH_FACTOR {
            bail!(
                "growth factor {} is below the minimum of {}",
                factor,
                MIN_GROWTH_FACTOR
            );
        }
        Ok(Self {
            factor,
            min_capacity: None,
        })
    }

    /// Overrides the size-dependent floor of the first allocation.
    pub fn with_min_capacity(mut self, min_capacity: usize) -> Self {
        self.min_capacity = Some(min_capacity.max(1));
        self
    }

    pub fn factor(&self) -> usize {
        self.factor
    }

    pub fn min_capacity(&self, elem_size: usize) -> usize {
        self.min_capacity
            .unwrap_or_else(|| min_non_zero_capacity(elem_size))
    }

    /// Capacity to grow to from `current` so that at least `required` slots fit.
    #[inline]
    pub fn next_capacity(&self, current: usize, required: usize, elem_size: usize) -> usize {
        current
            .saturating_mul(self.factor)
            .max(required)
            .max(self.min_capacity(elem_size))
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            factor: DEFAULT_GROWTH_FACTOR,
            min_capacity: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_small_factor() {
        assert!(GrowthPolicy::new(0).is_err());
        assert!(GrowthPolicy::new(1).is_err());
        assert!(GrowthPolicy::new(2).is_ok());
    }

    #[test]
    fn test_default_doubles() {
        let policy = GrowthPolicy::default();
        assert_eq!(policy.factor(), 2);
        assert_eq!(policy.next_capacity(16, 17, 8), 32);
    }

    #[test]
    fn test_first_allocation_uses_floor() {
        let policy = GrowthPolicy::default();
        assert_eq!(policy.next_capacity(0, 1, 1), 8);
        assert_eq!(policy.next_capacity(0, 1, 8), 4);
        assert_eq!(policy.next_capacity(0, 1, 4096), 1);
    }

    #[test]
    fn test_required_wins_over_factor() {
        let policy = GrowthPolicy::new(3).unwrap();
        assert_eq!(policy.next_capacity(10, 100, 8), 100);
        assert_eq!(policy.next_capacity(10, 11, 8), 30);
    }

    #[test]
    fn test_custom_min_capacity() {
        let policy = GrowthPolicy::default().with_min_capacity(64);
        assert_eq!(policy.next_capacity(0, 1, 8), 64);
        assert_eq!(policy.min_capacity(8), 64);
        assert_eq!(GrowthPolicy::default().with_min_capacity(0).min_capacity(8), 1);
    }

    #[test]
    fn test_saturates_instead_of_overflowing() {
        let policy = GrowthPolicy::default();
        assert_eq!(policy.next_capacity(usize::MAX / 2 + 1, 1, 8), usize::MAX);
    }
}
