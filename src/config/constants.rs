//! # basevec Configuration Constants
//!
//! This module centralizes the configuration constants used by the growth
//! policy, the raw storage layer and the memory budget.
//!
//! ## Dependency Graph
//!
//! ```text
//! MIN_GROWTH_FACTOR (2)
//!       │
//!       └─> DEFAULT_GROWTH_FACTOR (must be >=)
//!             A factor below 2 turns a sequence of N pushes into O(N²)
//!             element moves, which would put a per-element cost on the
//!             relocation path.
//!
//! MEDIUM_ELEM_MAX_SIZE (1 KiB)
//!       │
//!       ├─> SMALL_ELEM_MIN_CAPACITY  (8,  element size == 1)
//!       ├─> MEDIUM_ELEM_MIN_CAPACITY (4,  element size <= 1 KiB)
//!       └─> LARGE_ELEM_MIN_CAPACITY  (1,  element size >  1 KiB)
//!             The first allocation of an empty array jumps straight to
//!             this many slots.
//!
//! MAX_ALLOC_BYTES (isize::MAX)
//!       │
//!       └─> Upper bound of any single backing block; Layout::array
//!           refuses anything larger.
//!
//! MIN_BUDGET_FLOOR (64 KiB)
//!       │
//!       └─> DEFAULT_BUDGET_PERCENT of system RAM is never taken below it
//! ```
//!
//! ## Critical Invariants
//!
//! 1. `DEFAULT_GROWTH_FACTOR >= MIN_GROWTH_FACTOR`
//! 2. `SMALL_ELEM_MIN_CAPACITY >= MEDIUM_ELEM_MIN_CAPACITY >= LARGE_ELEM_MIN_CAPACITY >= 1`
//! 3. `DEFAULT_BUDGET_PERCENT` is a percentage in `1..=100`

// ============================================================================
// GROWTH POLICY
// ============================================================================

/// Smallest growth factor accepted by `GrowthPolicy::new`.
pub const MIN_GROWTH_FACTOR: usize = 2;

/// Growth factor used when none is configured. Capacity doubles when full.
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

const _: () = assert!(
    DEFAULT_GROWTH_FACTOR >= MIN_GROWTH_FACTOR,
    "DEFAULT_GROWTH_FACTOR must be >= MIN_GROWTH_FACTOR to keep push amortized O(1)"
);

// ============================================================================
// FIRST ALLOCATION SIZING
// Small elements get a larger first block so tiny arrays don't reallocate
// on every early push.
// ============================================================================

/// Minimum non-zero capacity for 1-byte elements.
pub const SMALL_ELEM_MIN_CAPACITY: usize = 8;

/// Minimum non-zero capacity for elements up to `MEDIUM_ELEM_MAX_SIZE` bytes.
pub const MEDIUM_ELEM_MIN_CAPACITY: usize = 4;

/// Minimum non-zero capacity for elements larger than `MEDIUM_ELEM_MAX_SIZE`.
pub const LARGE_ELEM_MIN_CAPACITY: usize = 1;

/// Largest element size (bytes) that still uses `MEDIUM_ELEM_MIN_CAPACITY`.
pub const MEDIUM_ELEM_MAX_SIZE: usize = 1024;

const _: () = assert!(
    SMALL_ELEM_MIN_CAPACITY >= MEDIUM_ELEM_MIN_CAPACITY
        && MEDIUM_ELEM_MIN_CAPACITY >= LARGE_ELEM_MIN_CAPACITY
        && LARGE_ELEM_MIN_CAPACITY >= 1,
    "minimum capacities must shrink with element size and stay non-zero"
);

// ============================================================================
// RAW STORAGE
// ============================================================================

/// Largest backing block, in bytes, the raw storage layer will request.
pub const MAX_ALLOC_BYTES: usize = isize::MAX as usize;

// ============================================================================
// MEMORY BUDGET CONFIGURATION
// ============================================================================

/// Default memory budget as percentage of system RAM.
pub const DEFAULT_BUDGET_PERCENT: usize = 25;

/// Minimum memory budget floor in bytes (64 KiB).
pub const MIN_BUDGET_FLOOR: usize = 64 * 1024;

const _: () = assert!(
    DEFAULT_BUDGET_PERCENT >= 1 && DEFAULT_BUDGET_PERCENT <= 100,
    "DEFAULT_BUDGET_PERCENT must be a percentage"
);

/// Returns the first non-zero capacity for elements of `elem_size` bytes.
#[inline]
pub const fn min_non_zero_capacity(elem_size: usize) -> usize {
    if elem_size == 1 {
        SMALL_ELEM_MIN_CAPACITY
    } else if elem_size <= MEDIUM_ELEM_MAX_SIZE {
        MEDIUM_ELEM_MIN_CAPACITY
    } else {
        LARGE_ELEM_MIN_CAPACITY
    }
}
