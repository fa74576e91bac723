//! # Memory Budget Management
//!
//! This module provides byte accounting for the backing blocks of offset
//! vectors. A budget is optional: vectors built without one allocate straight
//! from the global allocator.
//!
//! ## Accounting Model
//!
//! ```text
//! +----------------------------------------------------------+
//! |                  Total Memory Budget                      |
//! |  (default: 25% of system RAM, minimum floor: 64 KiB)     |
//! +----------------------------------------------------------+
//! |  used  = sum of capacity * size_of::<T>() over all        |
//! |          live backing blocks charged to this budget       |
//! |  peak  = high-water mark of `used`                        |
//! +----------------------------------------------------------+
//! ```
//!
//! Charges happen on allocation events only: construction, growth and
//! `shrink_to_fit` (which credits bytes back). Element reads and writes never
//! touch the budget.
//!
//! ## Enforcement Model
//!
//! Hard limits. A growth that would take `used` past the limit is refused
//! with a [`MemoryError`] and the vector keeps its previous block, which is
//! how callers can exercise the allocation failure path deterministically.
//!
//! ## Configuration
//!
//! ```rust,ignore
//! // Auto-detect (25% of system RAM, 64 KiB floor)
//! let budget = Arc::new(MemoryBudget::auto_detect());
//!
//! // Explicit limit
//! let budget = Arc::new(MemoryBudget::with_limit(16 * 1024 * 1024));
//!
//! let v: OffsetVec<u64> = OffsetVecBuilder::new()
//!     .base(1)
//!     .length(1000)
//!     .memory_budget(Arc::clone(&budget))
//!     .build()?;
//! ```

mod budget;

pub use budget::{BudgetStats, MemoryBudget, MemoryError};
