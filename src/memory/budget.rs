//! # Memory Budget Implementation
//!
//! Lock-free byte counters with a hard limit.
//!
//! ## Design Principles
//!
//! 1. **Hard Limits**: Charges that would exceed the limit fail immediately
//! 2. **Atomic Accounting**: All counters are atomics, a budget can be shared
//!    by vectors living on different threads through an `Arc`
//! 3. **Exact Credits**: Every byte charged by a backing block is credited
//!    back exactly once, when the block shrinks or is released
//!
//! ## Charge Protocol
//!
//! The raw storage layer charges *before* asking the allocator for a larger
//! block and refunds the charge if the allocator then fails. Shrinking
//! credits the difference only after the allocator has succeeded, so `used`
//! never under-reports live memory.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::OnceLock;

use sysinfo::System;

pub use crate::config::{DEFAULT_BUDGET_PERCENT, MIN_BUDGET_FLOOR};

static SYSTEM_TOTAL_MEMORY: OnceLock<usize> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetStats {
    pub limit: usize,
    pub used: usize,
    pub peak: usize,
    pub allocations: u64,
    pub releases: u64,
    pub refusals: u64,
}

impl BudgetStats {
    pub fn available(&self) -> usize {
        self.limit.saturating_sub(self.used)
    }

    pub fn utilization_percent(&self) -> f64 {
        if self.limit == 0 {
            return 0.0;
        }
        (self.used as f64 / self.limit as f64) * 100.0
    }
}

impl std::fmt::Display for BudgetStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "used:{}/{},peak:{},allocations:{},releases:{},refusals:{}",
            self.used, self.limit, self.peak, self.allocations, self.releases, self.refusals
        )
    }
}

/// A charge the budget refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryError {
    pub requested: usize,
    pub available: usize,
}

impl std::fmt::Display for MemoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "memory budget exceeded: requested {} bytes but only {} available",
            self.requested, self.available
        )
    }
}

impl std::error::Error for MemoryError {}

#[derive(Debug)]
pub struct MemoryBudget {
    limit: AtomicUsize,
    used: AtomicUsize,
    peak: AtomicUsize,
    allocations: AtomicU64,
    releases: AtomicU64,
    refusals: AtomicU64,
}

impl MemoryBudget {
    pub fn auto_detect() -> Self {
        let total_memory = *SYSTEM_TOTAL_MEMORY.get_or_init(|| {
            let mut sys = System::new();
            sys.refresh_memory();
            sys.total_memory() as usize
        });

        let budget = (total_memory / 100).saturating_mul(DEFAULT_BUDGET_PERCENT);

        Self::with_limit(budget)
    }

    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(MIN_BUDGET_FLOOR);

        Self {
            limit: AtomicUsize::new(limit),
            used: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            allocations: AtomicU64::new(0),
            releases: AtomicU64::new(0),
            refusals: AtomicU64::new(0),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit.load(Ordering::Acquire)
    }

    pub fn used(&self) -> usize {
        self.used.load(Ordering::Acquire)
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::Acquire)
    }

    pub fn available(&self) -> usize {
        self.limit().saturating_sub(self.used())
    }

    pub fn can_allocate(&self, bytes: usize) -> bool {
        self.available() >= bytes
    }

    /// Charges `bytes` against the limit.
    pub fn allocate(&self, bytes: usize) -> Result<(), MemoryError> {
        if bytes == 0 {
            return Ok(());
        }

        let limit = self.limit();

        loop {
            let current = self.used.load(Ordering::Acquire);
            let new_used = match current.checked_add(bytes) {
                Some(n) if n <= limit => n,
                _ => {
                    self.refusals.fetch_add(1, Ordering::Relaxed);
                    log::debug!(
                        "memory budget refused {} bytes ({} of {} used)",
                        bytes,
                        current,
                        limit
                    );
                    return Err(MemoryError {
                        requested: bytes,
                        available: limit.saturating_sub(current),
                    });
                }
            };

            match self.used.compare_exchange_weak(
                current,
                new_used,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    self.peak.fetch_max(new_used, Ordering::AcqRel);
                    self.allocations.fetch_add(1, Ordering::Relaxed);
                    return Ok(());
                }
                Err(_) => continue,
            }
        }
    }

    /// Credits `bytes` back. Saturates at zero.
    pub fn release(&self, bytes: usize) {
        if bytes == 0 {
            return;
        }

        loop {
            let current = self.used.load(Ordering::Acquire);
            let new_value = current.saturating_sub(bytes);

            match self.used.compare_exchange_weak(
                current,
                new_value,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    self.releases.fetch_add(1, Ordering::Relaxed);
                    return;
                }
                Err(_) => continue,
            }
        }
    }

    pub fn try_allocate(&self, bytes: usize) -> bool {
        self.allocate(bytes).is_ok()
    }

    pub fn stats(&self) -> BudgetStats {
        BudgetStats {
            limit: self.limit(),
            used: self.used(),
            peak: self.peak(),
            allocations: self.allocations.load(Ordering::Relaxed),
            releases: self.releases.load(Ordering::Relaxed),
            refusals: self.refusals.load(Ordering::Relaxed),
        }
    }
}

impl Default for MemoryBudget {
    fn default() -> Self {
        Self::auto_detect()
    }
}
