//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Routes `log` output through the test harness. Run with
/// `RUST_LOG=basevec=trace` to see allocation events.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Element that counts how many times it has been dropped.
#[derive(Debug)]
pub struct Tracked {
    pub value: u64,
    drops: Arc<AtomicUsize>,
}

impl Tracked {
    pub fn new(value: u64, drops: &Arc<AtomicUsize>) -> Self {
        Self {
            value,
            drops: Arc::clone(drops),
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Self::new(self.value, &self.drops)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Deterministic xorshift sequence for index workloads.
pub fn xorshift_indices(seed: u64, count: usize, first: isize, len: usize) -> Vec<isize> {
    let mut state = seed.max(1);
    (0..count)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            first + (state % len as u64) as isize
        })
        .collect()
}
