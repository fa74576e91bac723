//! # basevec Configuration Module
//!
//! All tunable numbers of the crate live here. Values that depend on each
//! other are co-located and their relationships are enforced through
//! compile-time assertions, so a mismatched edit fails the build instead of
//! silently breaking the amortized cost of `push`.
//!
//! ## Module Organization
//!
//! - [`constants`]: Growth, allocation and memory budget constants

pub mod constants;
pub use constants::*;
