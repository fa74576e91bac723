//! # Index Bases
//!
//! The base index of an offset vector is supplied through the [`IndexBase`]
//! trait. Two implementations cover both ways of fixing it:
//!
//! | Type            | Base fixed at  | Storage cost | Use                       |
//! |-----------------|----------------|--------------|---------------------------|
//! | `RuntimeBase`   | construction   | one `isize`  | base chosen from input    |
//! | `ConstBase<L>`  | compile time   | zero bytes   | 1-based numeric kernels   |
//!
//! Either way the base only takes part in computing the biased origin when
//! the backing block changes, and in the bounds test of checked accessors.

use std::fmt;
use std::hash::Hash;

/// Supplies the first valid index of an offset vector.
pub trait IndexBase: Copy + Eq + Hash + fmt::Debug {
    fn base(&self) -> isize;
}

/// A base chosen at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RuntimeBase(pub isize);

impl IndexBase for RuntimeBase {
    #[inline(always)]
    fn base(&self) -> isize {
        self.0
    }
}

impl From<isize> for RuntimeBase {
    fn from(base: isize) -> Self {
        RuntimeBase(base)
    }
}

/// A base fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ConstBase<const L: isize>;

impl<const L: isize> IndexBase for ConstBase<L> {
    #[inline(always)]
    fn base(&self) -> isize {
        L
    }
}

pub type ZeroBased = ConstBase<0>;
pub type OneBased = ConstBase<1>;
