//! # Offset Vector Errors
//!
//! Container operations report failures as typed [`ArrayError`] values so
//! callers can match on them. Both types implement `std::error::Error` and
//! convert into `eyre::Report` with `?` in the layers above the container.
//!
//! ```text
//! ArrayError
//! ├── IndexOutOfRange { index, first, end }   recoverable, retry with a valid index
//! ├── IndexSpaceOverflow { base, len }        base + len does not fit in isize
//! └── Allocation(AllocationError)
//!       ├── CapacityOverflow { requested }    layout larger than isize::MAX bytes
//!       ├── AllocatorFailure { bytes }        global allocator returned null
//!       └── BudgetExceeded(MemoryError)       attached MemoryBudget refused
//! ```
//!
//! Every failing operation leaves the elements and the index range of the
//! container exactly as they were.

use std::fmt;

use crate::memory::MemoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationError {
    /// The requested number of slots cannot be described by a `Layout`.
    CapacityOverflow { requested: usize },
    /// The global allocator could not provide `bytes` bytes.
    AllocatorFailure { bytes: usize },
    /// The attached memory budget refused the charge.
    BudgetExceeded(MemoryError),
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationError::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: cannot allocate {} slots", requested)
            }
            AllocationError::AllocatorFailure { bytes } => {
                write!(f, "allocator failed to provide {} bytes", bytes)
            }
            AllocationError::BudgetExceeded(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AllocationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AllocationError::BudgetExceeded(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MemoryError> for AllocationError {
    fn from(err: MemoryError) -> Self {
        AllocationError::BudgetExceeded(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayError {
    /// `index` lies outside `[first, end)`.
    IndexOutOfRange {
        index: isize,
        first: isize,
        end: isize,
    },
    /// The valid index range `[base, base + len)` would leave `isize`.
    IndexSpaceOverflow { base: isize, len: usize },
    Allocation(AllocationError),
}

impl ArrayError {
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, ArrayError::IndexOutOfRange { .. })
    }

    pub fn is_allocation(&self) -> bool {
        matches!(self, ArrayError::Allocation(_))
    }
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayError::IndexOutOfRange { index, first, end } => {
                if first == end {
                    write!(f, "index {} out of range: array starting at {} is empty", index, first)
                } else {
                    write!(f, "index {} out of range: valid indices are {}..{}", index, first, end)
                }
            }
            ArrayError::IndexSpaceOverflow { base, len } => write!(
                f,
                "index space overflow: {} elements starting at {} exceed isize::MAX",
                len, base
            ),
            ArrayError::Allocation(err) => write!(f, "allocation failed: {}", err),
        }
    }
}

impl std::error::Error for ArrayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArrayError::Allocation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AllocationError> for ArrayError {
    fn from(err: AllocationError) -> Self {
        ArrayError::Allocation(err)
    }
}

impl From<MemoryError> for ArrayError {
    fn from(err: MemoryError) -> Self {
        ArrayError::Allocation(AllocationError::BudgetExceeded(err))
    }
}
