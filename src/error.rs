use thiserror::Error;

/// Error types for `DynArray` and `RingBuffer` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ArrayError {
    /// Index is beyond the current logical length
    #[error("Index out of range: index {index} is beyond length {len}")]
    OutOfRange {
        /// Index that was accessed
        index: usize,
        /// Current length of the container
        len: usize,
    },
    /// The requested capacity cannot be represented as an allocation
    #[error("Capacity overflow: {requested} elements cannot be allocated")]
    CapacityOverflow {
        /// Number of elements requested
        requested: usize,
    },
    /// The allocator could not provide the requested block
    #[error("Allocation failed: {size} bytes with alignment {align}")]
    AllocFailed {
        /// Size of the requested block in bytes
        size: usize,
        /// Alignment of the requested block
        align: usize,
    },
    /// A range whose start lies after its end
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange {
        /// Start of the range
        start: usize,
        /// End of the range
        end: usize,
    },
}

/// Allocation failure inside a trait impl that cannot return a `Result`.
#[cold]
#[track_caller]
pub(crate) fn fatal(err: ArrayError) -> ! {
    panic!("{err}")
}
