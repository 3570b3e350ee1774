use thiserror::Error;

/// Errors raised by the container and configuration layer.
///
/// The expression engine itself has no error path: shape and width
/// mismatches are type errors, and floating-point exceptions propagate
/// through the tree as IEEE values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    /// A block configuration that cannot be allocated
    #[error("invalid block configuration: {0}")]
    InvalidConfig(String),

    /// Record index past the end of a block
    #[error("record {record} out of range for block of {records} records")]
    RecordOutOfRange { record: usize, records: usize },

    /// Field index past the end of a record
    #[error("field {field} out of range for record of {fields} fields")]
    FieldOutOfRange { field: usize, fields: usize },

    /// Storage window index past the end of a block
    #[error("storage window {index} out of range for block of {count} windows")]
    StorageOutOfRange { index: usize, count: usize },

    /// Layout name that is neither flat nor interleaved
    #[error("unknown layout '{0}' (expected 'flat' or 'interleaved')")]
    UnknownLayout(String),
}

/// Result type for container and configuration operations.
pub type Result<T> = std::result::Result<T, KernelError>;
