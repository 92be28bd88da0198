//! Configuration validation errors.

use thiserror::Error;

/// Invalid batch schedule or roster configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A time-of-day value is not `HH:MM` or `HH:MM:SS`.
    #[error("invalid time of day `{value}` for batch `{batch}` (expected HH:MM)")]
    InvalidTime {
        /// Batch the value belongs to.
        batch: String,
        /// Raw configured value.
        value: String,
    },
    /// A batch has an empty or whitespace-only name.
    #[error("batch name must not be empty")]
    EmptyBatchName,
    /// Two batches share the same name.
    #[error("batch `{0}` is declared more than once")]
    DuplicateBatch(String),
    /// A roster is configured for a batch that is not in the schedule.
    #[error("roster configured for unknown batch `{0}`")]
    UnknownRosterBatch(String),
}
