//! Error types for the daybook core.

use thiserror::Error;

/// Errors that can occur in daybook core operations.
#[derive(Error, Debug)]
pub enum DaybookError {
    #[error("Invalid date '{0}'. Expected an RFC 3339 instant or YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Event '{0}' has no recurrence rule")]
    NotRecurring(String),
}

/// Result type alias for daybook core operations.
pub type DaybookResult<T> = Result<T, DaybookError>;
