//! Errors surfaced by the result synchronizer.

use core::fmt;
use tunes_core::Error;

/// Result type alias for synchronizer operations.
pub type SyncResult<T> = core::result::Result<T, SyncError>;

/// Errors raised by `load` and `refresh`.
///
/// Running either operation with no query bound is not an error; it is a
/// no-op. Every error leaves the synchronizer exactly as it was before the
/// call.
#[derive(Clone, Debug, PartialEq)]
pub enum SyncError {
    /// The bound query failed to execute.
    QueryExecution(Error),
}

impl SyncError {
    /// Returns the error the query reported.
    pub fn cause(&self) -> &Error {
        match self {
            SyncError::QueryExecution(cause) => cause,
        }
    }
}

impl From<Error> for SyncError {
    fn from(cause: Error) -> Self {
        SyncError::QueryExecution(cause)
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::QueryExecution(cause) => write!(f, "Query execution failed: {}", cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_sync_error_display() {
        let err = SyncError::from(Error::data_source("timeout"));
        assert_eq!(err.to_string(), "Query execution failed: Data source error: timeout");
    }

    #[test]
    fn test_sync_error_cause() {
        let err = SyncError::QueryExecution(Error::invalid_operation("bad view"));
        assert_eq!(err.cause(), &Error::invalid_operation("bad view"));
    }
}
