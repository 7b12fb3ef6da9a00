//! Error types for data sources and queries.

use crate::value::Value;
use alloc::string::String;
use core::fmt;

/// Result type alias for tunes operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by data sources and query execution.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// A row was not found in a table.
    NotFound {
        table: String,
        key: Value,
    },
    /// A query referenced a column the source does not have.
    ColumnNotFound {
        table: String,
        column: usize,
    },
    /// The underlying data source failed.
    DataSource {
        message: String,
    },
    /// Invalid operation.
    InvalidOperation {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound { table, key } => {
                write!(f, "Not found in table {}: {}", table, key)
            }
            Error::ColumnNotFound { table, column } => {
                write!(f, "Column {} not found in table {}", column, table)
            }
            Error::DataSource { message } => {
                write!(f, "Data source error: {}", message)
            }
            Error::InvalidOperation { message } => {
                write!(f, "Invalid operation: {}", message)
            }
        }
    }
}

impl Error {
    /// Creates a not found error.
    pub fn not_found(table: impl Into<String>, key: Value) -> Self {
        Error::NotFound {
            table: table.into(),
            key,
        }
    }

    /// Creates a column not found error.
    pub fn column_not_found(table: impl Into<String>, column: usize) -> Self {
        Error::ColumnNotFound {
            table: table.into(),
            column,
        }
    }

    /// Creates a data source error.
    pub fn data_source(message: impl Into<String>) -> Self {
        Error::DataSource {
            message: message.into(),
        }
    }

    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Error::InvalidOperation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        let err = Error::not_found("tracks", Value::Int64(7));
        assert_eq!(err.to_string(), "Not found in table tracks: 7");

        let err = Error::data_source("disk unplugged");
        assert_eq!(err.to_string(), "Data source error: disk unplugged");
    }

    #[test]
    fn test_error_constructors() {
        match Error::column_not_found("albums", 4) {
            Error::ColumnNotFound { table, column } => {
                assert_eq!(table, "albums");
                assert_eq!(column, 4);
            }
            _ => panic!("Wrong error type"),
        }
    }
}
