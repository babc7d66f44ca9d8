//! Error types for the shelfview engine.

use crate::RowId;
use alloc::string::String;
use core::fmt;

/// Result type alias for shelfview operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for list-build and node operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The same domain name was requested with two different expressions.
    DuplicateDomain {
        name: String,
    },
    /// Invalid grouping schema (grouping by the terminal Book kind,
    /// duplicate group kinds, empty schema).
    InvalidGrouping {
        message: String,
    },
    /// Node lookup by an unknown row id.
    NodeNotFound {
        row_id: RowId,
    },
    /// Operation attempted on a closed session.
    SessionClosed,
    /// Invalid operation.
    InvalidOperation {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateDomain { name } => {
                write!(f, "Duplicate domain with conflicting expression: {}", name)
            }
            Error::InvalidGrouping { message } => {
                write!(f, "Invalid grouping: {}", message)
            }
            Error::NodeNotFound { row_id } => {
                write!(f, "Node not found: row {}", row_id)
            }
            Error::SessionClosed => {
                write!(f, "Session is closed")
            }
            Error::InvalidOperation { message } => {
                write!(f, "Invalid operation: {}", message)
            }
        }
    }
}

impl Error {
    /// Creates a duplicate domain error.
    pub fn duplicate_domain(name: impl Into<String>) -> Self {
        Error::DuplicateDomain { name: name.into() }
    }

    /// Creates an invalid grouping error.
    pub fn invalid_grouping(message: impl Into<String>) -> Self {
        Error::InvalidGrouping {
            message: message.into(),
        }
    }

    /// Creates a node not found error.
    pub fn node_not_found(row_id: RowId) -> Self {
        Error::NodeNotFound { row_id }
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
        let err = Error::duplicate_domain("title");
        assert!(err.to_string().contains("title"));

        let err = Error::node_not_found(42);
        assert!(err.to_string().contains("42"));

        let err = Error::invalid_grouping("cannot group by Book");
        assert!(err.to_string().contains("Book"));
    }

    #[test]
    fn test_error_constructors() {
        let err = Error::duplicate_domain("author_name");
        match err {
            Error::DuplicateDomain { name } => assert_eq!(name, "author_name"),
            _ => panic!("Wrong error type"),
        }
    }
}
