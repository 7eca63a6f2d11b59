//! Error types for assess-core.
//!
//! Errors are structured, explicit, and stable. Messages are intended to be
//! human-readable while preserving machine-level categorization.

use std::fmt::{self, Display};

use crate::schema::ValidationError;

/// Result type used throughout assess-core.
pub type CoreResult<T> = Result<T, CoreError>;

/// Top-level error type for assess-core.
#[derive(Debug)]
pub enum CoreError {
    /// Submission rejected by the schema validator.
    Validation {
        error: ValidationError,
    },

    /// The declarative schema itself could not be constructed.
    Schema {
        message: String,
    },

    /// Serialization or deserialization failure.
    Serialization {
        message: String,
    },

    /// Internal invariant violation.
    Invariant {
        message: String,
    },
}

impl CoreError {
    /// Construct a validation error.
    pub fn validation(error: ValidationError) -> Self {
        Self::Validation { error }
    }

    /// Construct a schema construction error.
    pub fn schema<M: Into<String>>(message: M) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Construct a serialization error.
    pub fn serialization<M: Into<String>>(message: M) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Construct an invariant violation error.
    pub fn invariant<M: Into<String>>(message: M) -> Self {
        Self::Invariant {
            message: message.into(),
        }
    }

    /// The validation detail, if this is a validation error.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation { error } => Some(error),
            _ => None,
        }
    }
}

impl Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { error } => {
                write!(f, "validation error: {error}")
            }
            Self::Schema { message } => {
                write!(f, "schema error: {message}")
            }
            Self::Serialization { message } => {
                write!(f, "serialization error: {message}")
            }
            Self::Invariant { message } => {
                write!(f, "invariant violation: {message}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_schema_error() {
        let e = CoreError::schema("bad pattern");
        assert_eq!(format!("{e}"), "schema error: bad pattern");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CoreError>();
    }
}
