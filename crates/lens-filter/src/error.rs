//! Error types for the filter engine.
//!
//! The engine prunes malformed input instead of failing; these errors cover
//! the few caller mistakes that have no sensible fallback.

use thiserror::Error;

/// A specialized Result type for filter engine operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur in the filter engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// No attribute descriptor is registered under this name.
    #[error("no attribute descriptor found for '{name}'{}", did_you_mean(.suggestion))]
    UnknownAttribute {
        /// The requested attribute name.
        name: String,
        /// The closest registered name, if any is close enough.
        suggestion: Option<String>,
    },

    /// An index path does not point at a node of the tree.
    #[error("no filter node at path {path:?}")]
    InvalidPath {
        /// The offending path.
        path: Vec<usize>,
    },

    /// An index path points at a group where a condition was expected.
    #[error("filter node at path {path:?} is a group, not a condition")]
    NotACondition {
        /// The offending path.
        path: Vec<usize>,
    },

    /// A persisted filter could not be decoded.
    #[error("malformed filter: {message}")]
    Malformed {
        /// Decoder message.
        message: String,
    },
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(". Did you mean '{}'?", name),
        None => String::new(),
    }
}

impl FilterError {
    /// Creates an unknown attribute error.
    pub fn unknown_attribute(name: impl Into<String>, suggestion: Option<String>) -> Self {
        FilterError::UnknownAttribute {
            name: name.into(),
            suggestion,
        }
    }

    /// Creates an invalid path error.
    pub fn invalid_path(path: &[usize]) -> Self {
        FilterError::InvalidPath {
            path: path.to_vec(),
        }
    }

    /// Creates a malformed filter error.
    pub fn malformed(message: impl Into<String>) -> Self {
        FilterError::Malformed {
            message: message.into(),
        }
    }
}
