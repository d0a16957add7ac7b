//! Error types for geonorm

use thiserror::Error;

/// Main error type for geonorm operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Unsupported geometry tag, unknown type name or unsupported type request
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation that needs at least one geometry received none
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// The requested operation needs a collaborator that is not wired in
    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("Unsupported algorithm: {name} (supported: {supported})")]
    UnsupportedAlgorithm {
        name: String,
        supported: &'static str,
    },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

/// Result type alias for geonorm operations
pub type Result<T> = std::result::Result<T, Error>;
