//! Error types for Recast.
//!
//! Defines the main error enum used throughout the crate.

use thiserror::Error;

/// Main error type for Recast operations.
#[derive(Error, Debug)]
pub enum RecastError {
    /// The query type tag is not one of the recognized kinds.
    #[error("Unsupported query type: {0}")]
    UnsupportedQueryType(String),

    /// The native result is missing a field the query type requires, or a
    /// field has the wrong shape.
    #[error("Malformed native result: {0}")]
    MalformedResult(String),

    /// An aggregate field held something that cannot be read as a number.
    #[error("Non-numeric aggregate: {0}")]
    NonNumericAggregate(String),

    /// Configuration errors (invalid config file, unknown profile, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input errors (unreadable input, invalid JSON, unparseable SQL, etc.)
    #[error("Input error: {0}")]
    Input(String),

    /// Internal application errors (unexpected states, unwritable output, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RecastError {
    /// Creates an unsupported-query-type error for the given tag.
    pub fn unsupported_query_type(tag: impl Into<String>) -> Self {
        Self::UnsupportedQueryType(tag.into())
    }

    /// Creates a malformed-result error with the given message.
    pub fn malformed_result(msg: impl Into<String>) -> Self {
        Self::MalformedResult(msg.into())
    }

    /// Creates a non-numeric-aggregate error with the given message.
    pub fn non_numeric_aggregate(msg: impl Into<String>) -> Self {
        Self::NonNumericAggregate(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an input error with the given message.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnsupportedQueryType(_) => "Unsupported Query Type",
            Self::MalformedResult(_) => "Malformed Result",
            Self::NonNumericAggregate(_) => "Non-Numeric Aggregate",
            Self::Config(_) => "Configuration Error",
            Self::Input(_) => "Input Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using RecastError.
pub type Result<T> = std::result::Result<T, RecastError>;
