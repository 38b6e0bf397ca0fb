//! Error types for GDID values
//!
//! This module defines all error types used throughout the crate.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Two classes of failure exist:
//! - Construction/contract errors (`OutOfRange`, `BufferTooSmall`, `Contract`)
//!   are returned by constructors and codecs when the caller breaks a rule.
//! - Parse failures (`Format`) are produced by `parse`/`FromStr`. The
//!   `try_parse` functions never produce an error and return `None` instead.

use crate::limits::Limits;
use thiserror::Error;

/// Result type alias for GDID operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for identifier construction, decoding and parsing
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// A numeric component exceeds the range its bit field can hold
    #[error("{what} {value} is out of range (max {max})")]
    OutOfRange {
        /// Name of the component (e.g. "authority")
        what: &'static str,
        /// Value that was supplied
        value: u64,
        /// Largest accepted value
        max: u64,
    },

    /// A byte buffer cannot hold (or does not contain) a full encoding
    #[error("Buffer too small: need {needed} bytes at offset {offset}, have {available}")]
    BufferTooSmall {
        /// Bytes required by the encoding
        needed: usize,
        /// Offset the read or write started at
        offset: usize,
        /// Total length of the buffer
        available: usize,
    },

    /// The caller broke a constructor or usage contract
    #[error("Contract violation: {0}")]
    Contract(String),

    /// Text could not be parsed into the requested type
    #[error("Unparsable {type_name} value: '{excerpt}'")]
    Format {
        /// Name of the target type
        type_name: &'static str,
        /// Truncated copy of the offending input
        excerpt: String,
    },

    /// A field value failed an advisory validation check
    #[error("Field '{field}' is invalid: {reason}")]
    FieldValidation {
        /// Name of the field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Build a `Format` error, truncating the input to the default excerpt length
    pub fn format(type_name: &'static str, input: &str) -> Self {
        Self::format_with_limits(type_name, input, &Limits::default())
    }

    /// Build a `Format` error, truncating the input to `limits.max_excerpt_chars`
    pub fn format_with_limits(type_name: &'static str, input: &str, limits: &Limits) -> Self {
        Error::Format {
            type_name,
            excerpt: excerpt(input, limits.max_excerpt_chars),
        }
    }

    /// Build a `Contract` error
    pub fn contract(message: impl Into<String>) -> Self {
        Error::Contract(message.into())
    }

    /// Get the reason code for wire protocol
    pub fn reason_code(&self) -> &'static str {
        match self {
            Error::OutOfRange { .. } => "out_of_range",
            Error::BufferTooSmall { .. } => "buffer_too_small",
            Error::Contract(_) => "contract_violation",
            Error::Format { .. } => "invalid_format",
            Error::FieldValidation { .. } => "field_validation",
            Error::Serialization(_) => "serialization",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Truncate `input` to at most `max_chars` characters, appending `...` when cut
///
/// Cuts on a char boundary so multi-byte input never splits a code point.
pub fn excerpt(input: &str, max_chars: usize) -> String {
    match input.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &input[..cut]),
        None => input.to_string(),
    }
}
