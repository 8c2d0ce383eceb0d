//! Error types for configuration resolution
//!
//! Every error is terminal for the current resolution attempt. Variants carry
//! the offending field path where one exists so the CLI can print the exact
//! failing invariant.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for configuration operations
#[derive(Debug, Error)]
pub enum Error {
    /// A required host tool is missing; the process cannot proceed
    #[error("precondition failed [{tool}]: {message}")]
    Precondition {
        /// Name of the missing executable (e.g. "aws")
        tool: String,
        /// Description of what is missing
        message: String,
    },

    /// Missing, invalid, or contradictory configuration field
    ///
    /// Platform-limit violations use this variant too; only the message
    /// distinguishes them.
    #[error("validation error: {message}")]
    Validation {
        /// Description of what's invalid
        message: String,
        /// The invalid field path (e.g. "parameters.vpc-cidr")
        field: Option<String>,
    },

    /// Filesystem operation failed
    #[error("io error at {}: {source}", path.display())]
    Io {
        /// Path the operation was applied to
        path: PathBuf,
        /// The underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// Loading or writing the structured document failed
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of what failed
        message: String,
    },
}

impl Error {
    /// Create a validation error with the given message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a validation error naming the offending field path
    pub fn validation_for_field(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a platform-limit violation for a numeric field
    pub fn limit(field: impl Into<String>, value: u64, limit: u64) -> Self {
        let field = field.into();
        Self::Validation {
            message: format!("{field} {value} exceeds platform limit {limit}"),
            field: Some(field),
        }
    }

    /// Create a precondition failure for a missing host tool
    pub fn precondition(tool: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Precondition {
            tool: tool.into(),
            message: msg.into(),
        }
    }

    /// Wrap a filesystem error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error with the given message
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
        }
    }

    /// Get the offending field path if this error names one
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// Returns true for errors the user fixes by editing the configuration
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}
