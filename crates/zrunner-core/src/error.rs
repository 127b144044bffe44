//! Unified error handling for zrunner core.
//!
//! Every fallible operation in the core returns [`ZrunnerError`]. Each layer
//! keeps its own enum; this type only wraps them so the CLI has one thing to
//! render and one place to pick an exit code from.

use thiserror::Error;

use crate::application::error::{
    DependencyError, DiscoveryError, ParseError, ScaffoldError, SubmissionError,
};
use crate::domain::{DomainError, ValidationError};

/// Root error type for zrunner core operations.
#[derive(Debug, Error, Clone)]
pub enum ZrunnerError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Dependency(#[from] DependencyError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error(transparent)]
    Scaffold(#[from] ScaffoldError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl ZrunnerError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Discovery(e) => e.suggestions(),
            Self::Parse(e) => e.suggestions(),
            Self::Validation(e) => e.suggestions(),
            Self::Dependency(e) => e.suggestions(),
            Self::Submission(e) => e.suggestions(),
            Self::Scaffold(e) => e.suggestions(),
            Self::Domain(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in zrunner".into(),
                "Re-run with -vvv and include the output when reporting it".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Discovery(e) => e.category(),
            Self::Parse(_) | Self::Validation(_) => ErrorCategory::Validation,
            Self::Dependency(e) => e.category(),
            Self::Submission(_) => ErrorCategory::Remote,
            Self::Scaffold(e) => e.category(),
            Self::Domain(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Remote,
    Internal,
}

/// Convenient result type alias.
pub type ZrunnerResult<T> = Result<T, ZrunnerError>;
