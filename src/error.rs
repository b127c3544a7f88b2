//! Error taxonomy for stimulus randomization
//!
//! The core algorithms return [`StimError`] directly so callers can match on
//! the failure kind. The orchestration layer wraps these in `anyhow` errors
//! with path context; they remain reachable through `downcast_ref`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating or generating randomizations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StimError {
    /// A count, label, method or directory type was malformed or out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The stimuli cannot be balanced the way the request demands
    #[error("Impossible constraint: {0}")]
    ImpossibleConstraint(String),

    /// A categorized operation was requested on uncategorized stimuli
    #[error("The stimuli in {} have no categories", path.display())]
    NoCategories {
        /// Stimulus directory
        path: PathBuf,
    },
}

impl StimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn impossible(msg: impl Into<String>) -> Self {
        Self::ImpossibleConstraint(msg.into())
    }
}

/// Result alias for the core algorithms
pub type StimResult<T> = std::result::Result<T, StimError>;
