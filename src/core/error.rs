//! core::error
//!
//! Errors surfaced by the core API.
//!
//! Every failure in the core is a caller-input error. Validation runs before
//! any mutation, so a returned error always leaves the repository untouched.

use thiserror::Error;

/// Errors from core operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepoError {
    /// An input failed validation (empty string, malformed email, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation referenced a branch that does not exist.
    #[error("branch not found: {0}")]
    BranchNotFound(String),
}

impl RepoError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Check if this is an `InvalidArgument` error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is a `BranchNotFound` error.
    pub fn is_branch_not_found(&self) -> bool {
        matches!(self, Self::BranchNotFound(_))
    }
}
