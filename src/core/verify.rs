//! core::verify
//!
//! Repository invariant verification.
//!
//! # Checks
//!
//! - `main` branch exists
//! - Current branch is a known branch
//! - Every branch head resolves to a recorded commit
//! - Every parent chain resolves down to a root commit
//!
//! # Invariants
//!
//! - Never mutates the repository
//! - Must be deterministic

use thiserror::Error;

use super::repository::Repository;
use super::types::DEFAULT_BRANCH;

/// Errors from verification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("default branch '{0}' is missing")]
    DefaultBranchMissing(String),

    #[error("current branch does not exist: {0}")]
    CurrentBranchMissing(String),

    #[error("head of branch '{branch}' does not resolve: {id}")]
    HeadMissing { branch: String, id: String },

    #[error("ancestry of branch '{branch}' is broken at: {id}")]
    DanglingParent { branch: String, id: String },
}

/// Result of verification.
#[derive(Debug)]
pub struct VerifyResult {
    /// Whether verification passed
    pub ok: bool,
    /// Errors found during verification
    pub errors: Vec<VerifyError>,
}

impl VerifyResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: vec![],
        }
    }

    /// Create a failed result with errors.
    pub fn failure(errors: Vec<VerifyError>) -> Self {
        Self { ok: false, errors }
    }
}

/// Check every repository invariant.
pub fn verify(repo: &Repository) -> VerifyResult {
    let mut errors = Vec::new();

    if !repo.branches().contains_key(DEFAULT_BRANCH) {
        errors.push(VerifyError::DefaultBranchMissing(DEFAULT_BRANCH.to_string()));
    }

    let current = repo.current_branch();
    if !repo.branches().contains_key(current) {
        errors.push(VerifyError::CurrentBranchMissing(current.to_string()));
    }

    let graph = repo.graph();
    for (branch, head) in repo.branches() {
        let Some(head) = head else { continue };
        if !graph.contains(head) {
            errors.push(VerifyError::HeadMissing {
                branch: branch.to_string(),
                id: head.to_string(),
            });
        } else if let Some(id) = graph.find_dangling(head) {
            errors.push(VerifyError::DanglingParent {
                branch: branch.to_string(),
                id: id.to_string(),
            });
        }
    }

    if errors.is_empty() {
        VerifyResult::success()
    } else {
        VerifyResult::failure(errors)
    }
}
