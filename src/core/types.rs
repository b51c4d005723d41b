//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`BranchName`] - Validated branch name
//! - [`CommitId`] - Fixed-length commit identity
//! - [`UtcTimestamp`] - RFC3339 timestamp
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use twig::core::types::{BranchName, CommitId};
//!
//! let branch = BranchName::new("feature/my-branch").unwrap();
//! let id = CommitId::new("abc123def456").unwrap();
//!
//! assert!(BranchName::new("").is_err());
//! assert!(CommitId::new("not-an-id").is_err());
//! ```

use serde::{Deserialize, Serialize};

use super::error::RepoError;

/// The branch every repository starts with.
pub const DEFAULT_BRANCH: &str = "main";

/// A validated branch name.
///
/// Branch names must be non-empty, must not be blank, and must not contain
/// ASCII control characters.
///
/// # Example
///
/// ```
/// use twig::core::types::BranchName;
///
/// let name = BranchName::new("feature/my-branch").unwrap();
/// assert_eq!(name.as_str(), "feature/my-branch");
///
/// assert!(BranchName::new("").is_err());
/// assert!(BranchName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns `RepoError::InvalidArgument` if the name is empty, blank, or
    /// contains control characters.
    pub fn new(name: impl Into<String>) -> Result<Self, RepoError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    /// The name of the branch created with every repository.
    pub fn main() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }

    fn validate(name: &str) -> Result<(), RepoError> {
        if name.trim().is_empty() {
            return Err(RepoError::invalid("branch name cannot be empty"));
        }
        if name.chars().any(|c| c.is_ascii_control()) {
            return Err(RepoError::invalid(
                "branch name cannot contain control characters",
            ));
        }
        Ok(())
    }

    /// Get the branch name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BranchName {
    type Error = RepoError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for BranchName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A commit identity: 12 lowercase hex characters.
///
/// Identities are derived from commit content (see
/// [`Commit::new`](crate::core::commit::Commit::new)). Callers should treat
/// them as opaque.
///
/// # Example
///
/// ```
/// use twig::core::types::CommitId;
///
/// let id = CommitId::new("ABC123DEF456").unwrap();
/// assert_eq!(id.as_str(), "abc123def456");
/// assert_eq!(id.short(7), "abc123d");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitId(String);

impl CommitId {
    /// Number of characters in every commit identity.
    pub const LEN: usize = 12;

    /// Parse a commit identity.
    ///
    /// The identity is normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns `RepoError::InvalidArgument` if the string is not 12 hex characters.
    pub fn new(id: impl Into<String>) -> Result<Self, RepoError> {
        let id = id.into().to_ascii_lowercase();
        if id.len() != Self::LEN {
            return Err(RepoError::invalid(format!(
                "commit id must be {} characters, got {}",
                Self::LEN,
                id.len()
            )));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RepoError::invalid("commit id must be hexadecimal"));
        }
        Ok(Self(id))
    }

    /// Build an identity from the leading bytes of a digest.
    pub(crate) fn from_digest(digest: &[u8]) -> Self {
        let mut hex = hex::encode(&digest[..Self::LEN / 2]);
        hex.truncate(Self::LEN);
        Self(hex)
    }

    /// Get an abbreviated form of the identity.
    ///
    /// Returns the first `len` characters, or the full identity if `len`
    /// exceeds it.
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    /// Get the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CommitId {
    type Error = RepoError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CommitId> for String {
    fn from(id: CommitId) -> Self {
        id.0
    }
}

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A UTC timestamp in RFC3339 format.
///
/// # Example
///
/// ```
/// use twig::core::types::UtcTimestamp;
///
/// let now = UtcTimestamp::now();
/// println!("Current time: {}", now);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtcTimestamp(chrono::DateTime<chrono::Utc>);

impl UtcTimestamp {
    /// Create a timestamp for the current moment.
    pub fn now() -> Self {
        Self(chrono::Utc::now())
    }
}

impl std::fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
