//! core::commit
//!
//! Immutable commit nodes.
//!
//! A commit's identity is a SHA-256 over its content (message, author and
//! parent identity), truncated to [`CommitId::LEN`] hex characters. The
//! creation timestamp is recorded but does not feed the identity, so equal
//! content always yields an equal id.

use serde::Serialize;
use sha2::{Digest, Sha256};

use super::author::Author;
use super::error::RepoError;
use super::types::{CommitId, UtcTimestamp};

/// Stand-in for the parent identity of a root commit.
const ROOT_SENTINEL: &[u8] = b"root";

/// A single commit.
///
/// The parent is held as an identity, never as an owned node, so a commit
/// can only point at something that existed before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    id: CommitId,
    message: String,
    author: Author,
    parent: Option<CommitId>,
    timestamp: UtcTimestamp,
}

impl Commit {
    /// Create a commit on top of `parent` (or a root commit when `None`).
    ///
    /// # Errors
    ///
    /// Returns `RepoError::InvalidArgument` if the message is blank or the
    /// author fails validation.
    ///
    /// # Example
    ///
    /// ```
    /// use twig::core::author::Author;
    /// use twig::core::commit::Commit;
    ///
    /// let author = Author::new("Tom", "tom@example.com").unwrap();
    /// let root = Commit::new("first", &author, None).unwrap();
    /// let next = Commit::new("second", &author, Some(&root)).unwrap();
    ///
    /// assert_eq!(root.id().as_str().len(), 12);
    /// assert_eq!(next.parent_id(), Some(root.id()));
    /// ```
    pub fn new(
        message: impl Into<String>,
        author: &Author,
        parent: Option<&Commit>,
    ) -> Result<Self, RepoError> {
        let message = message.into();
        Self::validate(&message, author)?;

        let parent = parent.map(|p| p.id.clone());
        let id = Self::compute_id(&message, author, parent.as_ref());

        Ok(Self {
            id,
            message,
            author: author.clone(),
            parent,
            timestamp: UtcTimestamp::now(),
        })
    }

    /// Check commit inputs without constructing anything.
    pub(crate) fn validate(message: &str, author: &Author) -> Result<(), RepoError> {
        if message.trim().is_empty() {
            return Err(RepoError::invalid("commit message cannot be empty"));
        }
        author.validate()
    }

    fn compute_id(message: &str, author: &Author, parent: Option<&CommitId>) -> CommitId {
        let mut hasher = Sha256::new();
        hasher.update(message.as_bytes());
        hasher.update(b"\0");
        hasher.update(author.email().as_bytes());
        hasher.update(b"\0");
        hasher.update(author.name().as_bytes());
        hasher.update(b"\0");
        match parent {
            Some(id) => hasher.update(id.as_str().as_bytes()),
            None => hasher.update(ROOT_SENTINEL),
        }
        CommitId::from_digest(&hasher.finalize())
    }

    pub fn id(&self) -> &CommitId {
        &self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    /// Identity of the parent commit, `None` for a root commit.
    pub fn parent_id(&self) -> Option<&CommitId> {
        self.parent.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn timestamp(&self) -> &UtcTimestamp {
        &self.timestamp
    }
}
