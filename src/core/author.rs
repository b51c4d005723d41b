//! core::author
//!
//! The author value attached to every commit.

use serde::{Deserialize, Serialize};

use super::error::RepoError;

/// A validated commit author.
///
/// Both fields are non-blank and the email has the shape `local@domain`
/// with no embedded whitespace.
///
/// # Example
///
/// ```
/// use twig::core::author::Author;
///
/// let author = Author::new("Jane", "jane@example.com").unwrap();
/// assert_eq!(author.to_string(), "Jane <jane@example.com>");
///
/// assert!(Author::new("Jane", "jane.example.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawAuthor", into = "RawAuthor")]
pub struct Author {
    name: String,
    email: String,
}

impl Author {
    /// Create a new validated author.
    ///
    /// # Errors
    ///
    /// Returns `RepoError::InvalidArgument` if the name is blank or the email
    /// is blank or malformed.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self, RepoError> {
        let author = Self {
            name: name.into(),
            email: email.into(),
        };
        author.validate()?;
        Ok(author)
    }

    /// Re-check the author's fields.
    pub fn validate(&self) -> Result<(), RepoError> {
        if self.name.trim().is_empty() {
            return Err(RepoError::invalid("author name cannot be empty"));
        }
        Self::validate_email(&self.email)
    }

    /// Check an email address on its own.
    pub(crate) fn validate_email(email: &str) -> Result<(), RepoError> {
        if email.trim().is_empty() {
            return Err(RepoError::invalid("author email cannot be empty"));
        }
        if !is_valid_email(email) {
            return Err(RepoError::invalid(format!(
                "malformed author email: '{}'",
                email
            )));
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Minimal syntactic check: exactly one `@`, non-empty on both sides, no whitespace.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

#[derive(Serialize, Deserialize)]
struct RawAuthor {
    name: String,
    email: String,
}

impl TryFrom<RawAuthor> for Author {
    type Error = RepoError;

    fn try_from(raw: RawAuthor) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.email)
    }
}

impl From<Author> for RawAuthor {
    fn from(author: Author) -> Self {
        Self {
            name: author.name,
            email: author.email,
        }
    }
}
