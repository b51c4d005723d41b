//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing to ensure they conform to
//! expected formats (e.g., the default author must be a valid author).

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::author::Author;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// [user]
/// name = "Jane"
/// email = "jane@example.com"
///
/// [log]
/// oneline = true
/// json = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Default commit author
    pub user: Option<UserConfig>,

    /// Log rendering defaults
    pub log: Option<LogDefaults>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(user) = &self.user {
            user.validate()?;
        }
        Ok(())
    }
}

/// Default author identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct UserConfig {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserConfig {
    /// Validate the user section.
    ///
    /// A partially filled section is allowed, but every field that is set
    /// must be valid, and a fully filled one must form a valid author.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "user.name cannot be empty".to_string(),
                ));
            }
        }
        if let Some(email) = &self.email {
            Author::validate_email(email)
                .map_err(|e| ConfigError::InvalidValue(format!("invalid user.email: {}", e)))?;
        }
        if let (Some(name), Some(email)) = (&self.name, &self.email) {
            Author::new(name.as_str(), email.as_str())
                .map_err(|e| ConfigError::InvalidValue(format!("invalid user: {}", e)))?;
        }
        Ok(())
    }

    /// Build the configured author, if both fields are set.
    pub fn author(&self) -> Option<Author> {
        match (&self.name, &self.email) {
            (Some(name), Some(email)) => Author::new(name.as_str(), email.as_str()).ok(),
            _ => None,
        }
    }
}

/// Log rendering defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LogDefaults {
    /// One line per commit
    pub oneline: Option<bool>,

    /// Machine-readable JSON output
    pub json: Option<bool>,
}
