//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Twig has a single, user-level configuration file. It supplies a default
//! commit author and log rendering defaults. CLI flags override it.
//!
//! # Locations
//!
//! Searched in order:
//! 1. An explicit path (the `--config` flag)
//! 2. `$TWIG_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/twig/config.toml`
//! 4. `~/.twig/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use twig::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! if let Some(author) = config.author() {
//!     println!("Committing as {}", author);
//! }
//! println!("Oneline log: {}", config.log_oneline());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, LogDefaults, UserConfig};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::author::Author;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TWIG_CONFIG";

/// Keys understood by `get_key` and `set_key`.
pub const KEYS: &[&str] = &["user.name", "user.email", "log.oneline", "log.json"];

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// The parsed configuration
    pub global: GlobalConfig,
    /// Path the configuration was loaded from (if any)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise the standard locations are
    /// searched and a missing file means defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover(),
        };

        let Some(path) = path else {
            return Ok(Self::default());
        };

        if explicit.is_none() && !path.exists() {
            return Ok(Self::default());
        }

        let global = Self::read_config(&path)?;
        global.validate()?;

        Ok(Self {
            global,
            path: Some(path),
        })
    }

    /// Find the first existing config file in the standard locations.
    fn discover() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("twig/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".twig/config.toml"))
            .filter(|path| path.exists())
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<GlobalConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical path for the config file.
    ///
    /// Returns `~/.twig/config.toml`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".twig/config.toml"))
    }

    /// The config file named by `--config` or `$TWIG_CONFIG`, whether or not
    /// it exists yet.
    pub fn explicit_path(cli: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = cli {
            return Some(path.to_path_buf());
        }
        std::env::var_os(CONFIG_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    /// Path to write to: the loaded file, else the canonical location.
    pub fn write_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Self::default_path(),
        }
    }

    /// Write a config file atomically.
    ///
    /// Creates parent directories if needed. Writes to a temp file and
    /// renames it into place.
    pub fn write(path: &Path, config: &GlobalConfig) -> Result<(), ConfigError> {
        config.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Key access
    // =========================================================================

    /// Get a value by dotted key. `Ok(None)` means the key is unset.
    pub fn get_key(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let user = self.global.user.as_ref();
        let log = self.global.log.as_ref();
        Ok(match key {
            "user.name" => user.and_then(|u| u.name.clone()),
            "user.email" => user.and_then(|u| u.email.clone()),
            "log.oneline" => log.and_then(|l| l.oneline).map(|b| b.to_string()),
            "log.json" => log.and_then(|l| l.json).map(|b| b.to_string()),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        })
    }

    /// Set a value by dotted key.
    ///
    /// The change is validated but not written; see [`Config::write`]. A
    /// rejected change leaves the configuration untouched.
    pub fn set_key(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut next = self.global.clone();
        match key {
            "user.name" => {
                next.user.get_or_insert_with(Default::default).name = Some(value.to_string())
            }
            "user.email" => {
                next.user.get_or_insert_with(Default::default).email = Some(value.to_string())
            }
            "log.oneline" => {
                next.log.get_or_insert_with(Default::default).oneline =
                    Some(parse_bool(key, value)?)
            }
            "log.json" => {
                next.log.get_or_insert_with(Default::default).json = Some(parse_bool(key, value)?)
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        next.validate()?;
        self.global = next;
        Ok(())
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// The configured default author, if fully specified.
    pub fn author(&self) -> Option<Author> {
        self.global.user.as_ref().and_then(UserConfig::author)
    }

    /// Render the log one line per commit.
    ///
    /// Defaults to `false` if not configured.
    pub fn log_oneline(&self) -> bool {
        self.global
            .log
            .as_ref()
            .and_then(|l| l.oneline)
            .unwrap_or(false)
    }

    /// Render output as JSON.
    ///
    /// Defaults to `false` if not configured.
    pub fn log_json(&self) -> bool {
        self.global.log.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    /// Get the path the configuration was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue(format!(
            "{} expects a boolean, got '{}'",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_file() {
        let config = Config::default();
        assert!(config.author().is_none());
        assert!(!config.log_oneline());
        assert!(!config.log_json());
        assert!(config.loaded_from().is_none());
    }

    #[test]
    fn load_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [user]
            name = "Jane"
            email = "jane@example.com"

            [log]
            json = true
            "#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.author().unwrap().name(), "Jane");
        assert!(config.log_json());
        assert_eq!(config.loaded_from(), Some(path.as_path()));
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let result = Config::load(Some(&temp.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn parse_error_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[user\nname = ").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn invalid_author_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [user]
            name = "Jane"
            email = "not-an-email"
            "#,
        )
        .unwrap();

        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn write_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config.toml");

        let mut config = Config::default();
        config.set_key("user.name", "Jane").unwrap();
        config.set_key("user.email", "jane@example.com").unwrap();
        config.set_key("log.oneline", "yes").unwrap();
        Config::write(&path, &config.global).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.global, config.global);
        assert!(loaded.log_oneline());
    }

    #[test]
    fn get_and_set_keys() {
        let mut config = Config::default();
        assert_eq!(config.get_key("user.name").unwrap(), None);

        config.set_key("log.json", "true").unwrap();
        assert_eq!(config.get_key("log.json").unwrap(), Some("true".to_string()));
    }

    #[test]
    fn unknown_key_rejected() {
        let mut config = Config::default();
        assert!(matches!(
            config.get_key("trunk"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            config.set_key("trunk", "main"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn bad_bool_rejected() {
        let mut config = Config::default();
        assert!(matches!(
            config.set_key("log.oneline", "maybe"),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn bad_email_rejected_on_set() {
        let mut config = Config::default();
        config.set_key("user.name", "Jane").unwrap();
        assert!(config.set_key("user.email", "jane").is_err());
        assert_eq!(config.get_key("user.email").unwrap(), None);
    }

    #[test]
    fn bad_email_rejected_without_name() {
        let mut config = Config::default();
        assert!(matches!(
            config.set_key("user.email", "not-an-email"),
            Err(ConfigError::InvalidValue(_))
        ));
        assert_eq!(config.get_key("user.email").unwrap(), None);
    }

    #[test]
    fn explicit_path_prefers_cli() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.toml");
        assert_eq!(Config::explicit_path(Some(&path)), Some(path));
    }
}
