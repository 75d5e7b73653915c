//! Configuration management for ztv.
//!
//! This module handles loading and validating user configuration
//! including Zendesk profiles and viewer settings. Configuration lives in a
//! TOML file under the platform configuration directory.

mod profile;
mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use profile::Profile;
pub use settings::Settings;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The configuration is syntactically valid but semantically wrong.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Profile '{0}' not found")]
    ProfileNotFound(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The configuration file name.
const CONFIG_FILE: &str = "config.toml";

/// The top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// The name of the profile used when none is given on the command line.
    #[serde(default)]
    pub default_profile: Option<String>,
    /// Configured Zendesk profiles.
    #[serde(default)]
    pub profiles: Vec<Profile>,
    /// Viewer settings.
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Load the configuration from the default location.
    ///
    /// A missing file yields the default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load the configuration from a specific file.
    ///
    /// A missing file yields the default configuration.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;

        debug!(
            path = %path.display(),
            profiles = config.profiles.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Get the default configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("ztv").join(CONFIG_FILE))
    }

    /// Validate all profiles and settings.
    ///
    /// Checks that every profile is valid, profile names are unique, and the
    /// default profile (if set) exists.
    pub fn validate(&self) -> Result<()> {
        for (i, profile) in self.profiles.iter().enumerate() {
            profile.validate()?;

            if self.profiles[..i].iter().any(|p| p.name == profile.name) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate profile name '{}'",
                    profile.name
                )));
            }
        }

        if let Some(name) = &self.default_profile {
            if self.get_profile(name).is_none() {
                return Err(ConfigError::ValidationError(format!(
                    "default profile '{}' is not defined",
                    name
                )));
            }
        }

        self.settings.validate()
    }

    /// Find a profile by name.
    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Get the default profile.
    ///
    /// Falls back to the first profile when no default is set.
    pub fn get_default_profile(&self) -> Option<&Profile> {
        match &self.default_profile {
            Some(name) => self.get_profile(name),
            None => self.profiles.first(),
        }
    }

    /// Resolve the profile to use for a session.
    ///
    /// An explicit name must exist; otherwise the default profile is used.
    pub fn resolve_profile(&self, name: Option<&str>) -> Result<&Profile> {
        match name {
            Some(name) => self
                .get_profile(name)
                .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string())),
            None => self.get_default_profile().ok_or_else(|| {
                ConfigError::ValidationError(
                    "no profiles configured; add one to the config file or use --demo".to_string(),
                )
            }),
        }
    }
}
