use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use stevedore_util::errors::StevedoreError;

use crate::options::PublishOptions;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "Stevedore.toml";

/// Project configuration loaded from `Stevedore.toml`.
///
/// ```toml
/// [publish]
/// group-id = "com.example"
/// artifact-id = "widget"
/// packaging = "jar"
/// url = "https://nexus.example.com/repository/snapshots"
/// parallel = true
///
/// [publish.auth]
/// username = "deployer"
/// password = "secret"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StevedoreConfig {
    #[serde(default)]
    pub publish: PublishOptions,
}

impl StevedoreConfig {
    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, StevedoreError> {
        toml::from_str(toml_str).map_err(|e| StevedoreError::Config {
            message: e.to_string(),
        })
    }

    /// Load configuration from a file.
    pub fn from_path(path: &Path) -> Result<Self, StevedoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| StevedoreError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse(&content)
    }

    /// Load an explicitly requested file, or `Stevedore.toml` in `dir` if it
    /// exists, or fall back to defaults.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self, StevedoreError> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }
        let default_path = default_config_path(dir);
        if default_path.is_file() {
            tracing::debug!("Loading configuration from {}", default_path.display());
            Self::from_path(&default_path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Path of the default configuration file inside `dir`.
pub fn default_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}
