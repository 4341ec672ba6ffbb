//! Config module - Manages sealbox configuration (sealbox.toml).
//!
//! Configuration file contains:
//! - Input size limit
//! - Weak password confirmation
//! - Generator defaults and output directory

use crate::password::DEFAULT_PASSWORD_LENGTH;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Newest config schema this build understands
pub const CONFIG_VERSION: u32 = 1;

/// 100 MiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Main sealbox configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Config version (for future migrations)
    #[serde(default = "default_version")]
    pub version: u32,

    /// Largest input file accepted, in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Ask before encrypting with a weak password
    #[serde(default = "default_confirm_weak_password")]
    pub confirm_weak_password: bool,

    /// Default length for generated passwords
    #[serde(default = "default_password_length")]
    pub password_length: usize,

    /// Where outputs are written (default: next to the input)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_confirm_weak_password() -> bool {
    true
}

fn default_password_length() -> usize {
    DEFAULT_PASSWORD_LENGTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            max_file_size: default_max_file_size(),
            confirm_weak_password: default_confirm_weak_password(),
            password_length: default_password_length(),
            output_dir: None,
        }
    }
}

/// Get default config directory (~/.config/sealbox/).
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("sealbox"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get default config file path.
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("sealbox.toml")
}

impl Config {
    /// Load config from file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Cannot parse config file: {}", path.display()))?;

        if !(1..=CONFIG_VERSION).contains(&config.version) {
            bail!(
                "Unsupported config version {} in {} (supported: 1..={})",
                config.version,
                path.display(),
                CONFIG_VERSION
            );
        }

        Ok(config)
    }

    /// Load config from `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).with_context(|| "Cannot serialize config to TOML")?;

        std::fs::write(path, content)
            .with_context(|| format!("Cannot write config file: {}", path.display()))?;

        // Restrict file permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Directory outputs for `input` go to.
    pub fn output_dir_for(&self, input: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}
