//! Optional TOML configuration file.
//!
//! The file is optional — a missing file yields `Config::default()`.
//! Unknown keys are accepted (with a logged warning) so typos don't stop a run.
//! Values given on the command line take precedence.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::convert::ConvertConfig;

/// Input path used when neither the CLI nor the config file names one.
pub const DEFAULT_INPUT: &str = "data/blog.xml";

/// Output directory used when neither the CLI nor the config file names one.
pub const DEFAULT_OUTPUT_DIR: &str = "./content/";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// SEC-014: Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Settings read from the config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Blogger export to convert.
    pub input: Option<PathBuf>,

    /// Existing directory for the generated `.md` files.
    pub output_dir: Option<PathBuf>,

    /// Tera template replacing the built-in one.
    pub template: Option<PathBuf>,
}

impl Config {
    /// SEC-014: Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = ["input", "output_dir", "template"];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Resolves the run settings: CLI value, then file value, then default.
    pub fn resolve(
        self,
        input: Option<PathBuf>,
        output_dir: Option<PathBuf>,
        template: Option<PathBuf>,
    ) -> ConvertConfig {
        ConvertConfig {
            input: input
                .or(self.input)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            output_dir: output_dir
                .or(self.output_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            template: template.or(self.template),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
