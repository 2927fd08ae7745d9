use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{MigratorError, Result};

/// Migrator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MigratorConfig {
    /// Extra template tree patterns to rewrite, on top of the command line inputs
    pub content: Vec<String>,

    /// Patterns to skip
    pub exclude: Vec<String>,

    /// Output formatting
    pub output: OutputConfig,

    /// Input file restrictions
    pub security: SecurityConfig,
}

/// How rewritten trees are written
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print the emitted JSON
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum file size in bytes (default: 10MB)
    pub max_file_size: u64,
    /// Allow symbolic links
    pub allow_symlinks: bool,
    /// Working directory for symlink target checks
    #[serde(skip)]
    pub working_directory: PathBuf,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024, // 10MB
            allow_symlinks: false,
            working_directory: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

impl MigratorConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MigratorError::ConfigError {
                message: format!("Failed to read config file {}: {}", path.display(), e),
            })?;

        serde_yaml::from_str(&content)
            .map_err(|e| MigratorError::ConfigError {
                message: format!("Failed to parse YAML config: {}", e),
            })
    }

    /// Load configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MigratorError::ConfigError {
                message: format!("Failed to read config file {}: {}", path.display(), e),
            })?;

        serde_json::from_str(&content)
            .map_err(|e| MigratorError::ConfigError {
                message: format!("Failed to parse JSON config: {}", e),
            })
    }

    /// Load configuration from a file (auto-detect format)
    pub fn from_file(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(MigratorError::ConfigError {
                message: format!(
                    "Unsupported config file format: {}. Use .yaml, .yml, or .json",
                    path.display()
                ),
            }),
        }
    }

    /// Merge with another configuration; `other` wins on scalar settings
    pub fn merge(mut self, other: Self) -> Self {
        for pattern in other.content {
            if !self.content.contains(&pattern) {
                self.content.push(pattern);
            }
        }
        for pattern in other.exclude {
            if !self.exclude.contains(&pattern) {
                self.exclude.push(pattern);
            }
        }

        self.output = other.output;
        self.security.max_file_size = other.security.max_file_size;
        self.security.allow_symlinks = other.security.allow_symlinks;

        self
    }
}
