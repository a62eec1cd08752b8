use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::SplitError;

/// Shard file name used when the configuration does not give one.
pub const DEFAULT_SHARD_PATTERN: &str = "part-{index:05}.parquet";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    pub name: String,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub shards: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub dir: String,
    pub pattern: Option<String>,
}

impl OutputConfig {
    /// Shard file name pattern; `{index}` (optionally zero-padded, e.g.
    /// `{index:05}`) is replaced with the shard index.
    pub fn pattern(&self) -> &str {
        self.pattern.as_deref().unwrap_or(DEFAULT_SHARD_PATTERN)
    }
}

impl SplitConfig {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: SplitConfig =
            serde_yaml::from_str(content).context("Failed to parse YAML configuration")?;

        // Validate
        config.validate()?;
        Ok(config)
    }

    /// Reject bad parameters before any read/write work begins.
    fn validate(&self) -> std::result::Result<(), SplitError> {
        if self.shards == 0 {
            return Err(SplitError::InvalidArgument(
                "shards must be at least 1".to_string(),
            ));
        }

        if self.input.path.is_empty() {
            return Err(SplitError::InvalidArgument(
                "input.path must not be empty".to_string(),
            ));
        }

        // Without the placeholder every shard would overwrite the same file.
        if !self.output.pattern().contains("{index") {
            return Err(SplitError::InvalidArgument(format!(
                "output.pattern '{}' must contain an {{index}} placeholder",
                self.output.pattern()
            )));
        }

        Ok(())
    }
}
