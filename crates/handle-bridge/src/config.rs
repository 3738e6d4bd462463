use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::logging::setup_global_logging;

/// Default upper bound on the size of an encoded handle (64 KiB)
pub const DEFAULT_MAX_ENCODED_LEN: usize = 64 * 1024;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BridgeConfig {
    pub codec: CodecConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CodecConfig {
    /// Encoded handles longer than this are rejected on decode
    pub max_encoded_len: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_encoded_len: DEFAULT_MAX_ENCODED_LEN,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub output: LogOutput,
    pub file_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stdout,
    File,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            output: LogOutput::File,
            file_path: None,
        }
    }
}

impl LoggingConfig {
    pub fn log_path(&self) -> PathBuf {
        self.file_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("logs").join("handle-bridge.log"))
    }

    /// Install the global subscriber described by this config.
    pub fn init(&self) -> Result<()> {
        setup_global_logging(self)
    }
}

impl BridgeConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse bridge config")
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading bridge config from {:?}", path);
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {:?}", path))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file at {:?}", path))
    }
}
