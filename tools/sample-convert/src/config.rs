//! convert.toml parsing

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "convert.toml";

/// convert.toml structure
#[derive(Debug, Default, Deserialize)]
pub struct ConvertConfig {
    #[serde(default)]
    pub input: InputSection,
    #[serde(default)]
    pub output: OutputSection,
    /// Filter directive used when RUST_LOG is not set (e.g. "debug")
    #[serde(default)]
    pub log_level: Option<String>,
}

/// Source files and directories
#[derive(Debug, Default, Deserialize)]
pub struct InputSection {
    #[serde(default)]
    pub paths: Vec<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct OutputSection {
    /// Output directory; next to each source when unset
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// Write decoded NCW samples as WAV.
    /// Default: true
    #[serde(default = "default_true")]
    pub write_wav: bool,
    /// Write converted instruments as JSON.
    /// Default: true
    #[serde(default = "default_true")]
    pub write_json: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: None,
            write_wav: true,
            write_json: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl ConvertConfig {
    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parse config from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse convert.toml")
    }

    /// Load `path` if given, else `convert.toml` when present, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(CONFIG_FILE_NAME).is_file() => Self::load(Path::new(CONFIG_FILE_NAME)),
            None => Ok(Self::default()),
        }
    }
}
