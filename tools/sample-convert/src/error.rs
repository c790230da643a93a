//! Per-file error reported by the loader and the batch driver

use std::path::PathBuf;

use multisample::MappingError;
use ni_container::ContainerError;
use ni_ncw::NcwError;
use ni_preset::PresetError;
use sample_shared::{ErrorCategory, Reportable};
use thiserror::Error;

/// A failure while converting one source file
#[derive(Debug, Error)]
#[error("{}: {source}", .path.display())]
pub struct LoadError {
    pub path: PathBuf,
    #[source]
    pub source: SourceError,
}

impl LoadError {
    pub fn new(path: impl Into<PathBuf>, source: impl Into<SourceError>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{0}")]
    Read(String),

    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error(transparent)]
    Preset(#[from] PresetError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Ncw(#[from] NcwError),

    #[error("Container holds no preset")]
    NoPreset,

    #[error("Unsupported file type '{0}'")]
    UnsupportedExtension(String),

    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),

    #[error("Failed to serialize instrument: {0}")]
    Json(#[from] serde_json::Error),
}

impl Reportable for LoadError {
    fn category(&self) -> ErrorCategory {
        self.source.category()
    }

    fn message_key(&self) -> &'static str {
        self.source.message_key()
    }

    /// The file path comes first, followed by the failure's own arguments
    fn message_args(&self) -> Vec<String> {
        let mut args = vec![self.path.display().to_string()];
        args.extend(self.source.message_args());
        args
    }
}

impl Reportable for SourceError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::Read(_) | Self::Write(_) => ErrorCategory::Io,
            Self::Container(e) => e.category(),
            Self::Preset(e) => e.category(),
            Self::Mapping(e) => e.category(),
            Self::Ncw(e) => e.category(),
            Self::NoPreset | Self::Json(_) => ErrorCategory::Format,
            Self::UnsupportedExtension(_) => ErrorCategory::Unsupported,
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            Self::Read(_) => "load.read",
            Self::Container(e) => e.message_key(),
            Self::Preset(e) => e.message_key(),
            Self::Mapping(e) => e.message_key(),
            Self::Ncw(e) => e.message_key(),
            Self::NoPreset => "load.no_preset",
            Self::UnsupportedExtension(_) => "load.unsupported_extension",
            Self::Write(_) => "load.write",
            Self::Json(_) => "load.json",
        }
    }

    fn message_args(&self) -> Vec<String> {
        match self {
            Self::Read(reason) => vec![reason.clone()],
            Self::Container(e) => e.message_args(),
            Self::Preset(e) => e.message_args(),
            Self::Mapping(e) => e.message_args(),
            Self::Ncw(e) => e.message_args(),
            Self::NoPreset => Vec::new(),
            Self::UnsupportedExtension(ext) => vec![ext.clone()],
            Self::Write(e) => vec![e.to_string()],
            Self::Json(e) => vec![e.to_string()],
        }
    }
}
