//! Error types for preset mapping

use std::path::PathBuf;

use sample_shared::{ErrorCategory, Reportable};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("Zone {zone} refers to file {file}, file table has {files} entries")]
    FileIndex { zone: usize, file: usize, files: usize },

    /// Sample file missing from every candidate location
    #[error("Sample '{path}' not found (searched from {})", .searched_from.display())]
    SampleNotFound { path: String, searched_from: PathBuf },
}

impl Reportable for MappingError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::FileIndex { .. } => ErrorCategory::Format,
            Self::SampleNotFound { .. } => ErrorCategory::Io,
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            Self::FileIndex { .. } => "mapping.zone.file_index",
            Self::SampleNotFound { .. } => "mapping.sample.not_found",
        }
    }

    fn message_args(&self) -> Vec<String> {
        match self {
            Self::FileIndex { zone, file, files } => {
                vec![zone.to_string(), file.to_string(), files.to_string()]
            }
            Self::SampleNotFound {
                path,
                searched_from,
            } => vec![path.clone(), searched_from.display().to_string()],
        }
    }
}
