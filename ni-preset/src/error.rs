//! Error types for preset parsing

use sample_shared::{ErrorCategory, ReadError, Reportable};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PresetError {
    /// A record or field ran past the end of its enclosing data
    #[error("Truncated {record} record: {source}")]
    Truncated {
        record: &'static str,
        #[source]
        source: ReadError,
    },

    /// The blob does not start with the expected record
    #[error("Expected {expected} record, found id 0x{found:02X}")]
    UnexpectedRecord { expected: &'static str, found: u16 },

    /// A builder was finished without a required field
    #[error("{record} is missing required field '{field}'")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error("Zone {zone} refers to group {group}, program has {groups} groups")]
    GroupIndex {
        zone: usize,
        group: i32,
        groups: usize,
    },

    #[error("Zone {zone} refers to file {file}, file table has {files} entries")]
    FileIndex { zone: usize, file: i32, files: usize },

    #[error("Negative {field}: {value}")]
    NegativeIndex { field: &'static str, value: i32 },

    #[error("Unknown loop mode {0}")]
    LoopMode(u8),
}

impl PresetError {
    pub(crate) fn truncated(record: &'static str) -> impl Fn(ReadError) -> Self {
        move |source| Self::Truncated { record, source }
    }
}

impl Reportable for PresetError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::Truncated { .. } => ErrorCategory::Io,
            _ => ErrorCategory::Format,
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            Self::Truncated { .. } => "preset.truncated",
            Self::UnexpectedRecord { .. } => "preset.record.unexpected",
            Self::MissingField { .. } => "preset.builder.missing_field",
            Self::GroupIndex { .. } => "preset.zone.group_index",
            Self::FileIndex { .. } => "preset.zone.file_index",
            Self::NegativeIndex { .. } => "preset.zone.negative_index",
            Self::LoopMode(_) => "preset.loop.mode",
        }
    }

    fn message_args(&self) -> Vec<String> {
        match self {
            Self::Truncated { record, source } => vec![record.to_string(), source.to_string()],
            Self::UnexpectedRecord { expected, found } => {
                vec![expected.to_string(), format!("0x{found:02X}")]
            }
            Self::MissingField { record, field } => vec![record.to_string(), field.to_string()],
            Self::GroupIndex {
                zone,
                group,
                groups,
            } => vec![zone.to_string(), group.to_string(), groups.to_string()],
            Self::FileIndex { zone, file, files } => {
                vec![zone.to_string(), file.to_string(), files.to_string()]
            }
            Self::NegativeIndex { field, value } => vec![field.to_string(), value.to_string()],
            Self::LoopMode(mode) => vec![mode.to_string()],
        }
    }
}
