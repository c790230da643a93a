//! Error taxonomy shared by every decoder.
//!
//! Callers outside the workspace see a failure as a message key plus a list of
//! formatting arguments. The key is stable; the arguments carry the context
//! (chunk type, block index, offending value).

use serde::Serialize;

/// Coarse classification of a decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCategory {
    /// Bad magic, version, offset, type id or any other structural violation
    Format,
    /// Stream truncated or unreadable
    Io,
    /// Well-formed input using a feature this engine does not handle
    Unsupported,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Format => "format",
            ErrorCategory::Io => "io",
            ErrorCategory::Unsupported => "unsupported",
        }
    }
}

impl core::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error reporting surface exposed to external callers.
pub trait Reportable: std::error::Error {
    /// Which branch of the taxonomy this failure belongs to
    fn category(&self) -> ErrorCategory;

    /// Stable identifier of the message, e.g. `ncw.block.magic`
    fn message_key(&self) -> &'static str;

    /// Formatting arguments for the message, in order
    fn message_args(&self) -> Vec<String> {
        Vec::new()
    }
}
