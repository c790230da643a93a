//! Shared types for the sample-convert crates.
//!
//! Everything the format crates have in common lives here: the error taxonomy
//! that is reported to callers, a bounds-checked little-endian byte reader and
//! the filesystem helpers used by the driver.

pub mod error;
pub mod fs;
pub mod read;

pub use error::{ErrorCategory, Reportable};
pub use read::{ByteReader, ReadError};
