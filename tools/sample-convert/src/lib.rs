//! sample-convert library
//!
//! Loading pipeline and batch driver behind the `sample-convert` binary:
//!
//! ```text
//! .nki ── parse_chain ── preset blob ── parse_preset ── convert_kontakt ── JSON
//! .ncw ── decode_ncw ─────────────────────────────────────────────────── WAV
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod loader;
pub mod probe;

pub use batch::{BatchOptions, BatchSummary, Converted, FileResult, collect_sources, run_batch};
pub use config::ConvertConfig;
pub use error::{LoadError, SourceError};
pub use loader::{SourceKind, load_instrument, load_ncw};
