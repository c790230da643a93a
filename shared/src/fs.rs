//! Filesystem helpers for the converter driver.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Maximum size of a source instrument or sample file read into memory.
pub const MAX_SOURCE_BYTES: u64 = 2 * 1024 * 1024 * 1024; // 2 GiB

/// Read a whole source file, refusing anything larger than `max_bytes`.
///
/// The cap is applied to the bytes actually read, so a file growing between
/// the size check and the read is still rejected.
pub fn read_file_with_limit(path: &Path, max_bytes: u64) -> Result<Vec<u8>> {
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let hint = file.metadata().map(|m| m.len()).unwrap_or(0);
    if hint > max_bytes {
        anyhow::bail!("{} is {} bytes, limit is {}", path.display(), hint, max_bytes);
    }

    let mut data = Vec::with_capacity(hint as usize);
    file.take(max_bytes + 1)
        .read_to_end(&mut data)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    if data.len() as u64 > max_bytes {
        anyhow::bail!("{} exceeds the {} byte limit", path.display(), max_bytes);
    }
    Ok(data)
}

/// Lower-cased file extension, empty when there is none.
pub fn extension_lowercase(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default()
}
