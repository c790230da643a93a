//! Sample file resolution
//!
//! Presets store sample paths the way they were on the authoring machine, so a
//! path is tried in a fixed order:
//!
//! 1. the path as given, relative to the instrument directory
//! 2. the file name alone in the instrument directory
//! 3. the last resolved sample's directory and the two directories above it
//!    (above the instrument directory before anything resolved), first with
//!    the path as given and then with the file name
//!
//! Step 3 is skipped for monoliths. A program is treated as a monolith when it
//! says so or when none of its files exist at steps 1 and 2; missing files are
//! then tolerated and the sample is taken to be embedded.

use std::path::{Path, PathBuf};

use crate::MappingError;

/// Directory levels searched above the anchor directory
const SEARCH_LEVELS: usize = 2;

#[derive(Debug, Clone)]
pub struct SampleResolver {
    instrument_dir: PathBuf,
    monolith: bool,
    anchor: Option<PathBuf>,
}

impl SampleResolver {
    /// `referenced` lists every file path the program's zones use.
    pub fn new(instrument_dir: impl Into<PathBuf>, flagged_monolith: bool, referenced: &[&str]) -> Self {
        let mut resolver = Self {
            instrument_dir: instrument_dir.into(),
            monolith: flagged_monolith,
            anchor: None,
        };
        if !resolver.monolith
            && !referenced.is_empty()
            && referenced.iter().all(|p| resolver.direct(p).is_none())
        {
            tracing::debug!(
                files = referenced.len(),
                "no sample files found next to instrument, treating as monolith"
            );
            resolver.monolith = true;
        }
        resolver
    }

    pub fn is_monolith(&self) -> bool {
        self.monolith
    }

    /// Locate `path` on disk.
    ///
    /// Returns `Ok(None)` for a missing sample of a monolith.
    pub fn resolve(&mut self, path: &str) -> Result<Option<PathBuf>, MappingError> {
        let found = match self.direct(path) {
            Some(found) => Some(found),
            None if self.monolith => None,
            None => self.search_upward(path),
        };

        match found {
            Some(found) => {
                self.anchor = found.parent().map(Path::to_path_buf);
                Ok(Some(found))
            }
            None if self.monolith => {
                tracing::warn!(path, "sample not on disk, assuming embedded");
                Ok(None)
            }
            None => Err(MappingError::SampleNotFound {
                path: path.to_string(),
                searched_from: self.anchor_dir().to_path_buf(),
            }),
        }
    }

    fn anchor_dir(&self) -> &Path {
        self.anchor.as_deref().unwrap_or(&self.instrument_dir)
    }

    fn direct(&self, path: &str) -> Option<PathBuf> {
        let relative = normalize(path);
        let exact = self.instrument_dir.join(&relative);
        if exact.is_file() {
            return Some(exact);
        }
        let by_name = self.instrument_dir.join(relative.file_name()?);
        by_name.is_file().then_some(by_name)
    }

    fn search_upward(&self, path: &str) -> Option<PathBuf> {
        let relative = normalize(path);
        let name = relative.file_name()?;
        let anchor = self.anchor_dir();
        // The instrument directory itself was already tried directly
        let skip = usize::from(anchor == self.instrument_dir.as_path());
        anchor
            .ancestors()
            .skip(skip)
            .take(SEARCH_LEVELS + 1 - skip)
            .flat_map(|dir| [dir.join(&relative), dir.join(name)])
            .find(|candidate| candidate.is_file())
            .inspect(|found| tracing::debug!(path, found = %found.display(), "sample found by upward search"))
    }
}

/// Split on both separator styles; stored paths often come from Windows.
fn normalize(path: &str) -> PathBuf {
    let mut out = if path.starts_with('/') {
        PathBuf::from("/")
    } else {
        PathBuf::new()
    };
    for part in path.split(['/', '\\']).filter(|p| !p.is_empty()) {
        out.push(part);
    }
    out
}
