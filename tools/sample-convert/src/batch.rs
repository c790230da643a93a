//! Batch conversion driver
//!
//! Sources are converted one at a time on a background worker. Each finished
//! file is sent over a bounded channel to the caller, which handles results
//! one at a time. Cancellation is cooperative: the shared flag is checked by
//! the worker before each file and before each result is delivered, and by
//! the caller between results. A file that has started decoding always runs
//! to completion or failure.
//!
//! # Usage
//!
//! ```ignore
//! let cancel = Arc::new(AtomicBool::new(false));
//! let sources = collect_sources(&config.input.paths);
//! let summary = run_batch(sources, options, cancel, |result| {
//!     println!("{}", result.source.display());
//! })?;
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, sync_channel};
use std::thread::{self, JoinHandle};

use anyhow::Result;
use multisample::MultisampleInstrument;
use walkdir::WalkDir;

use crate::error::{LoadError, SourceError};
use crate::loader::{SourceKind, load_instrument, load_ncw};

/// Results buffered between the worker and the caller
const RESULT_QUEUE: usize = 4;

/// What to write for each source
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Output directory; next to each source when `None`
    pub output_dir: Option<PathBuf>,
    pub write_wav: bool,
    pub write_json: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            write_wav: true,
            write_json: true,
        }
    }
}

impl BatchOptions {
    fn output_path(&self, source: &Path, extension: &str) -> PathBuf {
        let dir = match &self.output_dir {
            Some(dir) => dir.as_path(),
            None => source.parent().unwrap_or(Path::new("")),
        };
        let stem = source.file_stem().unwrap_or(source.as_os_str());
        dir.join(stem).with_extension(extension)
    }
}

/// A successfully converted source
#[derive(Debug)]
pub enum Converted {
    Instrument {
        instrument: Box<MultisampleInstrument>,
        /// JSON file written, if any
        output: Option<PathBuf>,
    },
    Sample {
        channels: u16,
        sample_rate: u32,
        frames: usize,
        /// WAV file written, if any
        output: Option<PathBuf>,
    },
}

/// Outcome of one source file
#[derive(Debug)]
pub struct FileResult {
    pub source: PathBuf,
    pub outcome: Result<Converted, LoadError>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub failed: usize,
    pub cancelled: bool,
}

/// Expand directories into the convertible files below them.
///
/// Files named directly are kept whatever their extension so that an
/// unsupported file is reported instead of silently dropped.
pub fn collect_sources(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut sources = Vec::new();
    for path in paths {
        if !path.is_dir() {
            sources.push(path.clone());
            continue;
        }
        let mut found: Vec<PathBuf> = WalkDir::new(path)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|p| SourceKind::from_path(p).is_some())
            .collect();
        found.sort();
        sources.extend(found);
    }
    sources
}

/// Convert a single source and write its outputs
pub fn convert_file(source: &Path, options: &BatchOptions) -> Result<Converted, LoadError> {
    let fail = |e: SourceError| LoadError::new(source, e);
    let ext = sample_shared::fs::extension_lowercase(source);
    let Some(kind) = SourceKind::from_path(source) else {
        return Err(fail(SourceError::UnsupportedExtension(ext)));
    };

    match kind {
        SourceKind::Instrument => {
            let instrument = load_instrument(source)?;
            let output = if options.write_json {
                let out = options.output_path(source, "json");
                let json = serde_json::to_string_pretty(&instrument).map_err(|e| fail(e.into()))?;
                write_output(&out, json.as_bytes()).map_err(|e| fail(e.into()))?;
                Some(out)
            } else {
                None
            };
            Ok(Converted::Instrument {
                instrument: Box::new(instrument),
                output,
            })
        }
        SourceKind::Sample => {
            let audio = load_ncw(source)?;
            let output = if options.write_wav {
                let out = options.output_path(source, "wav");
                if let Some(dir) = out.parent() {
                    std::fs::create_dir_all(dir).map_err(|e| fail(e.into()))?;
                }
                audio.save_wav(&out).map_err(|e| fail(e.into()))?;
                Some(out)
            } else {
                None
            };
            Ok(Converted::Sample {
                channels: audio.channels,
                sample_rate: audio.sample_rate,
                frames: audio.frames(),
                output,
            })
        }
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, bytes)
}

/// Handle to a running worker
struct Worker {
    results: Receiver<FileResult>,
    thread: JoinHandle<()>,
}

fn spawn_worker(sources: Vec<PathBuf>, options: BatchOptions, cancel: Arc<AtomicBool>) -> Result<Worker> {
    let (tx, results) = sync_channel(RESULT_QUEUE);
    let thread = thread::Builder::new()
        .name("sample-convert-worker".into())
        .spawn(move || {
            for source in sources {
                if cancel.load(Ordering::Relaxed) {
                    tracing::debug!("Worker cancelled before {}", source.display());
                    break;
                }
                let outcome = convert_file(&source, &options);
                if cancel.load(Ordering::Relaxed) {
                    break;
                }
                if tx.send(FileResult { source, outcome }).is_err() {
                    // Receiver gone
                    break;
                }
            }
        })?;
    Ok(Worker { results, thread })
}

/// Convert `sources` on a background worker, handing each result to `on_result`.
///
/// Failed files are logged and counted; the batch carries on with the next
/// source.
pub fn run_batch(
    sources: Vec<PathBuf>,
    options: BatchOptions,
    cancel: Arc<AtomicBool>,
    mut on_result: impl FnMut(&FileResult),
) -> Result<BatchSummary> {
    let total = sources.len();
    tracing::info!("Converting {} source file(s)", total);

    let worker = spawn_worker(sources, options, Arc::clone(&cancel))?;
    let mut summary = BatchSummary::default();

    for result in worker.results.iter() {
        if cancel.load(Ordering::Relaxed) {
            break;
        }
        match &result.outcome {
            Ok(_) => summary.converted += 1,
            Err(e) => {
                tracing::error!("{}", e);
                summary.failed += 1;
            }
        }
        on_result(&result);
    }

    summary.cancelled = cancel.load(Ordering::Relaxed);
    // Unblock a worker waiting on a full queue
    drop(worker.results);
    if worker.thread.join().is_err() {
        anyhow::bail!("Conversion worker panicked");
    }

    tracing::info!(
        "Batch complete: {} converted, {} failed{}",
        summary.converted,
        summary.failed,
        if summary.cancelled { " (cancelled)" } else { "" }
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        let options = BatchOptions::default();
        assert_eq!(
            options.output_path(Path::new("lib/Piano.nki"), "json"),
            PathBuf::from("lib/Piano.json")
        );

        let options = BatchOptions {
            output_dir: Some(PathBuf::from("out")),
            ..BatchOptions::default()
        };
        assert_eq!(
            options.output_path(Path::new("lib/C3.ncw"), "wav"),
            PathBuf::from("out/C3.wav")
        );
    }

    #[test]
    fn test_collect_sources_filters_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("Samples");
        std::fs::create_dir_all(&nested).unwrap();
        for name in ["b.nki", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::write(nested.join("a.NCW"), b"").unwrap();

        let explicit = dir.path().join("notes.txt");
        let sources = collect_sources(&[dir.path().to_path_buf(), explicit.clone()]);
        assert_eq!(
            sources,
            vec![nested.join("a.NCW"), dir.path().join("b.nki"), explicit]
        );
    }

    #[test]
    fn test_unsupported_file_is_reported() {
        let err = convert_file(Path::new("readme.txt"), &BatchOptions::default()).unwrap_err();
        assert!(matches!(err.source, SourceError::UnsupportedExtension(ref ext) if ext == "txt"));
    }

    #[test]
    fn test_failures_do_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.ncw");
        std::fs::write(&bad, [0u8; 16]).unwrap();
        let missing = dir.path().join("missing.nki");

        let mut seen = Vec::new();
        let summary = run_batch(
            vec![bad.clone(), missing.clone()],
            BatchOptions::default(),
            Arc::new(AtomicBool::new(false)),
            |r| seen.push(r.source.clone()),
        )
        .unwrap();

        assert_eq!(seen, vec![bad, missing]);
        assert_eq!(
            summary,
            BatchSummary {
                converted: 0,
                failed: 2,
                cancelled: false
            }
        );
    }

    #[test]
    fn test_cancelled_before_start() {
        let cancel = Arc::new(AtomicBool::new(true));
        let mut calls = 0;
        let summary = run_batch(
            vec![PathBuf::from("a.ncw"), PathBuf::from("b.ncw")],
            BatchOptions::default(),
            cancel,
            |_| calls += 1,
        )
        .unwrap();
        assert_eq!(calls, 0);
        assert!(summary.cancelled);
    }

    #[test]
    fn test_cancel_between_results() {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let sources = (0..20).map(|i| PathBuf::from(format!("missing{i}.ncw"))).collect();

        let mut calls = 0;
        let summary = run_batch(sources, BatchOptions::default(), cancel, |_| {
            calls += 1;
            flag.store(true, Ordering::Relaxed);
        })
        .unwrap();
        assert_eq!(calls, 1);
        assert!(summary.cancelled);
        assert_eq!(summary.failed, 1);
    }
}
