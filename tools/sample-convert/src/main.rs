//! sample-convert - NI sampler instrument converter
//!
//! Converts Kontakt instruments (.nki) to neutral multisample JSON and NCW
//! compressed samples (.ncw) to WAV.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use sample_convert::{BatchOptions, Converted, ConvertConfig, collect_sources, load_ncw, probe, run_batch};

#[derive(Parser)]
#[command(name = "sample-convert")]
#[command(about = "NI sampler instrument converter")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert instruments and samples
    Convert {
        /// Files or directories to convert (added to the config's inputs)
        paths: Vec<PathBuf>,

        /// Path to convert.toml (default: ./convert.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not write WAV files for NCW samples
        #[arg(long)]
        no_wav: bool,

        /// Do not write JSON files for instruments
        #[arg(long)]
        no_json: bool,

        /// Stop after the first failed file
        #[arg(long)]
        fail_fast: bool,
    },

    /// Print the chunk tree of an NI container or RIFF/IFF file
    Probe {
        /// Input file
        input: PathBuf,
    },

    /// Decode a single NCW file to WAV
    Ncw {
        /// Input .ncw file
        input: PathBuf,

        /// Output .wav file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(level: Option<&str>) {
    // RUST_LOG wins over the config file
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level.unwrap_or("info")))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            paths,
            config,
            output,
            no_wav,
            no_json,
            fail_fast,
        } => {
            let config = ConvertConfig::load_or_default(config.as_deref())?;
            init_logging(config.log_level.as_deref());

            let mut inputs = config.input.paths.clone();
            inputs.extend(paths);
            if inputs.is_empty() {
                anyhow::bail!("No input paths given (pass paths or set [input] paths in convert.toml)");
            }

            let options = BatchOptions {
                output_dir: output.or(config.output.dir.clone()),
                write_wav: config.output.write_wav && !no_wav,
                write_json: config.output.write_json && !no_json,
            };
            let sources = collect_sources(&inputs);

            let cancel = Arc::new(AtomicBool::new(false));
            let summary = run_batch(sources, options, Arc::clone(&cancel), |result| {
                match &result.outcome {
                    Ok(Converted::Instrument { instrument, output }) => {
                        tracing::info!(
                            "{} -> {} groups, {} zones{}",
                            result.source.display(),
                            instrument.groups.len(),
                            instrument.zones().count(),
                            output
                                .as_ref()
                                .map(|p| format!(" ({})", p.display()))
                                .unwrap_or_default()
                        );
                    }
                    Ok(Converted::Sample {
                        channels,
                        sample_rate,
                        frames,
                        output,
                    }) => {
                        tracing::info!(
                            "{} -> {} ch, {} Hz, {} frames{}",
                            result.source.display(),
                            channels,
                            sample_rate,
                            frames,
                            output
                                .as_ref()
                                .map(|p| format!(" ({})", p.display()))
                                .unwrap_or_default()
                        );
                    }
                    Err(_) if fail_fast => cancel.store(true, Ordering::Relaxed),
                    Err(_) => {}
                }
            })?;

            if summary.failed > 0 {
                anyhow::bail!("{} file(s) failed to convert", summary.failed);
            }
        }

        Commands::Probe { input } => {
            init_logging(None);
            print!("{}", probe::describe_file(&input)?);
        }

        Commands::Ncw { input, output } => {
            init_logging(None);
            let output = output.unwrap_or_else(|| input.with_extension("wav"));
            tracing::info!("Converting {:?} -> {:?}", input, output);
            let audio = load_ncw(&input)?;
            audio
                .save_wav(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!("Done!");
        }
    }

    Ok(())
}
