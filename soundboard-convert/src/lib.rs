//! soundboard-convert library
//!
//! Reads a legacy soundboard once, rewrites every sound's `path` into a typed
//! `source`, and writes the result once. The output file is only created
//! after the whole batch converted successfully.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use soundboard_common::soundboard::{convert_content, write_atomic};
use soundboard_common::{ConversionReport, SoundboardFormat};

/// Command-line arguments for soundboard-convert
#[derive(Parser, Debug, Clone)]
#[command(name = "soundboard-convert")]
#[command(about = "Convert soundboards to the new source format")]
#[command(version)]
pub struct Args {
    /// Old soundboard file path (.toml or .json)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// New soundboard file path (.toml or .json)
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,
}

/// Run one conversion from `args.input` to `args.output`
///
/// TOML to TOML keeps the input's comments and layout; other pairings are
/// re-rendered in the output format.
pub fn run(args: &Args) -> Result<ConversionReport> {
    debug!("Input: {}", args.input.display());
    debug!("Output: {}", args.output.display());

    // Reject bad extensions before doing any work
    let output_format = SoundboardFormat::from_path(&args.output)
        .with_context(|| format!("Cannot write {}", args.output.display()))?;
    let input_format = SoundboardFormat::from_path(&args.input)
        .with_context(|| format!("Cannot read {}", args.input.display()))?;

    let content = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to load soundboard {}", args.input.display()))?;

    let (rendered, report) = convert_content(&content, input_format, output_format)
        .with_context(|| format!("Failed to convert soundboard {}", args.input.display()))?;
    info!("Converted {}", report);

    write_atomic(&args.output, &rendered)
        .with_context(|| format!("Failed to write {} soundboard {}", output_format, args.output.display()))?;

    Ok(report)
}
