//! Batch processing command
//!
//! Blurs every file matching a glob pattern into an output directory.

use crate::BatchArgs;
use anyhow::{bail, Result};
use gblur_io::Format;
use gblur_ops::{blur_with, BlurOptions, Radius};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: BatchArgs, verbose: u8, parallel: bool) -> Result<()> {
    trace!(pattern = %args.input, radius = %args.radius, "batch::run");

    // Find matching files
    let files: Vec<PathBuf> = glob::glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        bail!("No files match pattern: {}", args.input);
    }

    info!(files = files.len(), pattern = %args.input, "Starting batch processing");

    if verbose > 0 {
        println!("Found {} files matching '{}'", files.len(), args.input);
    }

    std::fs::create_dir_all(&args.output_dir)?;

    let options = BlurOptions {
        strategy: args.mode.into(),
        parallel,
    };

    let process = |input: &PathBuf| {
        process_file(
            input,
            &args.output_dir,
            args.format.as_deref(),
            args.radius,
            &options,
            args.quality,
            verbose,
        )
    };

    // --sequential keeps files on the calling thread too
    let results: Vec<Result<()>> = if parallel {
        files.par_iter().map(process).collect()
    } else {
        files.iter().map(process).collect()
    };

    let mut success = 0;
    let mut failed = 0;
    for r in results {
        match r {
            Ok(()) => success += 1,
            Err(e) => {
                failed += 1;
                eprintln!("Error: {e:#}");
            }
        }
    }

    info!(success, failed, "Batch processing complete");
    println!("Processed: {success} success, {failed} failed");

    if failed > 0 {
        bail!("{failed} files failed");
    }

    Ok(())
}

/// Output path for `input`: same stem in `output_dir`, extension from
/// `format`, the input, or the input's detected format (PNG if unknown).
fn output_path(input: &Path, output_dir: &Path, format: Option<&str>) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let ext = format
        .map(|f| f.trim_start_matches('.'))
        .or_else(|| input.extension().and_then(|s| s.to_str()))
        .unwrap_or_else(|| {
            Format::detect(input)
                .ok()
                .and_then(Format::extension)
                .unwrap_or("png")
        });

    output_dir.join(format!("{stem}.{ext}"))
}

fn process_file(
    input: &Path,
    output_dir: &Path,
    format: Option<&str>,
    radius: Radius,
    options: &BlurOptions,
    quality: Option<u8>,
    verbose: u8,
) -> Result<()> {
    let output = output_path(input, output_dir, format);

    if verbose > 0 {
        println!("Processing {} -> {}", input.display(), output.display());
    }

    let image = super::load_image(input)?;
    let blurred = blur_with(&image, radius, options)?;
    debug!(input = %input.display(), "blurred");
    super::save_image(&output, &blurred, quality)
}
