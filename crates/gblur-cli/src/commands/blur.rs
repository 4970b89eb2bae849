//! Blur command
//!
//! Blurs a single image and writes the result.

use crate::BlurArgs;
use anyhow::{Context, Result};
use gblur_ops::{blur_with, BlurOptions};
use std::time::Instant;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: BlurArgs, verbose: u8, parallel: bool) -> Result<()> {
    trace!(input = %args.input.display(), radius = %args.radius, mode = ?args.mode, "blur::run");

    let image = super::load_image(&args.input)?;
    let (w, h) = image.dimensions();

    let options = BlurOptions {
        strategy: args.mode.into(),
        parallel,
    };
    info!(radius = %args.radius, strategy = %options.strategy, w, h, "Applying blur");

    if verbose > 0 {
        println!(
            "Applying gaussian blur (radius={}, {}) to {}",
            args.radius,
            options.strategy,
            args.input.display()
        );
    }

    let start = Instant::now();
    let blurred = blur_with(&image, args.radius, &options)
        .with_context(|| format!("Failed to blur: {}", args.input.display()))?;
    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "blur finished");

    super::save_image(&args.output, &blurred, args.quality)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}
