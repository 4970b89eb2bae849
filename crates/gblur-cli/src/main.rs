//! gblur - Gaussian blur command line tool
//!
//! Thin adapter around `gblur-ops`: decodes an image with `gblur-io`,
//! blurs it, encodes the result.

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use gblur_ops::{Radius, Strategy};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "gblur")]
#[command(author, version, about = "Gaussian blur for PNG and JPEG images")]
#[command(long_about = "
Applies a Gaussian blur of a given integer radius to raster images.
Edges are handled by repeating the border pixels; output alpha is opaque.

Examples:
  gblur blur photo.png -o soft.png -r 4
  gblur blur photo.jpg -o soft.jpg -r 12 --mode separable -q 95
  gblur batch 'shots/*.png' -o blurred/ -r 3
  gblur kernel -r 2
  RUST_LOG=gblur_ops=trace gblur -j 4 blur in.png -o out.png -r 2
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Run on a single thread (convolution and batch file processing)
    #[arg(long, global = true)]
    sequential: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Blur one image
    #[command(visible_alias = "b")]
    Blur(BlurArgs),

    /// Blur every image matching a glob pattern
    Batch(BatchArgs),

    /// Print the Gaussian kernel for a radius
    #[command(visible_alias = "k")]
    Kernel(KernelArgs),
}

/// Convolution engine as exposed on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Full 2D kernel per pixel
    #[default]
    Direct,
    /// Horizontal then vertical 1D pass (faster, same result up to rounding)
    Separable,
}

impl From<Mode> for Strategy {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Direct => Strategy::Direct,
            Mode::Separable => Strategy::Separable,
        }
    }
}

#[derive(Args)]
struct BlurArgs {
    /// Input image
    input: PathBuf,

    /// Output image (format from extension)
    #[arg(short, long)]
    output: PathBuf,

    /// Blur radius in pixels (>= 1)
    #[arg(short, long, default_value = "3")]
    radius: Radius,

    /// Convolution engine
    #[arg(short, long, value_enum, default_value_t = Mode::Direct)]
    mode: Mode,

    /// JPEG quality (1-100)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: Option<u8>,
}

#[derive(Args)]
struct BatchArgs {
    /// Input pattern (glob)
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Blur radius in pixels (>= 1)
    #[arg(short, long, default_value = "3")]
    radius: Radius,

    /// Convolution engine
    #[arg(short, long, value_enum, default_value_t = Mode::Direct)]
    mode: Mode,

    /// Output format extension (default: same as input)
    #[arg(short, long)]
    format: Option<String>,

    /// JPEG quality (1-100)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: Option<u8>,
}

#[derive(Args)]
struct KernelArgs {
    /// Kernel radius (>= 1)
    #[arg(short, long)]
    radius: Radius,

    /// Decimal places to print
    #[arg(short, long, default_value = "6")]
    precision: usize,

    /// Print the 1D separable taps instead of the 2D matrix
    #[arg(long)]
    separable: bool,
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the level derived from `-v`. The returned guard
/// flushes the file writer on drop and must live until exit.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow!("Failed to install logger: {e}"))?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow!("Failed to install logger: {e}"))?;
            Ok(None)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let parallel = !cli.sequential;
    match cli.command {
        Commands::Blur(args) => commands::blur::run(args, cli.verbose, parallel),
        Commands::Batch(args) => commands::batch::run(args, cli.verbose, parallel),
        Commands::Kernel(args) => commands::kernel::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_blur() {
        let cli = Cli::try_parse_from([
            "gblur", "-vv", "blur", "in.png", "-o", "out.jpg", "-r", "5", "--mode", "separable",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Blur(args) => {
                assert_eq!(args.radius.get(), 5);
                assert_eq!(args.mode, Mode::Separable);
                assert_eq!(args.output, PathBuf::from("out.jpg"));
            }
            _ => panic!("expected blur"),
        }
    }

    #[test]
    fn test_invalid_radius_rejected_by_parser() {
        for bad in ["0", "-3", "2.5", "wide"] {
            let res = Cli::try_parse_from(["gblur", "blur", "in.png", "-o", "o.png", "-r", bad]);
            assert!(res.is_err(), "{bad}");
        }
    }

    #[test]
    fn test_quality_range() {
        assert!(Cli::try_parse_from(["gblur", "blur", "a.png", "-o", "b.jpg", "-q", "0"]).is_err());
        assert!(Cli::try_parse_from(["gblur", "blur", "a.png", "-o", "b.jpg", "-q", "100"]).is_ok());
    }

    #[test]
    fn test_mode_into_strategy() {
        assert_eq!(Strategy::from(Mode::Direct), Strategy::Direct);
        assert_eq!(Strategy::from(Mode::Separable), Strategy::Separable);
    }
}
