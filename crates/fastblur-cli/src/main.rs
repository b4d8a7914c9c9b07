//! fastblur - approximate Gaussian blur from repeated box filters
//!
//! Reads a PNG (or a headerless raw stream), blurs it in linear light and
//! writes an RGB PNG.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fastblur_io::RawFormat;
use fastblur_ops::{BlurParams, BoxKernel, Geometry};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "fastblur")]
#[command(author, version, about = "Fast approximate Gaussian blur")]
#[command(long_about = "
Blurs images with N passes of a recursive box filter in each direction,
which approximates a Gaussian at a cost independent of the kernel size.
Pixels are converted to linear light before filtering.

Examples:
  fastblur blur photo.png                          # writes out.png
  fastblur blur photo.png -o soft.png -k 15 -p 3
  fastblur blur photo.png --fill 320x200@0.3       # crop+resize, then blur
  fastblur blur frame.bin --raw bgra:1920x1080 --fast-gamma
  fastblur resize photo.png -o thumb.png --fill 128x128
  RUST_LOG=fastblur_ops=trace fastblur blur photo.png
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
}

#[derive(Subcommand)]
enum Commands {
    /// Blur an image
    #[command(visible_alias = "b")]
    Blur(BlurArgs),

    /// Crop to an aspect ratio and resize, without blurring
    #[command(visible_alias = "r")]
    Resize(ResizeArgs),
}

#[derive(Args)]
struct BlurArgs {
    /// Input image (PNG, or raw with --raw)
    input: PathBuf,

    /// Output PNG
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    /// Box kernel size in pixels (odd)
    #[arg(short, long, default_value_t = BoxKernel::DEFAULT_SIZE)]
    kernel: usize,

    /// Box passes per direction
    #[arg(short, long, default_value_t = BlurParams::DEFAULT_PASSES)]
    passes: usize,

    /// Use gamma 2.0 (square/sqrt) instead of 2.2
    #[arg(long)]
    fast_gamma: bool,

    /// Crop to the target aspect and resize before blurring: WxH[@ANCHOR]
    #[arg(long, value_name = "WxH[@ANCHOR]")]
    fill: Option<Geometry>,

    /// Read the input as raw interleaved bytes: LAYOUT:WxH (e.g. bgra:640x480)
    #[arg(long, value_name = "LAYOUT:WxH")]
    raw: Option<RawFormat>,
}

#[derive(Args)]
struct ResizeArgs {
    /// Input image (PNG, or raw with --raw)
    input: PathBuf,

    /// Output PNG
    #[arg(short, long)]
    output: PathBuf,

    /// Target size and crop anchor: WxH[@ANCHOR]
    #[arg(long, value_name = "WxH[@ANCHOR]")]
    fill: Geometry,

    /// Use gamma 2.0 (square/sqrt) instead of 2.2
    #[arg(long)]
    fast_gamma: bool,

    /// Read the input as raw interleaved bytes: LAYOUT:WxH
    #[arg(long, value_name = "LAYOUT:WxH")]
    raw: Option<RawFormat>,
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Blur(args) => commands::blur::run(args, cli.verbose),
        Commands::Resize(args) => commands::resize::run(args, cli.verbose),
    }
}
