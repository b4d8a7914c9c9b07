//! Blur command
//!
//! Gamma-decodes the input, optionally fill-resizes it, applies the
//! recursive box blur and writes an RGB PNG.

use crate::BlurArgs;
use anyhow::{Context, Result};
use fastblur_ops::{BlurParams, Pipeline};
use fastblur_transfer::GammaMode;
use std::time::Instant;
use tracing::{info, trace};

pub fn run(args: BlurArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), kernel = args.kernel, passes = args.passes, "blur::run");

    // Validate before touching any file.
    let params = BlurParams::new(args.kernel, args.passes).context("Invalid blur settings")?;
    let pipeline = Pipeline::new()
        .with_params(params)
        .with_gamma(GammaMode::from_fast_flag(args.fast_gamma))
        .with_fill(args.fill);

    let image = super::load_image(&args.input, args.raw.as_ref())?;
    info!(
        w = image.width,
        h = image.height,
        kernel = args.kernel,
        passes = args.passes,
        gamma = %pipeline.gamma(),
        "Applying blur"
    );

    if verbose > 0 {
        println!(
            "Blurring {} ({}x{}) kernel={} passes={}",
            args.input.display(),
            image.width,
            image.height,
            args.kernel,
            args.passes
        );
    }

    let start = Instant::now();
    let output = pipeline.run(&image)?;
    info!(elapsed = ?start.elapsed(), "Blur finished");

    super::save_image(&args.output, &output)?;

    if verbose > 0 {
        println!("Wrote {} ({}x{})", args.output.display(), output.width, output.height);
    }

    Ok(())
}
