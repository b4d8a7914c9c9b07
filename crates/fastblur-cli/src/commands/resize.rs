//! Resize command
//!
//! Crops to the target aspect and resamples with nearest-neighbour, going
//! through linear light like the blur does.

use crate::ResizeArgs;
use anyhow::Result;
use fastblur_ops::Pipeline;
use fastblur_transfer::GammaMode;
use tracing::{debug, info};

pub fn run(args: ResizeArgs, verbose: u8) -> Result<()> {
    let pipeline = Pipeline::new()
        .with_gamma(GammaMode::from_fast_flag(args.fast_gamma))
        .with_fill(Some(args.fill));

    let image = super::load_image(&args.input, args.raw.as_ref())?;
    info!(
        src_w = image.width,
        src_h = image.height,
        dst_w = args.fill.width(),
        dst_h = args.fill.height(),
        "Resizing"
    );

    if verbose > 0 {
        println!(
            "Resizing {}x{} -> {}",
            image.width, image.height, args.fill
        );
    }

    let output = pipeline.resize_only(&image)?;
    debug!(w = output.width, h = output.height, "Resized");

    super::save_image(&args.output, &output)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}
