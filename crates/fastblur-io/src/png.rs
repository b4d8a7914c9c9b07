//! PNG format support.
//!
//! Every PNG is normalized to 8-bit RGB or RGBA on read:
//!
//! - palette images are expanded (to RGBA when they carry transparency)
//! - low bit depths are expanded to 8 bits
//! - 16-bit samples keep their high byte
//! - grayscale becomes RGB, grayscale+alpha becomes RGBA
//!
//! Writing emits 8-bit RGB or RGBA depending on the layout's alpha.
//!
//! # Example
//!
//! ```rust,ignore
//! use fastblur_io::png::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.png", &image)?;
//! ```

use crate::{ImageData, IoError, IoResult};
use fastblur_core::PixelLayout;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::trace;

/// Reads a PNG file from the given path.
///
/// # Example
///
/// ```rust,ignore
/// use fastblur_io::png;
///
/// let image = png::read("input.png")?;
/// ```
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let file = File::open(path.as_ref())?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let width = info.width as usize;
    let height = info.height as usize;
    trace!(width, height, color_type = ?info.color_type, "png::read");

    if info.bit_depth != png::BitDepth::Eight {
        return Err(IoError::UnsupportedBitDepth(format!(
            "{:?} {:?}",
            info.color_type, info.bit_depth
        )));
    }

    match info.color_type {
        png::ColorType::Rgb => {
            ImageData::from_raw_parts(width, height, info.line_size, PixelLayout::RGB, buf)
        }
        png::ColorType::Rgba => {
            ImageData::from_raw_parts(width, height, info.line_size, PixelLayout::RGBA, buf)
        }
        png::ColorType::Grayscale => {
            let rgb = gray_rows(&buf, width, height, info.line_size, 1)
                .flat_map(|g| [g[0], g[0], g[0]])
                .collect();
            ImageData::from_packed(width, height, PixelLayout::RGB, rgb)
        }
        png::ColorType::GrayscaleAlpha => {
            let rgba = gray_rows(&buf, width, height, info.line_size, 2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                .collect();
            ImageData::from_packed(width, height, PixelLayout::RGBA, rgba)
        }
        color_type => Err(IoError::UnsupportedBitDepth(format!(
            "{:?} {:?}",
            color_type, info.bit_depth
        ))),
    }
}

/// Pixels of a gray image, `channels` bytes each, row padding skipped.
fn gray_rows(
    buf: &[u8],
    width: usize,
    height: usize,
    line_size: usize,
    channels: usize,
) -> impl Iterator<Item = &[u8]> {
    buf.chunks(line_size)
        .take(height)
        .flat_map(move |row| row[..width * channels].chunks_exact(channels))
}

/// Writes an image to a PNG file.
///
/// Layouts other than RGB/RGBA are reordered to RGB/RGBA first. Padded rows
/// are repacked.
///
/// # Example
///
/// ```rust,ignore
/// use fastblur_io::png;
///
/// png::write("output.png", &image)?;
/// ```
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    let width = u32::try_from(image.width)
        .map_err(|_| IoError::EncodeError(format!("width {} too large", image.width)))?;
    let height = u32::try_from(image.height)
        .map_err(|_| IoError::EncodeError(format!("height {} too large", image.height)))?;

    let (color_type, pixels) = png_pixels(image);
    trace!(width, height, ?color_type, "png::write");

    let file = File::create(path.as_ref())?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(color_type);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(&pixels)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}

/// Packed RGB or RGBA bytes for `image`.
fn png_pixels(image: &ImageData) -> (png::ColorType, Cow<'_, [u8]>) {
    let layout = image.layout;
    if layout == PixelLayout::RGB {
        return (png::ColorType::Rgb, image.packed());
    }
    if layout == PixelLayout::RGBA {
        return (png::ColorType::Rgba, image.packed());
    }

    let bpp = layout.bytes_per_pixel;
    let alpha = layout.has_alpha().then(|| alpha_offset(&layout));
    let out_bpp = if alpha.is_some() { 4 } else { 3 };
    let mut out = Vec::with_capacity(image.width * image.height * out_bpp);
    for y in 0..image.height {
        for px in image.row(y).chunks_exact(bpp) {
            out.extend(layout.offsets().iter().map(|&o| px[o]));
            if let Some(a) = alpha {
                out.push(px[a]);
            }
        }
    }
    let color_type = if alpha.is_some() {
        png::ColorType::Rgba
    } else {
        png::ColorType::Rgb
    };
    (color_type, Cow::Owned(out))
}

/// The byte within a 4-byte pixel not used by R, G or B.
fn alpha_offset(layout: &PixelLayout) -> usize {
    let [r, g, b] = layout.offsets();
    // Offsets are distinct and < 4, so they sum to 6 minus the alpha offset.
    6 - (r + g + b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn gradient(width: usize, height: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                data.push((x * 8) as u8);
                data.push((y * 8) as u8);
                data.push(128);
            }
        }
        data
    }

    #[test]
    fn test_roundtrip_rgb() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rgb.png");
        let data = gradient(32, 16);
        let image = ImageData::from_packed(32, 16, PixelLayout::RGB, data.clone()).unwrap();

        write(&path, &image).expect("Failed to write PNG");
        let loaded = read(&path).expect("Failed to read PNG");

        assert_eq!(loaded.width, 32);
        assert_eq!(loaded.height, 16);
        assert_eq!(loaded.layout, PixelLayout::RGB);
        assert_eq!(loaded.packed().as_ref(), data.as_slice());
    }

    #[test]
    fn test_bgra_written_as_rgba() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bgra.png");
        let image = ImageData::from_packed(1, 1, PixelLayout::BGRA, vec![10, 20, 30, 40]).unwrap();

        write(&path, &image).unwrap();
        let loaded = read(&path).unwrap();

        assert_eq!(loaded.layout, PixelLayout::RGBA);
        assert_eq!(loaded.data, vec![30, 20, 10, 40]);
    }

    #[test]
    fn test_alpha_offset() {
        assert_eq!(alpha_offset(&PixelLayout::ARGB), 0);
        assert_eq!(alpha_offset(&PixelLayout::ABGR), 0);
        assert_eq!(alpha_offset(&PixelLayout::BGRA), 3);
    }

    #[test]
    fn test_grayscale_expands_to_rgb() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gray.png");
        {
            let file = File::create(&path).unwrap();
            let mut encoder = png::Encoder::new(BufWriter::new(file), 2, 1);
            encoder.set_color(png::ColorType::Grayscale);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[7, 200]).unwrap();
            writer.finish().unwrap();
        }

        let loaded = read(&path).unwrap();
        assert_eq!(loaded.layout, PixelLayout::RGB);
        assert_eq!(loaded.data, vec![7, 7, 7, 200, 200, 200]);
    }

    #[test]
    fn test_sixteen_bit_keeps_high_byte() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deep.png");
        {
            let file = File::create(&path).unwrap();
            let mut encoder = png::Encoder::new(BufWriter::new(file), 1, 1);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Sixteen);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0x12, 0x34, 0xAB, 0xCD, 0xFF, 0x00]).unwrap();
            writer.finish().unwrap();
        }

        let loaded = read(&path).unwrap();
        assert_eq!(loaded.data, vec![0x12, 0xAB, 0xFF]);
    }
}
