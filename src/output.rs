//! # Output Module
//!
//! Writes rendered images to disk. The format is chosen from the file
//! extension:
//! - `.png`: 8-bit RGB, values clamped to [0.0, 1.0] and scaled to [0, 255]
//! - `.exr`: 32-bit float RGB, linear values written unchanged

use std::path::Path;

use exr::prelude::write_rgb_file;
use image::{ImageBuffer, Rgb};
use log::info;

use crate::camera::RgbImage32;

/// Errors raised while writing an image.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// The extension names no supported format.
    #[error("unsupported file extension '{0}', only .png and .exr are supported")]
    UnsupportedExtension(String),

    /// PNG encoding or I/O failed.
    #[error("failed to save PNG image: {0}")]
    Png(#[from] image::ImageError),

    /// EXR encoding or I/O failed.
    #[error("failed to save EXR image: {0}")]
    Exr(#[from] exr::error::Error),
}

/// Save `image` to `output_path`, picking the encoder from the extension.
pub fn save_image(image: &RgbImage32, output_path: &Path) -> Result<(), OutputError> {
    let extension = output_path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => save_image_as_png(image, output_path),
        "exr" => save_image_as_exr(image, output_path),
        _ => Err(OutputError::UnsupportedExtension(extension)),
    }
}

/// Quantize a channel in [0, 1] to 8 bits.
fn to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Save an f32 RGB image as 8-bit PNG.
///
/// Values are clamped to [0.0, 1.0] and scaled linearly; no gamma curve is
/// applied since shading already produces display values.
pub fn save_image_as_png(image: &RgbImage32, output_path: &Path) -> Result<(), OutputError> {
    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let pixel = image.get_pixel(x, y);
        Rgb([to_u8(pixel[0]), to_u8(pixel[1]), to_u8(pixel[2])])
    });

    u8_image.save(output_path)?;
    info!("Image saved as {}", output_path.display());
    Ok(())
}

/// Save an f32 RGB image as EXR with full precision.
pub fn save_image_as_exr(image: &RgbImage32, output_path: &Path) -> Result<(), OutputError> {
    write_rgb_file(output_path, image.width() as usize, image.height() as usize, |x, y| {
        let pixel = image.get_pixel(x as u32, y as u32);
        (pixel[0], pixel[1], pixel[2])
    })?;

    info!("HDR image saved as EXR: {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> RgbImage32 {
        RgbImage32::from_fn(4, 2, |x, y| Rgb([x as f32 / 3.0, y as f32, 2.0]))
    }

    #[test]
    fn quantization_clamps_and_rounds() {
        assert_eq!(to_u8(-1.0), 0);
        assert_eq!(to_u8(0.0), 0);
        assert_eq!(to_u8(0.5), 128);
        assert_eq!(to_u8(1.0), 255);
        assert_eq!(to_u8(7.0), 255);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = save_image(&gradient(), Path::new("out.bmp")).unwrap_err();
        assert!(matches!(err, OutputError::UnsupportedExtension(ref e) if e == "bmp"));

        let err = save_image(&gradient(), Path::new("no_extension")).unwrap_err();
        assert!(matches!(err, OutputError::UnsupportedExtension(_)));
    }

    #[test]
    fn png_round_trips_dimensions() {
        let path = std::env::temp_dir().join("phongtrace_output_test.png");
        save_image(&gradient(), &path).unwrap();

        let read = image::open(&path).unwrap().to_rgb8();
        assert_eq!(read.dimensions(), (4, 2));
        assert_eq!(read.get_pixel(3, 1), &Rgb([255, 255, 255]));
        assert_eq!(read.get_pixel(0, 0), &Rgb([0, 0, 255]));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn exr_is_written() {
        let path = std::env::temp_dir().join("phongtrace_output_test.exr");
        save_image(&gradient(), &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
        let _ = std::fs::remove_file(&path);
    }
}
