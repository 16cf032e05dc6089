//! Conversion between image files and [`PixelBuffer`]s.
//!
//! Any format the `image` crate reads can serve as a cover image. Stego images
//! are only written as PNG or BMP: lossy formats would discard the LSBs.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbImage};
use log::debug;
use thiserror::Error;

use crate::stego::pixels::PixelBuffer;

/// Errors that can occur while reading or writing carrier images.
#[derive(Error, Debug)]
pub enum ImageCodecError {
    #[error("Image load error: {0}")]
    Load(String),

    #[error("Image save error: {0}")]
    Save(String),

    /// The requested output format would destroy the hidden bits.
    #[error("Refusing to write lossy format '{0}': use .png or .bmp")]
    LossyFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Decodes an in-memory image into 8-bit RGB channels.
pub fn decode_pixels(bytes: &[u8]) -> Result<PixelBuffer, ImageCodecError> {
    let image =
        image::load_from_memory(bytes).map_err(|e| ImageCodecError::Load(e.to_string()))?;
    Ok(from_image(image))
}

/// Loads an image file into 8-bit RGB channels.
pub fn load_pixels<P: AsRef<Path>>(path: P) -> Result<PixelBuffer, ImageCodecError> {
    let image = image::open(path.as_ref()).map_err(|e| ImageCodecError::Load(e.to_string()))?;
    debug!(
        "loaded {} ({}x{}, {:?})",
        path.as_ref().display(),
        image.width(),
        image.height(),
        image.color()
    );
    Ok(from_image(image))
}

/// Converts a decoded image to RGB8, dropping alpha and narrowing wider channels.
pub fn from_image(image: DynamicImage) -> PixelBuffer {
    let rgb = image.into_rgb8();
    let (width, height) = rgb.dimensions();
    PixelBuffer::from_rgb_image(width, height, rgb.into_raw())
}

fn to_image(buf: &PixelBuffer) -> Result<RgbImage, ImageCodecError> {
    RgbImage::from_raw(buf.width(), buf.height(), buf.as_slice().to_vec())
        .ok_or_else(|| ImageCodecError::Save("pixel buffer does not match its dimensions".into()))
}

/// Picks a lossless output format from a file extension.
pub fn lossless_format<P: AsRef<Path>>(path: P) -> Result<ImageFormat, ImageCodecError> {
    let ext = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => Ok(ImageFormat::Png),
        "bmp" => Ok(ImageFormat::Bmp),
        other => Err(ImageCodecError::LossyFormat(other.to_string())),
    }
}

/// Writes a stego buffer as PNG or BMP, chosen from the path's extension.
pub fn save_pixels<P: AsRef<Path>>(buf: &PixelBuffer, path: P) -> Result<(), ImageCodecError> {
    let format = lossless_format(&path)?;
    to_image(buf)?
        .save_with_format(path.as_ref(), format)
        .map_err(|e| ImageCodecError::Save(e.to_string()))?;
    debug!("saved {} as {:?}", path.as_ref().display(), format);
    Ok(())
}

/// Encodes a buffer as PNG bytes.
pub fn encode_png(buf: &PixelBuffer) -> Result<Vec<u8>, ImageCodecError> {
    let mut bytes = Vec::new();
    to_image(buf)?
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| ImageCodecError::Save(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, Rgba};

    fn create_test_image(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |x, y| {
            [
                ((x * 17) % 256) as u8,
                ((y * 23) % 256) as u8,
                (((x + y) * 31) % 256) as u8,
            ]
        })
    }

    #[test]
    fn test_png_roundtrip_is_lossless() {
        let buf = create_test_image(31, 17);

        let png = encode_png(&buf).unwrap();
        let decoded = decode_pixels(&png).unwrap();

        assert_eq!(decoded, buf);
    }

    #[test]
    fn test_rgb_image_is_copied_row_major() {
        let rgb = ImageBuffer::from_fn(3, 2, |x, y| Rgb([x as u8, y as u8, (x + y) as u8]));
        let buf = from_image(DynamicImage::ImageRgb8(rgb));

        assert_eq!((buf.width(), buf.height()), (3, 2));
        assert_eq!(
            buf.as_slice(),
            &[0, 0, 0, 1, 0, 1, 2, 0, 2, 0, 1, 1, 1, 1, 2, 2, 1, 3]
        );
    }

    #[test]
    fn test_alpha_is_dropped() {
        let rgba = ImageBuffer::from_fn(2, 1, |x, _| Rgba([x as u8, 10, 20, 128]));
        let buf = from_image(DynamicImage::ImageRgba8(rgba));

        assert_eq!(buf.as_slice(), &[0, 10, 20, 1, 10, 20]);
    }

    #[test]
    fn test_lossless_format_selection() {
        assert_eq!(lossless_format("out.png").unwrap(), ImageFormat::Png);
        assert_eq!(lossless_format("OUT.BMP").unwrap(), ImageFormat::Bmp);
        assert!(matches!(
            lossless_format("photo.jpg"),
            Err(ImageCodecError::LossyFormat(ext)) if ext == "jpg"
        ));
        assert!(matches!(
            lossless_format("noext"),
            Err(ImageCodecError::LossyFormat(_))
        ));
    }

    #[test]
    fn test_garbage_bytes_fail_to_load() {
        assert!(matches!(
            decode_pixels(b"definitely not an image"),
            Err(ImageCodecError::Load(_))
        ));
    }
}
