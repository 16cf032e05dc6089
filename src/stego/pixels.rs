//! Flat 8-bit RGB channel buffer.

use crate::stego::error::StegoError;

/// Number of channels per pixel (R, G, B).
pub const CHANNELS_PER_PIXEL: usize = 3;

/// A row-major RGB raster stored as one flat run of channel values.
///
/// Channel `i` of the buffer is the `(i % 3)`-th component of pixel `i / 3`.
/// Every channel carries one hidden bit, so capacity in bits equals the
/// number of channel values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps raw RGB channel values, checking that the length matches the dimensions.
    pub fn from_raw(width: u32, height: u32, channels: Vec<u8>) -> Result<Self, StegoError> {
        let expected = width as usize * height as usize * CHANNELS_PER_PIXEL;
        if channels.len() != expected {
            return Err(StegoError::InvalidPixelBuffer {
                expected,
                actual: channels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
        })
    }

    /// Wraps channels decoded by the `image` crate, whose `RgbImage` already
    /// guarantees `width * height * 3` values.
    pub(crate) fn from_rgb_image(width: u32, height: u32, channels: Vec<u8>) -> Self {
        debug_assert_eq!(
            channels.len(),
            width as usize * height as usize * CHANNELS_PER_PIXEL
        );
        Self {
            width,
            height,
            channels,
        }
    }

    /// Builds a buffer by calling `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> [u8; 3],
    {
        let mut channels = Vec::with_capacity(width as usize * height as usize * CHANNELS_PER_PIXEL);
        for y in 0..height {
            for x in 0..width {
                channels.extend_from_slice(&f(x, y));
            }
        }
        Self {
            width,
            height,
            channels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bits this buffer can carry.
    pub fn capacity_bits(&self) -> usize {
        self.channels.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.channels
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.channels
    }
}
