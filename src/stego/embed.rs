//! LSB embedding into a flat channel buffer.
//!
//! Bit `i` of the frame replaces the least significant bit of channel `i`.
//! Channels past the end of the frame are left untouched.

use log::debug;

use crate::crypto::ENCRYPTION_OVERHEAD;
use crate::stego::error::StegoError;
use crate::stego::frame::{BitStream, HEADER_BITS};
use crate::stego::pixels::PixelBuffer;

/// Returns the capacity in bits of a channel buffer.
pub fn capacity_bits(channels: &[u8]) -> usize {
    channels.len()
}

/// Writes `bits` into the LSBs of `channels`.
///
/// Either every bit is written or, if the buffer is too small, none is.
pub fn embed_bits(channels: &mut [u8], bits: &BitStream) -> Result<(), StegoError> {
    let available = capacity_bits(channels);
    if bits.len() > available {
        return Err(StegoError::InsufficientCapacity {
            required: bits.len(),
            available,
        });
    }

    for (channel, bit) in channels.iter_mut().zip(bits.iter()) {
        *channel = (*channel & 0xFE) | u8::from(bit);
    }

    Ok(())
}

/// Embeds `bits` into `buf`, consuming it and returning the stego buffer.
pub fn embed(mut buf: PixelBuffer, bits: &BitStream) -> Result<PixelBuffer, StegoError> {
    embed_bits(buf.as_mut_slice(), bits)?;
    debug!(
        "embedded {} bits into {}x{} image ({} bits capacity)",
        bits.len(),
        buf.width(),
        buf.height(),
        buf.capacity_bits()
    );
    Ok(buf)
}

/// Largest message, in bytes, that fits in `capacity_bits`.
///
/// When `encrypted` is set the nonce and authentication tag are accounted for.
pub fn max_message_bytes(capacity_bits: usize, encrypted: bool) -> usize {
    let payload_bytes = capacity_bits.saturating_sub(HEADER_BITS) / 8;
    if encrypted {
        payload_bytes.saturating_sub(ENCRYPTION_OVERHEAD)
    } else {
        payload_bytes
    }
}
