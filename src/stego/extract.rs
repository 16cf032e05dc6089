//! LSB extraction from a flat channel buffer.

use log::debug;

use crate::stego::error::StegoError;
use crate::stego::frame::{decode_header, decode_payload, BitStream, Frame, HEADER_BITS};
use crate::stego::pixels::PixelBuffer;

/// Reads the frame hidden in a stego buffer.
///
/// The returned payload is exactly as stored; decryption is up to the caller.
pub fn extract(buf: &PixelBuffer) -> Result<Frame, StegoError> {
    extract_channels(buf.as_slice())
}

/// Reads the frame hidden in the LSBs of `channels`.
///
/// The decoded length is checked against the buffer before any payload bit
/// is read, so a corrupted header fails instead of overrunning.
pub fn extract_channels(channels: &[u8]) -> Result<Frame, StegoError> {
    let capacity = channels.len();
    if capacity < HEADER_BITS {
        return Err(StegoError::HeaderTruncated {
            available: capacity,
        });
    }

    let header = decode_header(&BitStream::from_lsbs(&channels[..HEADER_BITS]))?;
    if header.frame_bits() > capacity as u64 {
        return Err(StegoError::CorruptedHeader {
            decoded_length: header.length,
            capacity,
        });
    }
    debug!(
        "frame header: encrypted={} length={} bytes",
        header.encrypted, header.length
    );

    let frame_bits = BitStream::from_lsbs(&channels[..header.frame_bits() as usize]);
    let payload = decode_payload(&frame_bits, header.length)?;

    Ok(Frame::new(payload, header.encrypted))
}
