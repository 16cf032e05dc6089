//! LSB steganography over flat RGB channel buffers.
//!
//! - [`frame`]: flag + 32-bit length + payload bit framing
//! - [`embed`]: writing a frame into channel LSBs
//! - [`extract`]: reading a frame back out
//! - [`codec`]: loading and saving carrier images (PNG/BMP output only)

pub mod codec;
pub mod embed;
pub mod error;
pub mod extract;
pub mod frame;
pub mod pixels;

pub use codec::{decode_pixels, encode_png, load_pixels, save_pixels, ImageCodecError};
pub use embed::{capacity_bits, embed, embed_bits, max_message_bytes};
pub use error::StegoError;
pub use extract::{extract, extract_channels};
pub use frame::{decode_header, decode_payload, encode_frame, BitStream, Frame, FrameHeader, HEADER_BITS};
pub use pixels::PixelBuffer;
