//! # stegtext - hide text in image pixels
//!
//! stegtext hides a text message in the least significant bits of an 8-bit
//! RGB image, optionally encrypting it with a password first.
//!
//! ## Format
//!
//! Each channel value (R, G, B of every pixel, row-major) carries one bit:
//!
//! ```text
//! bit 0        : flag (0 = plaintext, 1 = encrypted)
//! bits 1-32    : payload byte length, big-endian u32
//! bits 33..    : payload bytes, MSB-first
//! ```
//!
//! An encrypted payload is `nonce (12) || ChaCha20Poly1305 ciphertext + tag`,
//! keyed by SHA-256 of the password. The key derivation is unsalted, so the
//! same password always yields the same key.
//!
//! The carrier must stay lossless: re-encoding a stego image as JPEG (or any
//! other lossy format) destroys the hidden bits.
//!
//! ## Example Usage
//!
//! ```rust
//! use stegtext::{hide, reveal, PixelBuffer};
//!
//! let cover = PixelBuffer::from_fn(64, 64, |x, y| [x as u8, y as u8, 128]);
//!
//! let stego = hide(cover, "meet at noon", Some("hunter2")).unwrap();
//! let revealed = reveal(&stego, Some("hunter2")).unwrap();
//!
//! assert_eq!(revealed.text, "meet at noon");
//! assert!(revealed.encrypted);
//! ```
//!
//! ## Modules
//!
//! - [`stego`]: bit framing, LSB embedding/extraction, image file codec
//! - [`crypto`]: password-based authenticated encryption
//! - [`encoder`]: the hide pipeline
//! - [`decoder`]: the reveal pipeline
//! - [`config`]: CLI settings file

pub mod config;
pub mod crypto;
pub mod decoder;
pub mod encoder;
pub mod stego;

// Re-export commonly used types at the crate root
pub use config::{ConfigError, Settings};
pub use crypto::SymmetricError;
pub use decoder::{reveal, reveal_with_config, DecoderConfig, RevealedText, Utf8Policy};
pub use encoder::{hide, prepare_frame, required_bits_for};
pub use stego::{
    embed, extract, load_pixels, max_message_bytes, save_pixels, BitStream, Frame, ImageCodecError,
    PixelBuffer, StegoError, HEADER_BITS,
};
