//! Revealing a text message hidden by [`crate::encoder::hide`].
//!
//! Unlike the framing layer, this module decides what a payload means:
//! encrypted frames need the password, and plaintext must be UTF-8 unless
//! the caller opts into lossy decoding.

use log::warn;

use crate::crypto::decrypt;
use crate::encoder::effective_password;
use crate::stego::{extract, PixelBuffer, StegoError};

/// How to treat payload bytes that are not valid UTF-8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Utf8Policy {
    /// Fail with [`StegoError::MalformedPayloadText`].
    #[default]
    Strict,
    /// Replace invalid sequences with U+FFFD.
    Lossy,
}

/// Configuration for the decoder.
#[derive(Debug, Clone, Default)]
pub struct DecoderConfig {
    pub utf8: Utf8Policy,
}

/// A revealed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealedText {
    pub text: String,
    /// Whether the frame carried an encrypted payload.
    pub encrypted: bool,
}

/// Reveals the text hidden in `buf` with strict UTF-8 decoding.
pub fn reveal(buf: &PixelBuffer, password: Option<&str>) -> Result<RevealedText, StegoError> {
    reveal_with_config(buf, password, &DecoderConfig::default())
}

/// Reveals the text hidden in `buf`.
///
/// An encrypted frame without a password fails with [`StegoError::PasswordRequired`];
/// one that does not authenticate fails with [`StegoError::WrongPasswordOrCorrupted`].
/// A password given for a plaintext frame is ignored.
pub fn reveal_with_config(
    buf: &PixelBuffer,
    password: Option<&str>,
    config: &DecoderConfig,
) -> Result<RevealedText, StegoError> {
    let frame = extract(buf)?;
    let password = effective_password(password);

    let bytes = if frame.encrypted {
        let password = password.ok_or(StegoError::PasswordRequired)?;
        decrypt(&frame.payload, password)?
    } else {
        if password.is_some() {
            warn!("hidden message is not encrypted; ignoring password");
        }
        frame.payload
    };

    let text = match config.utf8 {
        Utf8Policy::Strict => String::from_utf8(bytes)?,
        Utf8Policy::Lossy => String::from_utf8_lossy(&bytes).into_owned(),
    };

    Ok(RevealedText {
        text,
        encrypted: frame.encrypted,
    })
}
