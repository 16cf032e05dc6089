//! Error types for framing, embedding and extraction.

use thiserror::Error;

use crate::crypto::SymmetricError;

/// Errors that can occur while hiding or revealing a message.
#[derive(Error, Debug)]
pub enum StegoError {
    /// The frame needs more bits than the carrier has channels. Nothing was written.
    #[error("Image too small to hide message: need {required} bits, have {available}")]
    InsufficientCapacity { required: usize, available: usize },

    /// The decoded length field points past the end of the carrier.
    #[error("Corrupted header: decoded length {decoded_length} bytes does not fit in {capacity} bits")]
    CorruptedHeader { decoded_length: u32, capacity: usize },

    /// The carrier cannot even hold the 33-bit header.
    #[error("Carrier too small to contain a header: {available} bits available")]
    HeaderTruncated { available: usize },

    /// The payload length does not fit in the 32-bit length field.
    #[error("Payload too large: {length} bytes exceeds the 32-bit length field")]
    PayloadTooLarge { length: usize },

    /// The encrypted payload did not authenticate.
    #[error("Wrong password or corrupted image")]
    WrongPasswordOrCorrupted,

    /// The hidden message is encrypted but no password was supplied.
    #[error("Hidden message is encrypted: a password is required")]
    PasswordRequired,

    /// The plaintext payload is not valid UTF-8.
    #[error("Hidden payload is not valid UTF-8: {0}")]
    MalformedPayloadText(#[from] std::string::FromUtf8Error),

    #[error("Encryption error: {0}")]
    Encryption(SymmetricError),

    /// A raw channel buffer does not match its declared dimensions.
    #[error("Invalid pixel buffer: expected {expected} channel values, got {actual}")]
    InvalidPixelBuffer { expected: usize, actual: usize },
}

impl From<SymmetricError> for StegoError {
    fn from(err: SymmetricError) -> Self {
        match err {
            SymmetricError::AuthenticationFailed | SymmetricError::CiphertextTooShort => {
                Self::WrongPasswordOrCorrupted
            }
            other => Self::Encryption(other),
        }
    }
}
