//! Hiding a text message in a pixel buffer.
//!
//! 1. Encode the text as UTF-8
//! 2. Encrypt it if a non-empty password is given (flag bit set)
//! 3. Frame it: flag + 32-bit length + payload bits
//! 4. Write the frame into the channel LSBs

use log::debug;

use crate::crypto::{encrypt, ENCRYPTION_OVERHEAD};
use crate::stego::frame::{required_bits, Frame};
use crate::stego::{embed, PixelBuffer, StegoError};

/// Treats an empty password the same as no password.
pub(crate) fn effective_password(password: Option<&str>) -> Option<&str> {
    password.filter(|p| !p.is_empty())
}

/// Builds the frame for `text`, encrypting it when a password is given.
pub fn prepare_frame(text: &str, password: Option<&str>) -> Result<Frame, StegoError> {
    let frame = match effective_password(password) {
        Some(password) => Frame::new(encrypt(text.as_bytes(), password)?, true),
        None => Frame::new(text.as_bytes().to_vec(), false),
    };
    debug!(
        "prepared frame: {} text bytes, {} stored bytes, encrypted={}",
        text.len(),
        frame.length(),
        frame.encrypted
    );
    Ok(frame)
}

/// Number of carrier bits `text` would occupy.
pub fn required_bits_for(text: &str, password: Option<&str>) -> u64 {
    let overhead = if effective_password(password).is_some() {
        ENCRYPTION_OVERHEAD
    } else {
        0
    };
    let stored = (text.len() + overhead) as u64;
    required_bits(0) + stored * 8
}

/// Hides `text` in `buf` and returns the stego buffer.
///
/// The buffer is consumed. If it is too small, nothing is embedded and
/// [`StegoError::InsufficientCapacity`] is returned.
pub fn hide(buf: PixelBuffer, text: &str, password: Option<&str>) -> Result<PixelBuffer, StegoError> {
    let bits = prepare_frame(text, password)?.to_bits()?;
    embed(buf, &bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::decrypt;

    #[test]
    fn test_plaintext_frame() {
        let frame = prepare_frame("OK", None).unwrap();
        assert!(!frame.encrypted);
        assert_eq!(frame.payload, b"OK");
    }

    #[test]
    fn test_empty_password_means_plaintext() {
        let frame = prepare_frame("OK", Some("")).unwrap();
        assert!(!frame.encrypted);
        assert_eq!(frame.payload, b"OK");
    }

    #[test]
    fn test_encrypted_frame() {
        let frame = prepare_frame("secret", Some("pw")).unwrap();
        assert!(frame.encrypted);
        assert_eq!(frame.length(), 6 + ENCRYPTION_OVERHEAD);
        assert_eq!(decrypt(&frame.payload, "pw").unwrap(), b"secret");
    }

    #[test]
    fn test_required_bits_matches_frame() {
        for password in [None, Some("pw")] {
            let text = "naïve café";
            let bits = prepare_frame(text, password).unwrap().to_bits().unwrap();
            assert_eq!(required_bits_for(text, password), bits.len() as u64);
        }
    }

    #[test]
    fn test_hide_too_small() {
        let buf = PixelBuffer::from_fn(4, 3, |_, _| [0, 0, 0]);
        let result = hide(buf, "Hi", None);
        assert!(matches!(
            result,
            Err(StegoError::InsufficientCapacity {
                required: 49,
                available: 36
            })
        ));
    }
}
