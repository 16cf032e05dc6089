//! Password-based authenticated encryption for hidden payloads.
//!
//! - SHA-256 of the password for key derivation
//! - ChaCha20-Poly1305 for authenticated encryption
//!
//! The key is derived without a salt, so a given password always maps to the
//! same key. The random nonce keeps ciphertexts of identical messages distinct,
//! but precomputed dictionaries against the key derivation remain possible.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::Zeroizing;

/// Key size for ChaCha20Poly1305.
pub const KEY_SIZE: usize = 32;

/// Nonce size for ChaCha20Poly1305.
pub const NONCE_SIZE: usize = 12;

/// Poly1305 authentication tag size.
pub const TAG_SIZE: usize = 16;

/// Bytes added to a plaintext by [`encrypt`]: nonce plus tag.
pub const ENCRYPTION_OVERHEAD: usize = NONCE_SIZE + TAG_SIZE;

/// A symmetric key derived from a password. Wiped on drop.
pub type Key = Zeroizing<[u8; KEY_SIZE]>;

/// Errors that can occur during symmetric encryption.
#[derive(Error, Debug)]
pub enum SymmetricError {
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// The Poly1305 tag did not verify: wrong password or tampered data.
    #[error("Authentication failed: wrong password or corrupted ciphertext")]
    AuthenticationFailed,

    #[error("Invalid ciphertext: too short")]
    CiphertextTooShort,
}

/// Derives a 256-bit key from a password.
pub fn derive_key(password: &str) -> Key {
    let digest = Sha256::digest(password.as_bytes());
    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    key.copy_from_slice(&digest);
    key
}

/// Encrypts data under a password.
///
/// The output format is: nonce (12 bytes) || ciphertext (variable, includes auth tag)
pub fn encrypt(plaintext: &[u8], password: &str) -> Result<Vec<u8>, SymmetricError> {
    let key = derive_key(password);

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::RngCore::fill_bytes(&mut OsRng, &mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let cipher = ChaCha20Poly1305::new_from_slice(key.as_slice())
        .map_err(|e| SymmetricError::EncryptionFailed(e.to_string()))?;

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| SymmetricError::EncryptionFailed(e.to_string()))?;

    let mut result = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    result.extend_from_slice(&nonce_bytes);
    result.extend_from_slice(&ciphertext);

    Ok(result)
}

/// Decrypts data produced by [`encrypt`].
///
/// Expects input format: nonce (12 bytes) || ciphertext (variable, includes auth tag)
pub fn decrypt(data: &[u8], password: &str) -> Result<Vec<u8>, SymmetricError> {
    if data.len() < ENCRYPTION_OVERHEAD {
        return Err(SymmetricError::CiphertextTooShort);
    }

    let (nonce_bytes, ciphertext) = data.split_at(NONCE_SIZE);
    let key = derive_key(password);

    let cipher = ChaCha20Poly1305::new_from_slice(key.as_slice())
        .map_err(|_| SymmetricError::AuthenticationFailed)?;

    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| SymmetricError::AuthenticationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let plaintext = b"Hello, stegtext!";
        let password = "my_secret_password";

        let encrypted = encrypt(plaintext, password).unwrap();
        let decrypted = decrypt(&encrypted, password).unwrap();

        assert_eq!(plaintext.as_slice(), decrypted.as_slice());
    }

    #[test]
    fn test_output_size() {
        let encrypted = encrypt(b"abcd", "pw").unwrap();
        assert_eq!(encrypted.len(), 4 + ENCRYPTION_OVERHEAD);
    }

    #[test]
    fn test_wrong_password_fails_authentication() {
        let encrypted = encrypt(b"Secret data", "correct").unwrap();
        let result = decrypt(&encrypted, "wrong");

        assert!(matches!(result, Err(SymmetricError::AuthenticationFailed)));
    }

    #[test]
    fn test_tampered_ciphertext_fails_authentication() {
        let mut encrypted = encrypt(b"Secret data", "pw").unwrap();
        let last = encrypted.len() - 1;
        encrypted[last] ^= 0x01;

        assert!(matches!(
            decrypt(&encrypted, "pw"),
            Err(SymmetricError::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_empty_plaintext() {
        let encrypted = encrypt(b"", "test").unwrap();
        let decrypted = decrypt(&encrypted, "test").unwrap();

        assert!(decrypted.is_empty());
    }

    #[test]
    fn test_ciphertext_too_short() {
        let short_data = vec![0u8; 10];
        let result = decrypt(&short_data, "test");

        assert!(matches!(result, Err(SymmetricError::CiphertextTooShort)));
    }

    #[test]
    fn test_deterministic_key_derivation() {
        let key1 = derive_key("test_password");
        let key2 = derive_key("test_password");

        assert_eq!(*key1, *key2);
        assert_ne!(*key1, *derive_key("other_password"));
    }

    #[test]
    fn test_key_is_sha256_of_password() {
        // SHA-256("abc")
        let expected: [u8; 32] = [
            0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae,
            0x22, 0x23, 0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61,
            0xf2, 0x00, 0x15, 0xad,
        ];
        assert_eq!(*derive_key("abc"), expected);
    }

    #[test]
    fn test_nonce_is_random() {
        let a = encrypt(b"same", "pw").unwrap();
        let b = encrypt(b"same", "pw").unwrap();
        assert_ne!(a, b);
    }
}
