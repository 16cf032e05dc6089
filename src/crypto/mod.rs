//! Cryptographic operations for stegtext.
//!
//! Payloads are optionally encrypted with a password before framing
//! (SHA-256 key derivation + ChaCha20Poly1305).

pub mod symmetric;

pub use symmetric::{
    decrypt, derive_key, encrypt, Key, SymmetricError, ENCRYPTION_OVERHEAD, KEY_SIZE, NONCE_SIZE,
    TAG_SIZE,
};
