//! Frame construction and parsing.
//!
//! A frame is the bit sequence written into the carrier's LSBs:
//!
//! ```text
//! bit 0        : flag (0 = plaintext, 1 = encrypted)
//! bits 1-32    : payload byte length, big-endian u32
//! bits 33..    : payload bytes, MSB-first, length*8 bits
//! ```

use std::ops::Index;

use crate::stego::error::StegoError;

/// Size of the frame header in bits (flag + 32-bit length).
pub const HEADER_BITS: usize = 33;

/// Bits of the length field.
const LENGTH_BITS: usize = 32;

/// An ordered run of bits, one per carrier channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream(Vec<bool>);

impl BitStream {
    pub fn with_capacity(bits: usize) -> Self {
        Self(Vec::with_capacity(bits))
    }

    pub fn push(&mut self, bit: bool) {
        self.0.push(bit);
    }

    /// Appends the low `width` bits of `value`, most significant first.
    pub fn push_bits(&mut self, value: u32, width: usize) {
        for i in (0..width).rev() {
            self.0.push((value >> i) & 1 == 1);
        }
    }

    /// Appends each byte MSB-first.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.push_bits(u32::from(byte), 8);
        }
    }

    /// Collects the least significant bit of each channel value.
    pub fn from_lsbs(channels: &[u8]) -> Self {
        Self(channels.iter().map(|c| c & 1 == 1).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

impl Index<usize> for BitStream {
    type Output = bool;

    fn index(&self, index: usize) -> &bool {
        &self.0[index]
    }
}

impl From<Vec<bool>> for BitStream {
    fn from(bits: Vec<bool>) -> Self {
        Self(bits)
    }
}

/// Decoded frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Whether the payload was encrypted before embedding.
    pub encrypted: bool,
    /// Payload length in bytes, as stored.
    pub length: u32,
}

impl FrameHeader {
    /// Bits the whole frame occupies, header included.
    pub fn frame_bits(&self) -> u64 {
        required_bits(self.length)
    }
}

/// A complete frame: flag plus stored payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub encrypted: bool,
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn new(payload: Vec<u8>, encrypted: bool) -> Self {
        Self { encrypted, payload }
    }

    /// Stored payload length in bytes.
    pub fn length(&self) -> usize {
        self.payload.len()
    }

    pub fn to_bits(&self) -> Result<BitStream, StegoError> {
        encode_frame(&self.payload, self.encrypted)
    }

    /// Parses a frame from a bit sequence, checking the length field against `bits.len()`.
    pub fn from_bits(bits: &BitStream) -> Result<Self, StegoError> {
        let header = decode_header(bits)?;
        let payload = decode_payload(bits, header.length)?;
        Ok(Self::new(payload, header.encrypted))
    }
}

/// Bits needed for a frame carrying `length` payload bytes.
pub fn required_bits(length: u32) -> u64 {
    HEADER_BITS as u64 + u64::from(length) * 8
}

/// Builds the frame bit sequence for `payload`.
///
/// An empty payload yields a header-only stream.
pub fn encode_frame(payload: &[u8], encrypted: bool) -> Result<BitStream, StegoError> {
    let length = u32::try_from(payload.len()).map_err(|_| StegoError::PayloadTooLarge {
        length: payload.len(),
    })?;

    let mut bits = BitStream::with_capacity(HEADER_BITS + payload.len() * 8);
    bits.push(encrypted);
    bits.push_bits(length, LENGTH_BITS);
    bits.push_bytes(payload);

    Ok(bits)
}

/// Reads the flag and length from the first 33 bits.
pub fn decode_header(bits: &BitStream) -> Result<FrameHeader, StegoError> {
    if bits.len() < HEADER_BITS {
        return Err(StegoError::HeaderTruncated {
            available: bits.len(),
        });
    }

    let length = bits.as_slice()[1..HEADER_BITS]
        .iter()
        .fold(0u32, |acc, &bit| (acc << 1) | u32::from(bit));

    Ok(FrameHeader {
        encrypted: bits[0],
        length,
    })
}

/// Reads `length` bytes starting at bit offset 33.
///
/// Fails without reading if the payload would run past the end of `bits`.
pub fn decode_payload(bits: &BitStream, length: u32) -> Result<Vec<u8>, StegoError> {
    if required_bits(length) > bits.len() as u64 {
        return Err(StegoError::CorruptedHeader {
            decoded_length: length,
            capacity: bits.len(),
        });
    }

    let end = HEADER_BITS + length as usize * 8;
    let payload = bits.as_slice()[HEADER_BITS..end]
        .chunks_exact(8)
        .map(|byte| byte.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit)))
        .collect();

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_u8s(bits: &BitStream) -> Vec<u8> {
        bits.iter().map(u8::from).collect()
    }

    #[test]
    fn test_header_layout() {
        let bits = encode_frame(b"OK", false).unwrap();
        assert_eq!(bits.len(), HEADER_BITS + 16);

        let expected_length: Vec<u8> = (0..32).map(|i| u8::from(i == 30)).collect();
        let raw = to_u8s(&bits);
        assert_eq!(raw[0], 0);
        assert_eq!(&raw[1..33], expected_length.as_slice());
        // 'O' = 0x4F, 'K' = 0x4B
        assert_eq!(&raw[33..41], &[0, 1, 0, 0, 1, 1, 1, 1]);
        assert_eq!(&raw[41..49], &[0, 1, 0, 0, 1, 0, 1, 1]);
    }

    #[test]
    fn test_flag_bit() {
        let bits = encode_frame(b"x", true).unwrap();
        assert!(bits[0]);

        let header = decode_header(&bits).unwrap();
        assert!(header.encrypted);
        assert_eq!(header.length, 1);
    }

    #[test]
    fn test_empty_payload_is_header_only() {
        let bits = encode_frame(b"", false).unwrap();
        assert_eq!(bits.len(), HEADER_BITS);

        let header = decode_header(&bits).unwrap();
        assert_eq!(header.length, 0);
        assert!(decode_payload(&bits, 0).unwrap().is_empty());
    }

    #[test]
    fn test_length_is_big_endian() {
        let payload = vec![0xAB; 0x0102];
        let bits = encode_frame(&payload, false).unwrap();
        let header = decode_header(&bits).unwrap();
        assert_eq!(header.length, 0x0102);
        assert_eq!(header.frame_bits(), 33 + 0x0102 * 8);
    }

    #[test]
    fn test_frame_from_bits() {
        let frame = Frame::new("héllo".as_bytes().to_vec(), false);
        let bits = frame.to_bits().unwrap();
        assert_eq!(Frame::from_bits(&bits).unwrap(), frame);
    }

    #[test]
    fn test_trailing_bits_are_ignored() {
        let mut bits = encode_frame(b"hi", false).unwrap();
        for _ in 0..13 {
            bits.push(true);
        }
        assert_eq!(decode_payload(&bits, 2).unwrap(), b"hi");
    }

    #[test]
    fn test_truncated_header() {
        let bits = BitStream::from(vec![false; 20]);
        assert!(matches!(
            decode_header(&bits),
            Err(StegoError::HeaderTruncated { available: 20 })
        ));
    }

    #[test]
    fn test_length_past_end_is_rejected() {
        let bits = encode_frame(b"abc", false).unwrap();
        let result = decode_payload(&bits, 4);
        assert!(matches!(
            result,
            Err(StegoError::CorruptedHeader {
                decoded_length: 4,
                capacity: 57
            })
        ));
    }

    #[test]
    fn test_max_length_does_not_overflow() {
        let bits = encode_frame(b"", false).unwrap();
        assert!(matches!(
            decode_payload(&bits, u32::MAX),
            Err(StegoError::CorruptedHeader { .. })
        ));
        assert_eq!(required_bits(u32::MAX), 33 + u64::from(u32::MAX) * 8);
    }
}
