//! Byte mode (indicator 0100): raw bytes, 8 bits each.

use crate::error::QrResult;
use crate::models::{BitBuffer, Version};
use crate::modes::Mode;

/// Append the payload bytes (header already written).
pub fn encode(payload: &[u8], bits: &mut BitBuffer) {
    for &byte in payload {
        bits.put(byte as u32, 8);
    }
}

/// Consume the character count and payload, returning the raw bytes.
///
/// Charset interpretation happens in the decode loop: an active ECI
/// designator selects the transcoding, otherwise the bytes are taken as
/// UTF-8 when valid and Latin-1 when not.
pub fn decode(bits: &mut BitBuffer, version: Version) -> QrResult<Vec<u8>> {
    let count = bits.read(Mode::Byte.char_count_bits(version))? as usize;
    let mut bytes = Vec::with_capacity(count);
    for _ in 0..count {
        bytes.push(bits.read(8)? as u8);
    }
    Ok(bytes)
}

/// Interpret decoded bytes without an ECI designator.
pub fn interpret(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QrError;
    use crate::models::Version;

    fn ver1() -> Version {
        Version::new(1).unwrap()
    }

    #[test]
    fn test_roundtrip() {
        let payload = "Hello, 世界".as_bytes();
        let mut bits = BitBuffer::new();
        bits.put(payload.len() as u32, 8);
        encode(payload, &mut bits);
        assert_eq!(decode(&mut bits, ver1()).unwrap(), payload);
    }

    #[test]
    fn test_interpret_utf8_and_latin1() {
        assert_eq!(interpret("caf\u{e9}".as_bytes()), "café");
        // Invalid UTF-8 falls back to a 1:1 byte mapping.
        assert_eq!(interpret(&[0x48, 0x49, 0xFF]), "HI\u{ff}");
    }

    #[test]
    fn test_decode_truncated() {
        let mut bits = BitBuffer::new();
        bits.put(2, 8);
        bits.put(0x41, 8);
        assert!(matches!(
            decode(&mut bits, ver1()),
            Err(QrError::NotEnoughBits { .. })
        ));
    }
}
