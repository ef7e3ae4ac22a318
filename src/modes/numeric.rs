//! Numeric mode (indicator 0001): digits 0-9, three per 10 bits.

use crate::error::{QrError, QrResult};
use crate::models::{BitBuffer, Version};
use crate::modes::Mode;

/// True when every character is a decimal digit.
pub fn validate(payload: &str) -> bool {
    !payload.is_empty() && payload.chars().all(|c| c.is_ascii_digit())
}

pub(crate) fn check(payload: &str) -> QrResult<()> {
    match payload.chars().find(|c| !c.is_ascii_digit()) {
        None => Ok(()),
        Some(c) => Err(QrError::IllegalCharacter {
            mode: Mode::Numeric.name(),
            what: c.to_string(),
        }),
    }
}

/// Groups of 3 digits use 10 bits, 2 digits 7 bits, 1 digit 4 bits.
fn group_bits(len: usize) -> usize {
    match len {
        3 => 10,
        2 => 7,
        _ => 4,
    }
}

/// Append the payload bits (header already written).
pub fn encode(payload: &str, bits: &mut BitBuffer) -> QrResult<()> {
    check(payload)?;
    let digits = payload.as_bytes();
    for group in digits.chunks(3) {
        let value = group.iter().fold(0u32, |n, b| n * 10 + (b - b'0') as u32);
        bits.put(value, group_bits(group.len()));
    }
    Ok(())
}

/// Consume the character count and payload, returning the digit string.
pub fn decode(bits: &mut BitBuffer, version: Version) -> QrResult<String> {
    let count = bits.read(Mode::Numeric.char_count_bits(version))? as usize;
    let mut out = String::with_capacity(count);
    let mut remaining = count;
    while remaining > 0 {
        let group = remaining.min(3);
        let value = bits.read(group_bits(group))?;
        let limit = [10, 100, 1000][group - 1];
        if value >= limit {
            return Err(QrError::IllegalCharacter {
                mode: Mode::Numeric.name(),
                what: format!("group value {value}"),
            });
        }
        let digits = format!("{:0width$}", value, width = group);
        out.push_str(&digits);
        remaining -= group;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Version;

    fn ver1() -> Version {
        Version::new(1).unwrap()
    }

    #[test]
    fn test_validate() {
        assert!(validate("0123456789"));
        assert!(!validate("01234A"));
        assert!(!validate(""));
    }

    #[test]
    fn test_encode_known_groups() {
        // ISO/IEC 18004 example: "01234567" packs as 012 / 345 / 67.
        let mut bits = BitBuffer::new();
        encode("01234567", &mut bits).unwrap();
        assert_eq!(bits.read(10).unwrap(), 12);
        assert_eq!(bits.read(10).unwrap(), 345);
        assert_eq!(bits.read(7).unwrap(), 67);
    }

    #[test]
    fn test_roundtrip() {
        for payload in ["0", "42", "8675309", "000000000001"] {
            let mut bits = BitBuffer::new();
            bits.put(payload.len() as u32, 10);
            encode(payload, &mut bits).unwrap();
            assert_eq!(decode(&mut bits, ver1()).unwrap(), payload);
        }
    }

    #[test]
    fn test_decode_rejects_overflow_group() {
        let mut bits = BitBuffer::new();
        bits.put(3, 10);
        bits.put(1017, 10); // no three-digit group encodes above 999
        assert!(matches!(
            decode(&mut bits, ver1()),
            Err(QrError::IllegalCharacter { .. })
        ));
    }

    #[test]
    fn test_decode_truncated_stream() {
        let mut bits = BitBuffer::new();
        bits.put(3, 10);
        bits.put(1, 4);
        assert!(matches!(
            decode(&mut bits, ver1()),
            Err(QrError::NotEnoughBits { .. })
        ));
    }
}
