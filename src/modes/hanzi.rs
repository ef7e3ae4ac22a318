//! Hanzi mode (indicator 1101, GB/T 18284): double-byte GB2312 characters
//! packed into 13 bits each, after a 4-bit subset indicator.

use encoding_rs::GB18030;

use crate::error::{QrError, QrResult};
use crate::models::{BitBuffer, Version};
use crate::modes::Mode;

/// The only subset this crate emits and accepts.
pub const GB2312_SUBSET: u32 = 0b0001;

/// GB2312 code for a character, if it is a double-byte one in the
/// encodable ranges 0xA1A1-0xAAFE and 0xB0A1-0xFAFE.
fn gb_code(c: char) -> Option<u16> {
    let mut buf = [0u8; 4];
    let (encoded, _, had_errors) = GB18030.encode(c.encode_utf8(&mut buf));
    if had_errors || encoded.len() != 2 {
        return None;
    }
    let code = (encoded[0] as u16) << 8 | encoded[1] as u16;
    match code {
        0xA1A1..=0xAAFE | 0xB0A1..=0xFAFE => {
            // Low byte must stay inside the GB2312 cell range.
            if (0xA1..=0xFE).contains(&(code & 0xFF)) {
                Some(code)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// True when every character is an encodable double-byte GB2312 one.
pub fn validate(payload: &str) -> bool {
    !payload.is_empty() && payload.chars().all(|c| gb_code(c).is_some())
}

pub(crate) fn check(payload: &str) -> QrResult<()> {
    match payload.chars().find(|&c| gb_code(c).is_none()) {
        None => Ok(()),
        Some(c) => Err(QrError::IllegalCharacter {
            mode: Mode::Hanzi.name(),
            what: c.to_string(),
        }),
    }
}

/// Append the payload bits (subset indicator and count already written).
///
/// Each GB2312 code is rebased (0xA1A1 or 0xA6A1) and compacted to
/// `high * 0x60 + low`, a 13-bit value.
pub fn encode(payload: &str, bits: &mut BitBuffer) -> QrResult<()> {
    for c in payload.chars() {
        let code = gb_code(c).ok_or_else(|| QrError::IllegalCharacter {
            mode: Mode::Hanzi.name(),
            what: c.to_string(),
        })?;
        let offset = if code <= 0xAAFE {
            code - 0xA1A1
        } else {
            code - 0xA6A1
        };
        let value = (offset >> 8) as u32 * 0x60 + (offset & 0xFF) as u32;
        bits.put(value, 13);
    }
    Ok(())
}

/// Consume the subset indicator, character count and payload, returning
/// the decoded string.
pub fn decode(bits: &mut BitBuffer, version: Version) -> QrResult<String> {
    let subset = bits.read(4)?;
    if subset != GB2312_SUBSET {
        return Err(QrError::InvalidSubset(subset as u8));
    }
    let count = bits.read(Mode::Hanzi.char_count_bits(version))? as usize;
    let mut gb = Vec::with_capacity(count * 2);
    for _ in 0..count {
        let value = bits.read(13)?;
        let assembled = ((value / 0x60) << 8) | (value % 0x60);
        let code = if assembled < 0x0A00 {
            assembled + 0xA1A1
        } else {
            assembled + 0xA6A1
        };
        gb.push((code >> 8) as u8);
        gb.push((code & 0xFF) as u8);
    }
    let (decoded, _, had_errors) = GB18030.decode(&gb);
    if had_errors {
        return Err(QrError::IllegalCharacter {
            mode: Mode::Hanzi.name(),
            what: "undecodable gb2312 sequence".to_string(),
        });
    }
    Ok(decoded.into_owned())
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
        assert!(validate("无可奈何"));
        assert!(validate("中文"));
        assert!(!validate("abc"));
        assert!(!validate("中a"));
        assert!(!validate(""));
    }

    #[test]
    fn test_roundtrip() {
        for payload in ["中", "无可奈何燃花作香", "汉字模式"] {
            let mut bits = BitBuffer::new();
            bits.put(GB2312_SUBSET, 4);
            bits.put(payload.chars().count() as u32, 8);
            encode(payload, &mut bits).unwrap();
            assert_eq!(decode(&mut bits, ver1()).unwrap(), payload);
        }
    }

    #[test]
    fn test_decode_rejects_unknown_subset() {
        let mut bits = BitBuffer::new();
        bits.put(0b0010, 4);
        bits.put(1, 8);
        bits.put(0, 13);
        assert_eq!(decode(&mut bits, ver1()), Err(QrError::InvalidSubset(2)));
    }
}
