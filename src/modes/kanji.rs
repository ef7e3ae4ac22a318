//! Kanji mode (indicator 1000): double-byte Shift-JIS characters packed
//! into 13 bits each.

use encoding_rs::SHIFT_JIS;

use crate::error::{QrError, QrResult};
use crate::models::{BitBuffer, Version};
use crate::modes::Mode;

/// Shift-JIS code for a character, if it is a double-byte one in the
/// encodable ranges 0x8140-0x9FFC and 0xE040-0xEBBF.
fn sjis_code(c: char) -> Option<u16> {
    let mut buf = [0u8; 4];
    let (encoded, _, had_errors) = SHIFT_JIS.encode(c.encode_utf8(&mut buf));
    if had_errors || encoded.len() != 2 {
        return None;
    }
    let code = (encoded[0] as u16) << 8 | encoded[1] as u16;
    match code {
        0x8140..=0x9FFC | 0xE040..=0xEBBF => Some(code),
        _ => None,
    }
}

/// True when every character is an encodable double-byte Shift-JIS one.
pub fn validate(payload: &str) -> bool {
    !payload.is_empty() && payload.chars().all(|c| sjis_code(c).is_some())
}

pub(crate) fn check(payload: &str) -> QrResult<()> {
    match payload.chars().find(|&c| sjis_code(c).is_none()) {
        None => Ok(()),
        Some(c) => Err(QrError::IllegalCharacter {
            mode: Mode::Kanji.name(),
            what: c.to_string(),
        }),
    }
}

/// Append the payload bits (header already written).
///
/// Each Shift-JIS code is rebased (0x8140 or 0xC140) and compacted to
/// `high * 0xC0 + low`, a 13-bit value.
pub fn encode(payload: &str, bits: &mut BitBuffer) -> QrResult<()> {
    for c in payload.chars() {
        let code = sjis_code(c).ok_or_else(|| QrError::IllegalCharacter {
            mode: Mode::Kanji.name(),
            what: c.to_string(),
        })?;
        let offset = if code <= 0x9FFC {
            code - 0x8140
        } else {
            code - 0xC140
        };
        let value = (offset >> 8) as u32 * 0xC0 + (offset & 0xFF) as u32;
        bits.put(value, 13);
    }
    Ok(())
}

/// Consume the character count and payload, returning the decoded string.
pub fn decode(bits: &mut BitBuffer, version: Version) -> QrResult<String> {
    let count = bits.read(Mode::Kanji.char_count_bits(version))? as usize;
    let mut sjis = Vec::with_capacity(count * 2);
    for _ in 0..count {
        let value = bits.read(13)?;
        let assembled = ((value / 0xC0) << 8) | (value % 0xC0);
        let code = if assembled + 0x8140 <= 0x9FFC {
            assembled + 0x8140
        } else {
            assembled + 0xC140
        };
        sjis.push((code >> 8) as u8);
        sjis.push((code & 0xFF) as u8);
    }
    let (decoded, _, had_errors) = SHIFT_JIS.decode(&sjis);
    if had_errors {
        return Err(QrError::IllegalCharacter {
            mode: Mode::Kanji.name(),
            what: "undecodable shift-jis sequence".to_string(),
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
        assert!(validate("点字"));
        assert!(validate("日本語"));
        assert!(!validate("abc"));
        assert!(!validate("日a"));
        assert!(!validate(""));
    }

    #[test]
    fn test_encode_known_value() {
        // ISO/IEC 18004 example: Shift-JIS 0x935F rebases to 0x121F and
        // compacts to 0x12 * 0xC0 + 0x1F = 0xD9F.
        let mut bits = BitBuffer::new();
        encode("点", &mut bits).unwrap();
        assert_eq!(bits.read(13).unwrap(), 0xD9F);
    }

    #[test]
    fn test_roundtrip() {
        for payload in ["点", "日本語", "漢字テスト"] {
            let mut bits = BitBuffer::new();
            bits.put(payload.chars().count() as u32, 8);
            encode(payload, &mut bits).unwrap();
            assert_eq!(decode(&mut bits, ver1()).unwrap(), payload);
        }
    }
}
