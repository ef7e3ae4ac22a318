//! Bit-stream parsing: the mode-indicator loop turning corrected data
//! codewords back into text.

use crate::error::{QrError, QrResult};
use crate::models::{BitBuffer, Version};
use crate::modes::eci::EciCharset;
use crate::modes::{alphanumeric, byte, eci, hanzi, kanji, numeric, Mode};

/// Parse the data codewords into raw bytes and decoded text.
///
/// The loop reads 4-bit mode indicators until the terminator (0000) or the
/// end of the stream. An ECI segment must be immediately followed by a
/// byte segment, whose payload is transcoded per the designator's charset;
/// designators without a registered transcoding pass the bytes through.
pub fn parse(data: &[u8], version: Version) -> QrResult<(Vec<u8>, String)> {
    let mut bits = BitBuffer::from_bytes(data);
    let mut raw = Vec::new();
    let mut content = String::new();

    loop {
        if bits.available() < 4 {
            break;
        }
        let indicator = bits.read(4)?;
        if indicator == 0 {
            break;
        }
        let mode =
            Mode::from_indicator(indicator).ok_or(QrError::UnknownMode(indicator as u8))?;
        match mode {
            Mode::Numeric => {
                let text = numeric::decode(&mut bits, version)?;
                raw.extend_from_slice(text.as_bytes());
                content.push_str(&text);
            }
            Mode::Alphanumeric => {
                let text = alphanumeric::decode(&mut bits, version)?;
                raw.extend_from_slice(text.as_bytes());
                content.push_str(&text);
            }
            Mode::Byte => {
                let bytes = byte::decode(&mut bits, version)?;
                content.push_str(&byte::interpret(&bytes));
                raw.extend(bytes);
            }
            Mode::Kanji => {
                let text = kanji::decode(&mut bits, version)?;
                raw.extend_from_slice(text.as_bytes());
                content.push_str(&text);
            }
            Mode::Hanzi => {
                let text = hanzi::decode(&mut bits, version)?;
                raw.extend_from_slice(text.as_bytes());
                content.push_str(&text);
            }
            Mode::Eci => {
                let charset = EciCharset::new(eci::read_designator(&mut bits)?)?;
                let next = bits.read(4)?;
                if next != Mode::Byte.indicator() {
                    return Err(QrError::EciFollowedByInvalidMode(next as u8));
                }
                let bytes = byte::decode(&mut bits, version)?;
                content.push_str(&charset.decode_bytes(&bytes));
                raw.extend(bytes);
            }
        }
    }

    Ok((raw, content))
}
