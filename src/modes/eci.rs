//! ECI mode (indicator 0111): designator encoding and charset table.
//!
//! An ECI segment changes the charset of the byte segment that must follow
//! it. Designators with no registered transcoding (CP437 and the GLI
//! interpretations among them) pass the byte payload through unchanged.

use encoding_rs::{
    Encoding, BIG5, EUC_KR, GB18030, ISO_8859_10, ISO_8859_13, ISO_8859_14, ISO_8859_15,
    ISO_8859_16, ISO_8859_2, ISO_8859_3, ISO_8859_4, ISO_8859_5, ISO_8859_6, ISO_8859_7,
    ISO_8859_8, SHIFT_JIS, UTF_16BE, UTF_8, WINDOWS_1250, WINDOWS_1251, WINDOWS_1252,
    WINDOWS_1254, WINDOWS_1256, WINDOWS_874,
};

use crate::error::{QrError, QrResult};
use crate::models::BitBuffer;

/// Largest assignable ECI designator.
pub const MAX_DESIGNATOR: u32 = 999_999;

/// Bits the designator occupies on the wire (8, 16 or 24).
pub fn designator_bit_len(designator: u32) -> usize {
    if designator < 128 {
        8
    } else if designator < 16_384 {
        16
    } else {
        24
    }
}

/// Append the designator with its MSB flag pattern: `0xxxxxxx`,
/// `10xxxxxx xxxxxxxx` or `110xxxxx xxxxxxxx xxxxxxxx`.
pub fn write_designator(designator: u32, bits: &mut BitBuffer) -> QrResult<()> {
    if designator > MAX_DESIGNATOR {
        return Err(QrError::InvalidEciDesignator);
    }
    if designator < 128 {
        bits.put(designator, 8);
    } else if designator < 16_384 {
        bits.put(0b10 << 14 | designator, 16);
    } else {
        bits.put(0b110 << 21 | designator, 24);
    }
    Ok(())
}

/// Parse a designator from its flag-prefixed form.
pub fn read_designator(bits: &mut BitBuffer) -> QrResult<u32> {
    let first = bits.read(8)?;
    let designator = if first & 0b1000_0000 == 0 {
        first
    } else if first & 0b1100_0000 == 0b1000_0000 {
        (first & 0b0011_1111) << 8 | bits.read(8)?
    } else if first & 0b1110_0000 == 0b1100_0000 {
        (first & 0b0001_1111) << 16 | bits.read(16)?
    } else {
        return Err(QrError::InvalidEciDesignator);
    };
    if designator > MAX_DESIGNATOR {
        return Err(QrError::InvalidEciDesignator);
    }
    Ok(designator)
}

/// Charset assignment behind an ECI designator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EciCharset {
    id: u32,
}

impl EciCharset {
    /// Charset for a designator in range.
    pub fn new(id: u32) -> QrResult<Self> {
        if id > MAX_DESIGNATOR {
            return Err(QrError::InvalidEciDesignator);
        }
        Ok(Self { id })
    }

    /// The designator value.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Registered transcoding for this designator, if any.
    ///
    /// `None` means the byte payload passes through untranscoded; that
    /// covers CP437 (0, 2), the GLI latin-1 (1), US-ASCII (27), the binary
    /// interpretation (899) and every designator without an assignment.
    pub fn encoding(&self) -> Option<&'static Encoding> {
        match self.id {
            3 => Some(WINDOWS_1252), // ISO-8859-1, decoded via its superset
            4 => Some(ISO_8859_2),
            5 => Some(ISO_8859_3),
            6 => Some(ISO_8859_4),
            7 => Some(ISO_8859_5),
            8 => Some(ISO_8859_6),
            9 => Some(ISO_8859_7),
            10 => Some(ISO_8859_8),
            11 => Some(WINDOWS_1254), // ISO-8859-9 superset
            12 => Some(ISO_8859_10),
            13 => Some(WINDOWS_874), // ISO-8859-11 superset
            15 => Some(ISO_8859_13),
            16 => Some(ISO_8859_14),
            17 => Some(ISO_8859_15),
            18 => Some(ISO_8859_16),
            20 => Some(SHIFT_JIS),
            21 => Some(WINDOWS_1250),
            22 => Some(WINDOWS_1251),
            23 => Some(WINDOWS_1252),
            24 => Some(WINDOWS_1256),
            25 => Some(UTF_16BE),
            26 => Some(UTF_8),
            28 => Some(BIG5),
            29 => Some(GB18030),
            30 => Some(EUC_KR),
            _ => None,
        }
    }

    /// Turn a byte payload into text under this charset.
    ///
    /// Without a registered transcoding the bytes map 1:1 into the output
    /// string, preserving every value.
    pub fn decode_bytes(&self, bytes: &[u8]) -> String {
        match self.encoding() {
            Some(encoding) => {
                let (decoded, _, _) = encoding.decode(bytes);
                decoded.into_owned()
            }
            None => bytes.iter().map(|&b| b as char).collect(),
        }
    }
}
