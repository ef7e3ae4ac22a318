//! Segment modes: validation, bit-stream encoding and decoding per mode.
//!
//! Each mode module offers `validate`, an encoder writing the payload bits
//! (mode indicator and character count are written by [`Segment::write`]),
//! and a decoder that consumes the character count and payload from a
//! [`BitBuffer`] whose mode indicator was already read.

pub mod alphanumeric;
pub mod byte;
pub mod eci;
pub mod hanzi;
pub mod kanji;
pub mod numeric;

use crate::error::{QrError, QrResult};
use crate::models::{BitBuffer, Version};

/// Segment mode with its 4-bit indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Digits 0-9, packed three per 10 bits.
    Numeric,
    /// The 45-character alphabet, packed two per 11 bits.
    Alphanumeric,
    /// Raw bytes, 8 bits each.
    Byte,
    /// Two-byte Shift-JIS characters, 13 bits each.
    Kanji,
    /// Two-byte GB2312 characters, 13 bits each after a subset indicator.
    Hanzi,
    /// Extended Channel Interpretation designator.
    Eci,
}

impl Mode {
    /// The 4-bit mode indicator.
    pub fn indicator(&self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
            Mode::Kanji => 0b1000,
            Mode::Hanzi => 0b1101,
            Mode::Eci => 0b0111,
        }
    }

    /// Mode for a 4-bit indicator, if recognized.
    pub fn from_indicator(indicator: u32) -> Option<Mode> {
        match indicator {
            0b0001 => Some(Mode::Numeric),
            0b0010 => Some(Mode::Alphanumeric),
            0b0100 => Some(Mode::Byte),
            0b1000 => Some(Mode::Kanji),
            0b1101 => Some(Mode::Hanzi),
            0b0111 => Some(Mode::Eci),
            _ => None,
        }
    }

    /// Character-count-indicator width for a version (ISO/IEC 18004
    /// Table 3; ECI segments carry no count).
    pub fn char_count_bits(&self, version: Version) -> usize {
        let range = match version.number() {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match self {
            Mode::Numeric => [10, 12, 14][range],
            Mode::Alphanumeric => [9, 11, 13][range],
            Mode::Byte => [8, 16, 16][range],
            Mode::Kanji | Mode::Hanzi => [8, 10, 12][range],
            Mode::Eci => 0,
        }
    }

    /// Mode name for error reporting.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Numeric => "numeric",
            Mode::Alphanumeric => "alphanumeric",
            Mode::Byte => "byte",
            Mode::Kanji => "kanji",
            Mode::Hanzi => "hanzi",
            Mode::Eci => "eci",
        }
    }

    /// Tightest mode whose alphabet covers the whole payload.
    ///
    /// Hanzi is never auto-selected; use an explicit segment for it.
    pub fn detect(payload: &str) -> Mode {
        if numeric::validate(payload) {
            Mode::Numeric
        } else if alphanumeric::validate(payload) {
            Mode::Alphanumeric
        } else if kanji::validate(payload) {
            Mode::Kanji
        } else {
            Mode::Byte
        }
    }
}

/// One encodable segment: a mode plus its validated payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Digits only.
    Numeric(String),
    /// 45-character alphabet only.
    Alphanumeric(String),
    /// Arbitrary bytes.
    Byte(Vec<u8>),
    /// Shift-JIS double-byte characters only.
    Kanji(String),
    /// GB2312 double-byte characters only.
    Hanzi(String),
    /// ECI designator switching the charset of following byte segments.
    Eci(u32),
}

impl Segment {
    /// Numeric segment; every character must be a digit.
    pub fn numeric(payload: &str) -> QrResult<Self> {
        numeric::check(payload)?;
        Ok(Segment::Numeric(payload.to_string()))
    }

    /// Alphanumeric segment; every character must be in the 45-char set.
    pub fn alphanumeric(payload: &str) -> QrResult<Self> {
        alphanumeric::check(payload)?;
        Ok(Segment::Alphanumeric(payload.to_string()))
    }

    /// Byte segment; any payload is valid.
    pub fn byte(payload: impl Into<Vec<u8>>) -> Self {
        Segment::Byte(payload.into())
    }

    /// Kanji segment; every character must be a double-byte Shift-JIS one.
    pub fn kanji(payload: &str) -> QrResult<Self> {
        kanji::check(payload)?;
        Ok(Segment::Kanji(payload.to_string()))
    }

    /// Hanzi segment; every character must be a double-byte GB2312 one.
    pub fn hanzi(payload: &str) -> QrResult<Self> {
        hanzi::check(payload)?;
        Ok(Segment::Hanzi(payload.to_string()))
    }

    /// ECI segment for a designator in 0..=999999.
    pub fn eci(designator: u32) -> QrResult<Self> {
        if designator > eci::MAX_DESIGNATOR {
            return Err(QrError::InvalidEciDesignator);
        }
        Ok(Segment::Eci(designator))
    }

    /// Segment for a payload in a caller-chosen mode.
    pub fn with_mode(mode: Mode, payload: &str) -> QrResult<Self> {
        match mode {
            Mode::Numeric => Self::numeric(payload),
            Mode::Alphanumeric => Self::alphanumeric(payload),
            Mode::Byte => Ok(Self::byte(payload.as_bytes())),
            Mode::Kanji => Self::kanji(payload),
            Mode::Hanzi => Self::hanzi(payload),
            Mode::Eci => Err(QrError::InvalidEciDesignator),
        }
    }

    /// The segment's mode.
    pub fn mode(&self) -> Mode {
        match self {
            Segment::Numeric(_) => Mode::Numeric,
            Segment::Alphanumeric(_) => Mode::Alphanumeric,
            Segment::Byte(_) => Mode::Byte,
            Segment::Kanji(_) => Mode::Kanji,
            Segment::Hanzi(_) => Mode::Hanzi,
            Segment::Eci(_) => Mode::Eci,
        }
    }

    /// Value written into the character-count indicator.
    fn char_count(&self) -> usize {
        match self {
            Segment::Numeric(s) | Segment::Alphanumeric(s) => s.chars().count(),
            Segment::Byte(b) => b.len(),
            Segment::Kanji(s) | Segment::Hanzi(s) => s.chars().count(),
            Segment::Eci(_) => 0,
        }
    }

    /// Total bits this segment occupies at a version, header included.
    pub fn bit_len(&self, version: Version) -> usize {
        let mode = self.mode();
        let header = 4 + mode.char_count_bits(version);
        let payload = match self {
            Segment::Numeric(s) => {
                let n = s.chars().count();
                10 * (n / 3) + [0, 4, 7][n % 3]
            }
            Segment::Alphanumeric(s) => {
                let n = s.chars().count();
                11 * (n / 2) + 6 * (n % 2)
            }
            Segment::Byte(b) => 8 * b.len(),
            Segment::Kanji(s) => 13 * s.chars().count(),
            // Subset indicator nibble plus 13 bits per character.
            Segment::Hanzi(s) => 4 + 13 * s.chars().count(),
            Segment::Eci(id) => eci::designator_bit_len(*id),
        };
        header + payload
    }

    /// Serialize the segment: mode indicator, character count, payload.
    ///
    /// The terminator is appended by the orchestrator, never here.
    pub fn write(&self, bits: &mut BitBuffer, version: Version) -> QrResult<()> {
        let mode = self.mode();
        bits.put(mode.indicator(), 4);
        match self {
            Segment::Numeric(s) => {
                bits.put(self.char_count() as u32, mode.char_count_bits(version));
                numeric::encode(s, bits)
            }
            Segment::Alphanumeric(s) => {
                bits.put(self.char_count() as u32, mode.char_count_bits(version));
                alphanumeric::encode(s, bits)
            }
            Segment::Byte(b) => {
                bits.put(self.char_count() as u32, mode.char_count_bits(version));
                byte::encode(b, bits);
                Ok(())
            }
            Segment::Kanji(s) => {
                bits.put(self.char_count() as u32, mode.char_count_bits(version));
                kanji::encode(s, bits)
            }
            Segment::Hanzi(s) => {
                bits.put(hanzi::GB2312_SUBSET, 4);
                bits.put(self.char_count() as u32, mode.char_count_bits(version));
                hanzi::encode(s, bits)
            }
            Segment::Eci(id) => eci::write_designator(*id, bits),
        }
    }
}
