use crate::error::{QrError, QrResult};

/// QR Code version (1-40, Model 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    /// Smallest symbol version.
    pub const MIN: Version = Version(1);
    /// Largest symbol version.
    pub const MAX: Version = Version(40);

    /// Validate and wrap a version number.
    pub fn new(version: u8) -> QrResult<Self> {
        if (1..=40).contains(&version) {
            Ok(Version(version))
        } else {
            Err(QrError::InvalidVersion(version))
        }
    }

    /// Get the version number (1-40)
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Get the size in modules (width = height = 17 + 4 * version)
    pub fn size(&self) -> usize {
        17 + 4 * self.0 as usize
    }

    /// Derive the version from a symbol side length, if it is a valid one.
    pub fn from_size(size: usize) -> QrResult<Self> {
        if (21..=177).contains(&size) && (size - 17) % 4 == 0 {
            Ok(Version(((size - 17) / 4) as u8))
        } else {
            Err(QrError::InvalidVersion((size.min(255)) as u8))
        }
    }

    /// Versions 7 and above carry two copies of the version information.
    pub fn has_version_info(&self) -> bool {
        self.0 >= 7
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EcLevel {
    /// Low (~7% recovery capacity)
    L,
    /// Medium (~15% recovery capacity)
    M,
    /// Quartile (~25% recovery capacity)
    Q,
    /// High (~30% recovery capacity)
    H,
}

impl EcLevel {
    /// Index into the capacity tables (L=0, M=1, Q=2, H=3).
    pub fn index(&self) -> usize {
        match self {
            EcLevel::L => 0,
            EcLevel::M => 1,
            EcLevel::Q => 2,
            EcLevel::H => 3,
        }
    }

    /// The two-bit codepoint carried in the format information
    /// (L=01, M=00, Q=11, H=10).
    pub fn format_bits(&self) -> u32 {
        match self {
            EcLevel::L => 0b01,
            EcLevel::M => 0b00,
            EcLevel::Q => 0b11,
            EcLevel::H => 0b10,
        }
    }

    /// Recover the level from its format-information codepoint.
    pub fn from_format_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b01 => EcLevel::L,
            0b00 => EcLevel::M,
            0b11 => EcLevel::Q,
            _ => EcLevel::H,
        }
    }

    /// Parse a user-facing level letter.
    pub fn from_letter(letter: char) -> QrResult<Self> {
        match letter.to_ascii_uppercase() {
            'L' => Ok(EcLevel::L),
            'M' => Ok(EcLevel::M),
            'Q' => Ok(EcLevel::Q),
            'H' => Ok(EcLevel::H),
            other => Err(QrError::InvalidEccLevel(other as u8)),
        }
    }
}

/// Mask pattern (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaskPattern {
    /// (y + x) % 2 == 0
    Pattern0,
    /// y % 2 == 0
    Pattern1,
    /// x % 3 == 0
    Pattern2,
    /// (y + x) % 3 == 0
    Pattern3,
    /// (y/2 + x/3) % 2 == 0
    Pattern4,
    /// (y*x)%2 + (y*x)%3 == 0
    Pattern5,
    /// ((y*x)%2 + (y*x)%3) % 2 == 0
    Pattern6,
    /// ((y+x)%2 + (y*x)%3) % 2 == 0
    Pattern7,
}

/// All eight patterns in index order, for mask evaluation.
pub const ALL_MASK_PATTERNS: [MaskPattern; 8] = [
    MaskPattern::Pattern0,
    MaskPattern::Pattern1,
    MaskPattern::Pattern2,
    MaskPattern::Pattern3,
    MaskPattern::Pattern4,
    MaskPattern::Pattern5,
    MaskPattern::Pattern6,
    MaskPattern::Pattern7,
];

impl MaskPattern {
    /// Get mask pattern from its index.
    pub fn from_index(index: u8) -> QrResult<Self> {
        ALL_MASK_PATTERNS
            .get(index as usize)
            .copied()
            .ok_or(QrError::InvalidMaskPattern(index))
    }

    /// The three-bit index carried in the format information.
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Check if the module at row `y`, column `x` is flipped by this mask.
    pub fn is_masked(&self, y: usize, x: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (y + x) % 2 == 0,
            MaskPattern::Pattern1 => y % 2 == 0,
            MaskPattern::Pattern2 => x % 3 == 0,
            MaskPattern::Pattern3 => (y + x) % 3 == 0,
            MaskPattern::Pattern4 => (y / 2 + x / 3) % 2 == 0,
            MaskPattern::Pattern5 => (y * x) % 2 + (y * x) % 3 == 0,
            MaskPattern::Pattern6 => ((y * x) % 2 + (y * x) % 3) % 2 == 0,
            MaskPattern::Pattern7 => ((y + x) % 2 + (y * x) % 3) % 2 == 0,
        }
    }
}

/// Decoded QR code
#[derive(Debug, Clone)]
pub struct QrCode {
    /// Raw decoded bytes, before charset interpretation
    pub data: Vec<u8>,
    /// Decoded content as a string
    pub content: String,
    /// QR code version
    pub version: Version,
    /// Error correction level
    pub ec_level: EcLevel,
    /// Mask pattern that was applied
    pub mask_pattern: MaskPattern,
}
