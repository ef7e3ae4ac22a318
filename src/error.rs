//! Error types shared by the encode and decode pipelines.

/// Errors surfaced by encoding, decoding and backend helpers.
///
/// Encoder errors abort the encode with no partial matrix; decoder errors
/// abort the decode with no partial string.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QrError {
    /// Payload exceeds the version-40 capacity at the requested EC level.
    #[error("data overflow: payload does not fit version 40 at the requested EC level")]
    DataOverflow,
    /// Version outside 1..=40.
    #[error("invalid version: {0}")]
    InvalidVersion(u8),
    /// Unrecognized error-correction level.
    #[error("invalid error correction level: {0}")]
    InvalidEccLevel(u8),
    /// Mask pattern index outside 0..=7.
    #[error("invalid mask pattern: {0}")]
    InvalidMaskPattern(u8),
    /// Quiet zone width outside 0..=75.
    #[error("invalid quiet zone size: {0}")]
    InvalidQuietZoneSize(usize),
    /// Character outside the segment mode's alphabet.
    #[error("illegal character for mode {mode}: {what}")]
    IllegalCharacter {
        /// Name of the offending mode.
        mode: &'static str,
        /// The rejected character or byte, formatted for display.
        what: String,
    },
    /// Hanzi subset indicator other than GB2312.
    #[error("invalid hanzi subset indicator: {0:#06b}")]
    InvalidSubset(u8),
    /// A read ran past the end of the bit stream.
    #[error("not enough bits: requested {requested}, available {available}")]
    NotEnoughBits {
        /// Bits requested by the read.
        requested: usize,
        /// Bits left before the write head.
        available: usize,
    },
    /// Unrecognized 4-bit mode indicator in the decoded stream.
    #[error("unknown mode indicator: {0:#06b}")]
    UnknownMode(u8),
    /// ECI designator outside 0..=999999 or a malformed designator prefix.
    #[error("invalid ECI designator")]
    InvalidEciDesignator,
    /// An ECI segment was not immediately followed by a byte segment.
    #[error("ECI followed by invalid mode: {0:#06b}")]
    EciFollowedByInvalidMode(u8),
    /// A codeword block could not be corrected.
    #[error("reed-solomon failure: {0}")]
    ReedSolomonFailure(&'static str),
    /// Data placement attempted to overwrite a function module.
    #[error("matrix invariant violation at ({x}, {y})")]
    MatrixInvariantViolation {
        /// Column of the offending module.
        x: usize,
        /// Row of the offending module.
        y: usize,
    },
    /// A backend file write failed or wrote short.
    #[error("cannot write file {path}: {reason}")]
    CannotWriteFile {
        /// Target path as given by the caller.
        path: String,
        /// Human-readable cause.
        reason: String,
    },
}

/// Result alias used throughout the crate.
pub type QrResult<T> = std::result::Result<T, QrError>;
