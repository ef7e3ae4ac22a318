//! Decoding pipeline: tagged matrix back to the payload string.
//!
//! Stages, in order: format information (both copies, distance-corrected),
//! version information check (v7+), unmasking, zig-zag bitstream read,
//! block de-interleaving, Reed-Solomon correction, mode-indicator parsing.

/// Codeword extraction in placement order.
pub mod bitstream;
/// Block de-interleaving and RS correction.
pub mod blocks;
/// Format information extraction.
pub mod format;
/// Bit-stream to segment parsing.
pub mod payload;
/// Version information verification.
pub mod version;

use crate::debug::decode_debug_enabled;
use crate::error::QrResult;
use crate::models::{QrCode, QrMatrix};

/// Decode a tagged module matrix into its payload.
///
/// The matrix may carry a quiet zone; version geometry is taken from the
/// matrix itself. Errors abort the decode, no partial string is returned.
pub fn decode_matrix(matrix: &QrMatrix) -> QrResult<QrCode> {
    let content = matrix.without_quiet_zone();
    let symbol_version = content.version();

    let (ec_level, mask_pattern) = format::extract(&content)?;
    version::verify(&content)?;
    if decode_debug_enabled() {
        eprintln!(
            "DECODE: version={} ec={:?} mask={}",
            symbol_version.number(),
            ec_level,
            mask_pattern.index()
        );
    }

    // Masking is an involution, so applying the recovered pattern again
    // exposes the raw codeword bits.
    let mut unmasked = content;
    unmasked.mask(mask_pattern);

    let codewords = bitstream::read_codewords(&unmasked);
    let data = blocks::deinterleave_and_correct(&codewords, symbol_version, ec_level)?;
    let (raw, text) = payload::parse(&data, symbol_version)?;

    Ok(QrCode {
        data: raw,
        content: text,
        version: symbol_version,
        ec_level,
        mask_pattern,
    })
}
