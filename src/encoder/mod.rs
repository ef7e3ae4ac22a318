//! Encoding pipeline: segments to a finished, masked module matrix.
//!
//! Stages, in order: version selection, bit-stream assembly with terminator
//! and padding, block split with Reed-Solomon codewords, interleaving,
//! function-pattern placement, zig-zag codeword placement, mask selection,
//! format/version information.

/// Function-pattern and codeword placement.
pub mod builder;
/// Bit-stream assembly, padding, blocking and interleaving.
pub mod data;
/// BCH codewords for format and version information.
pub mod format;
/// Mask predicates scoring and selection.
pub mod mask;

use crate::debug::encode_debug_enabled;
use crate::error::QrResult;
use crate::models::{QrMatrix, QrOptions};
use crate::modes::Segment;

/// Encode a list of segments into a finished matrix.
pub fn encode_multi(segments: &[Segment], options: &QrOptions) -> QrResult<QrMatrix> {
    let encoded = data::encode(segments, options)?;
    if encode_debug_enabled() {
        eprintln!(
            "ENCODE: version={} codewords={}",
            encoded.version.number(),
            encoded.codewords.len()
        );
    }
    let mut matrix = builder::build(
        encoded.version,
        options.ec_level(),
        &encoded.codewords,
        options.mask_pattern(),
    )?;
    if options.add_quiet_zone() {
        matrix.add_quiet_zone(options.quiet_zone_size())?;
    }
    if options.invert_matrix() {
        matrix.invert();
    }
    Ok(matrix)
}
