//! Format information extraction: both copies, demasked and
//! distance-corrected against the 32 valid codewords.

use crate::encoder::format::format_info_bits;
use crate::error::{QrError, QrResult};
use crate::models::{EcLevel, MaskPattern, QrMatrix, ALL_MASK_PATTERNS};

/// Read the format information and recover EC level and mask pattern.
///
/// Each copy is compared against all 32 valid codewords; up to three bit
/// errors per copy are tolerated, matching the BCH(15,5) design distance.
pub fn extract(matrix: &QrMatrix) -> QrResult<(EcLevel, MaskPattern)> {
    let copies = [read_copy_a(matrix), read_copy_b(matrix)];
    let mut best: Option<(u32, EcLevel, MaskPattern)> = None;
    for copy in copies {
        if let Some((dist, level, mask)) = closest_codeword(copy) {
            if best.map_or(true, |(d, _, _)| dist < d) {
                best = Some((dist, level, mask));
            }
        }
    }
    best.map(|(_, level, mask)| (level, mask))
        .ok_or(QrError::ReedSolomonFailure("format information uncorrectable"))
}

fn closest_codeword(bits: u32) -> Option<(u32, EcLevel, MaskPattern)> {
    let mut best: Option<(u32, EcLevel, MaskPattern)> = None;
    for level in [EcLevel::L, EcLevel::M, EcLevel::Q, EcLevel::H] {
        for mask in ALL_MASK_PATTERNS {
            let dist = (format_info_bits(level, mask) ^ bits).count_ones();
            if dist <= 3 && best.map_or(true, |(d, _, _)| dist < d) {
                best = Some((dist, level, mask));
            }
        }
    }
    best
}

// Both readers mirror the writer's bit order: bit 0 lands at (8, 0) in the
// first copy and at (size-1, 8) in the second.

fn read_copy_a(matrix: &QrMatrix) -> u32 {
    let mut bits = 0u32;
    let mut push = |x: usize, y: usize, i: usize| {
        bits |= (matrix.get(x, y).is_dark() as u32) << i;
    };
    for i in 0..6 {
        push(8, i, i);
    }
    push(8, 7, 6);
    push(8, 8, 7);
    push(7, 8, 8);
    for i in 9..15 {
        push(14 - i, 8, i);
    }
    bits
}

fn read_copy_b(matrix: &QrMatrix) -> u32 {
    let size = matrix.size();
    let mut bits = 0u32;
    let mut push = |x: usize, y: usize, i: usize| {
        bits |= (matrix.get(x, y).is_dark() as u32) << i;
    };
    for i in 0..8 {
        push(size - 1 - i, 8, i);
    }
    for i in 8..15 {
        push(8, size - 15 + i, i);
    }
    bits
}
