//! Version information checks for symbols of version 7 and up.

use crate::encoder::format::version_info_bits;
use crate::error::{QrError, QrResult};
use crate::models::{QrMatrix, Version};

/// Verify the version information against the geometric version.
///
/// Versions 1-6 carry none and pass trivially. For larger symbols both
/// copies are read and distance-corrected (up to three bit errors); a
/// corrected value disagreeing with the geometry is rejected.
pub fn verify(matrix: &QrMatrix) -> QrResult<()> {
    let geometric = matrix.version();
    if !geometric.has_version_info() {
        return Ok(());
    }
    let copies = [read_top_right(matrix), read_bottom_left(matrix)];
    let mut best: Option<(u32, u8)> = None;
    for copy in copies {
        if let Some((dist, v)) = closest_version(copy) {
            if best.map_or(true, |(d, _)| dist < d) {
                best = Some((dist, v));
            }
        }
    }
    match best {
        Some((_, v)) if v == geometric.number() => Ok(()),
        Some((_, v)) => Err(QrError::InvalidVersion(v)),
        None => Err(QrError::InvalidVersion(geometric.number())),
    }
}

fn closest_version(bits: u32) -> Option<(u32, u8)> {
    let mut best: Option<(u32, u8)> = None;
    for v in 7..=40u8 {
        let codeword = version_info_bits(Version::new(v).expect("version in range"));
        let dist = (codeword ^ bits).count_ones();
        if dist <= 3 && best.map_or(true, |(d, _)| dist < d) {
            best = Some((dist, v));
        }
    }
    best
}

// Readers mirror the writer: bit i of the codeword sits at
// (size-11 + i%3, i/3) and its transpose.

fn read_top_right(matrix: &QrMatrix) -> u32 {
    let size = matrix.size();
    let mut bits = 0u32;
    for i in 0..18 {
        let x = size - 11 + i % 3;
        let y = i / 3;
        bits |= (matrix.get(x, y).is_dark() as u32) << i;
    }
    bits
}

fn read_bottom_left(matrix: &QrMatrix) -> u32 {
    let size = matrix.size();
    let mut bits = 0u32;
    for i in 0..18 {
        let x = i / 3;
        let y = size - 11 + i % 3;
        bits |= (matrix.get(x, y).is_dark() as u32) << i;
    }
    bits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(v: u8) -> QrMatrix {
        let mut matrix = QrMatrix::new(Version::new(v).unwrap());
        matrix.place_function_patterns();
        matrix
    }

    #[test]
    fn test_small_versions_pass() {
        assert!(verify(&symbol(1)).is_ok());
        assert!(verify(&symbol(6)).is_ok());
    }

    #[test]
    fn test_verify_all_large_versions() {
        for v in 7..=40 {
            assert!(verify(&symbol(v)).is_ok(), "v{v}");
        }
    }

    #[test]
    fn test_verify_with_bit_errors() {
        let mut matrix = symbol(12);
        let size = matrix.size();
        // Three errors in the top-right copy.
        for (x, y) in [(size - 11, 0), (size - 10, 1), (size - 9, 2)] {
            let m = matrix.get(x, y);
            matrix.set(x, y, m.toggled());
        }
        assert!(verify(&matrix).is_ok());
    }

    #[test]
    fn test_mismatched_version_rejected() {
        let mut matrix = symbol(7);
        // Overwrite both copies with version 8's codeword.
        let bits = version_info_bits(Version::new(8).unwrap());
        let size = matrix.size();
        for i in 0..18 {
            let dark = (bits >> i) & 1 == 1;
            matrix.set_function(
                size - 11 + i % 3,
                i / 3,
                crate::models::ModuleTag::Version,
                dark,
            );
            matrix.set_function(
                i / 3,
                size - 11 + i % 3,
                crate::models::ModuleTag::Version,
                dark,
            );
        }
        assert_eq!(verify(&matrix), Err(QrError::InvalidVersion(8)));
    }
}
