//! Per-version constants: codeword capacities, error-correction block
//! layouts and alignment-pattern centers.

use crate::models::{EcLevel, Version};

// Tables from the QR Code specification (Model 2) via Nayuki QR Code generator.
// Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

/// Error-correction block layout for one (version, level) pair.
///
/// Blocks come in at most two sizes; the shorter ones are filled first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcBlockLayout {
    /// Total number of blocks.
    pub num_blocks: usize,
    /// Error-correction codewords appended to every block.
    pub ec_per_block: usize,
    /// Data codewords across all blocks.
    pub data_codewords: usize,
    /// Data codewords in a short block.
    pub short_len: usize,
    /// Number of short blocks (placed first).
    pub num_short: usize,
}

impl EcBlockLayout {
    /// Data codewords in a long block (one more than a short one).
    pub fn long_len(&self) -> usize {
        if self.num_short == self.num_blocks {
            self.short_len
        } else {
            self.short_len + 1
        }
    }
}

/// Total codewords in the symbol, function patterns excluded.
///
/// Derived from the module count rather than tabulated: data modules =
/// all modules minus finder, separator, timing, alignment, format and
/// version areas.
pub fn raw_codewords(version: Version) -> usize {
    let v = version.number() as usize;
    let mut bits = (16 * v + 128) * v + 64;
    if v >= 2 {
        let num_align = v / 7 + 2;
        bits -= (25 * num_align - 10) * num_align - 55;
        if v >= 7 {
            bits -= 36;
        }
    }
    bits / 8
}

/// Block layout for a (version, level) pair.
pub fn ec_block_layout(version: Version, ec_level: EcLevel) -> EcBlockLayout {
    let idx = ec_level.index();
    let v = version.number() as usize;
    let num_blocks = NUM_ERROR_CORRECTION_BLOCKS[idx][v] as usize;
    let ec_per_block = ECC_CODEWORDS_PER_BLOCK[idx][v] as usize;
    let data_codewords = raw_codewords(version) - num_blocks * ec_per_block;
    let short_len = data_codewords / num_blocks;
    let num_long = data_codewords % num_blocks;
    EcBlockLayout {
        num_blocks,
        ec_per_block,
        data_codewords,
        short_len,
        num_short: num_blocks - num_long,
    }
}

/// Data codewords available at a (version, level) pair.
pub fn data_codewords(version: Version, ec_level: EcLevel) -> usize {
    ec_block_layout(version, ec_level).data_codewords
}

/// Data capacity in bits at a (version, level) pair.
pub fn data_capacity_bits(version: Version, ec_level: EcLevel) -> usize {
    data_codewords(version, ec_level) * 8
}

/// Alignment pattern center coordinates for a version, ascending.
///
/// Version 1 has none. Centers are equally spaced between 6 and size-7,
/// rounded to even step width; version 32 is the lone irregular row of the
/// spec table.
pub fn alignment_positions(version: Version) -> Vec<usize> {
    let v = version.number() as usize;
    if v == 1 {
        return Vec::new();
    }
    let num_align = v / 7 + 2;
    let size = version.size();
    let step = if v == 32 {
        26
    } else {
        (v * 4 + num_align * 2 + 1) / (num_align * 2 - 2) * 2
    };
    let mut positions = vec![6];
    let mut pos = size - 7;
    for _ in 1..num_align {
        positions.push(pos);
        pos -= step;
    }
    positions.sort_unstable();
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ver(v: u8) -> Version {
        Version::new(v).unwrap()
    }

    #[test]
    fn test_raw_codewords() {
        assert_eq!(raw_codewords(ver(1)), 26);
        assert_eq!(raw_codewords(ver(2)), 44);
        assert_eq!(raw_codewords(ver(7)), 196);
        assert_eq!(raw_codewords(ver(40)), 3706);
    }

    #[test]
    fn test_data_codewords_known_values() {
        assert_eq!(data_codewords(ver(1), EcLevel::L), 19);
        assert_eq!(data_codewords(ver(1), EcLevel::M), 16);
        assert_eq!(data_codewords(ver(1), EcLevel::Q), 13);
        assert_eq!(data_codewords(ver(1), EcLevel::H), 9);
        assert_eq!(data_codewords(ver(5), EcLevel::Q), 62);
        assert_eq!(data_codewords(ver(40), EcLevel::L), 2956);
        assert_eq!(data_codewords(ver(40), EcLevel::H), 1276);
    }

    #[test]
    fn test_layout_sums_match_capacity() {
        for v in 1..=40 {
            let version = ver(v);
            for level in [EcLevel::L, EcLevel::M, EcLevel::Q, EcLevel::H] {
                let layout = ec_block_layout(version, level);
                let num_long = layout.num_blocks - layout.num_short;
                let total = layout.num_short * layout.short_len + num_long * layout.long_len();
                assert_eq!(total, layout.data_codewords, "v{v} {level:?}");
                assert_eq!(
                    layout.data_codewords + layout.num_blocks * layout.ec_per_block,
                    raw_codewords(version),
                    "v{v} {level:?}"
                );
            }
        }
    }

    #[test]
    fn test_alignment_positions() {
        assert!(alignment_positions(ver(1)).is_empty());
        assert_eq!(alignment_positions(ver(2)), vec![6, 18]);
        assert_eq!(alignment_positions(ver(7)), vec![6, 22, 38]);
        assert_eq!(alignment_positions(ver(32)), vec![6, 34, 60, 86, 112, 138]);
        assert_eq!(
            alignment_positions(ver(36)),
            vec![6, 24, 50, 76, 102, 128, 154]
        );
        assert_eq!(
            alignment_positions(ver(40)),
            vec![6, 30, 58, 86, 114, 142, 170]
        );
    }
}
