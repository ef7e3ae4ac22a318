//! Function-pattern placement and codeword placement.
//!
//! All placement runs on the content region (no quiet zone) and tags every
//! written module, so the zig-zag data walk can never touch a function
//! module.

use crate::encoder::format::{format_info_bits, version_info_bits};
use crate::encoder::mask;
use crate::error::QrResult;
use crate::models::{BitBuffer, EcLevel, MaskSpec, ModuleTag, QrMatrix};

impl QrMatrix {
    /// Place every function pattern and reserve the format/version areas.
    pub(crate) fn place_function_patterns(&mut self) {
        self.set_finder_patterns();
        self.set_separators();
        self.set_timing_pattern();
        self.set_alignment_patterns();
        self.reserve_format_info();
        self.set_dark_module();
        if self.version().has_version_info() {
            self.set_version_number();
        }
    }

    /// Three 7x7 finder patterns in the top-left, top-right and
    /// bottom-left corners.
    pub fn set_finder_patterns(&mut self) {
        let size = self.size();
        for (ox, oy) in [(0, 0), (size - 7, 0), (0, size - 7)] {
            for dy in 0..7 {
                for dx in 0..7 {
                    let dark = dx == 0
                        || dx == 6
                        || dy == 0
                        || dy == 6
                        || ((2..=4).contains(&dx) && (2..=4).contains(&dy));
                    self.set_function(ox + dx, oy + dy, ModuleTag::Finder, dark);
                }
            }
        }
    }

    /// One-module light border along the inner sides of each finder.
    pub fn set_separators(&mut self) {
        let size = self.size();
        for i in 0..8 {
            // Top-left finder.
            self.set_function(i, 7, ModuleTag::Separator, false);
            self.set_function(7, i, ModuleTag::Separator, false);
            // Top-right finder.
            self.set_function(size - 1 - i, 7, ModuleTag::Separator, false);
            self.set_function(size - 8, i, ModuleTag::Separator, false);
            // Bottom-left finder.
            self.set_function(i, size - 8, ModuleTag::Separator, false);
            self.set_function(7, size - 1 - i, ModuleTag::Separator, false);
        }
    }

    /// Alternating timing sequences in row 6 and column 6, dark on even
    /// coordinates.
    pub fn set_timing_pattern(&mut self) {
        let size = self.size();
        for i in 8..size - 8 {
            self.set_function(i, 6, ModuleTag::Timing, i % 2 == 0);
            self.set_function(6, i, ModuleTag::Timing, i % 2 == 0);
        }
    }

    /// 5x5 alignment patterns at the tabulated centers, skipping the three
    /// finder corners.
    pub fn set_alignment_patterns(&mut self) {
        let positions = crate::tables::alignment_positions(self.version());
        if positions.is_empty() {
            return;
        }
        let first = positions[0];
        let last = *positions.last().unwrap();
        for &cy in &positions {
            for &cx in &positions {
                let in_finder = (cx == first && cy == first)
                    || (cx == last && cy == first)
                    || (cx == first && cy == last);
                if in_finder {
                    continue;
                }
                for dy in 0..5usize {
                    for dx in 0..5usize {
                        let dark = dx == 0
                            || dx == 4
                            || dy == 0
                            || dy == 4
                            || (dx == 2 && dy == 2);
                        self.set_function(cx + dx - 2, cy + dy - 2, ModuleTag::Alignment, dark);
                    }
                }
            }
        }
    }

    /// The always-dark module at (8, 4 * version + 9).
    pub fn set_dark_module(&mut self) {
        let y = 4 * self.version().number() as usize + 9;
        self.set_function(8, y, ModuleTag::DarkModule, true);
    }

    /// Tag both format-information areas so data placement skips them.
    /// The actual bits are written once the mask pattern is known.
    fn reserve_format_info(&mut self) {
        self.write_format_modules(|_| false);
    }

    /// Write both copies of the 15-bit format codeword for an EC level and
    /// mask pattern.
    pub fn set_format_info(&mut self, ec_level: EcLevel, mask: crate::models::MaskPattern) {
        let bits = format_info_bits(ec_level, mask);
        self.write_format_modules(|i| (bits >> i) & 1 == 1);
    }

    fn write_format_modules(&mut self, bit: impl Fn(usize) -> bool) {
        let size = self.size();
        // First copy around the top-left finder, bit 0 at (8, 0).
        for i in 0..6 {
            self.set_function(8, i, ModuleTag::Format, bit(i));
        }
        self.set_function(8, 7, ModuleTag::Format, bit(6));
        self.set_function(8, 8, ModuleTag::Format, bit(7));
        self.set_function(7, 8, ModuleTag::Format, bit(8));
        for i in 9..15 {
            self.set_function(14 - i, 8, ModuleTag::Format, bit(i));
        }
        // Second copy split across the other two finders.
        for i in 0..8 {
            self.set_function(size - 1 - i, 8, ModuleTag::Format, bit(i));
        }
        for i in 8..15 {
            self.set_function(8, size - 15 + i, ModuleTag::Format, bit(i));
        }
    }

    /// Write both copies of the 18-bit version codeword (versions 7+):
    /// a 3x6 block beside the top-right finder and its transpose above the
    /// bottom-left finder.
    pub fn set_version_number(&mut self) {
        let size = self.size();
        let bits = version_info_bits(self.version());
        for i in 0..18 {
            let dark = (bits >> i) & 1 == 1;
            let a = size - 11 + i % 3;
            let b = i / 3;
            self.set_function(a, b, ModuleTag::Version, dark);
            self.set_function(b, a, ModuleTag::Version, dark);
        }
    }

    /// Place the interleaved codewords in zig-zag order, MSB first.
    ///
    /// Remainder modules past the last codeword stay light.
    pub fn write_codewords(&mut self, bits: &BitBuffer) -> QrResult<()> {
        let total = bits.len();
        let bytes = bits.as_bytes();
        for (i, (x, y)) in self.data_positions().into_iter().enumerate() {
            let dark = i < total && (bytes[i / 8] >> (7 - i % 8)) & 1 == 1;
            self.set_data(x, y, dark)?;
        }
        Ok(())
    }
}

/// Build the finished symbol for already-interleaved codewords.
pub fn build(
    version: crate::models::Version,
    ec_level: EcLevel,
    codewords: &[u8],
    mask_spec: MaskSpec,
) -> QrResult<QrMatrix> {
    let mut matrix = QrMatrix::new(version);
    matrix.place_function_patterns();
    matrix.write_codewords(&BitBuffer::from_bytes(codewords))?;
    Ok(mask::apply_best_mask(matrix, ec_level, mask_spec))
}
