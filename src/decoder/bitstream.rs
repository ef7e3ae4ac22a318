//! Codeword extraction: the encoder's zig-zag walk, read back.

use crate::models::QrMatrix;
use crate::tables;

/// Read the data modules of an unmasked matrix in placement order and
/// reassemble the interleaved codeword stream.
///
/// Remainder bits past the last whole codeword are discarded.
pub fn read_codewords(matrix: &QrMatrix) -> Vec<u8> {
    let positions = matrix.data_positions();
    let mut codewords = Vec::with_capacity(positions.len() / 8);
    let mut byte = 0u8;
    let mut filled = 0;
    for (x, y) in positions {
        byte = (byte << 1) | matrix.get(x, y).is_dark() as u8;
        filled += 1;
        if filled == 8 {
            codewords.push(byte);
            byte = 0;
            filled = 0;
        }
    }
    codewords.truncate(tables::raw_codewords(matrix.version()));
    codewords
}
