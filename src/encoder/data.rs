//! Bitstream assembly: segments to padded, block-split, interleaved
//! codewords.

use crate::error::{QrError, QrResult};
use crate::models::{BitBuffer, EcLevel, QrOptions, Version, VersionSpec};
use crate::modes::Segment;
use crate::reed_solomon::ReedSolomonCoder;
use crate::tables;

/// Alternating pad codewords appended after the terminator.
const PAD_CODEWORDS: [u32; 2] = [0xEC, 0x11];

/// Interleaved data and EC codewords, ready for placement.
#[derive(Debug, Clone)]
pub struct EncodedData {
    /// The version the stream was sized for.
    pub version: Version,
    /// Interleaved codewords filling the symbol's raw capacity.
    pub codewords: Vec<u8>,
}

fn total_bits(segments: &[Segment], version: Version) -> usize {
    segments.iter().map(|s| s.bit_len(version)).sum()
}

/// Smallest version from `min_version` upward that fits the segments, or
/// the fixed version when one was requested.
pub fn choose_version(segments: &[Segment], options: &QrOptions) -> QrResult<Version> {
    let ec_level = options.ec_level();
    match options.version() {
        VersionSpec::Fixed(version) => {
            if total_bits(segments, version) <= tables::data_capacity_bits(version, ec_level) {
                Ok(version)
            } else {
                Err(QrError::DataOverflow)
            }
        }
        VersionSpec::Auto => {
            for v in options.min_version().number()..=Version::MAX.number() {
                let version = Version::new(v)?;
                if total_bits(segments, version) <= tables::data_capacity_bits(version, ec_level) {
                    return Ok(version);
                }
            }
            Err(QrError::DataOverflow)
        }
    }
}

/// Serialize, pad, block-split, RS-encode and interleave the segments.
pub fn encode(segments: &[Segment], options: &QrOptions) -> QrResult<EncodedData> {
    let version = choose_version(segments, options)?;
    let ec_level = options.ec_level();

    let mut bits = BitBuffer::new();
    for segment in segments {
        segment.write(&mut bits, version)?;
    }

    let capacity = tables::data_capacity_bits(version, ec_level);
    debug_assert!(bits.len() <= capacity);

    // Terminator: up to four zero bits, never past capacity.
    let terminator = (capacity - bits.len()).min(4);
    if terminator > 0 {
        bits.put(0, terminator);
    }
    // Pad the last codeword out with zero bits.
    let partial = bits.len() % 8;
    if partial != 0 {
        bits.put(0, 8 - partial);
    }
    // Fill the remaining capacity with alternating pad codewords.
    let mut pad = 0;
    while bits.len() < capacity {
        bits.put(PAD_CODEWORDS[pad], 8);
        pad ^= 1;
    }

    Ok(EncodedData {
        version,
        codewords: interleave(bits.as_bytes(), version, ec_level),
    })
}

/// Split data codewords into blocks (shorter blocks first), RS-encode each
/// and interleave column-wise: all data codewords, then all EC codewords.
///
/// When blocks have unequal length the shorter ones simply have no entry
/// in the trailing columns.
fn interleave(data: &[u8], version: Version, ec_level: EcLevel) -> Vec<u8> {
    let layout = tables::ec_block_layout(version, ec_level);
    debug_assert_eq!(data.len(), layout.data_codewords);

    let mut blocks: Vec<&[u8]> = Vec::with_capacity(layout.num_blocks);
    let mut offset = 0;
    for i in 0..layout.num_blocks {
        let len = if i < layout.num_short {
            layout.short_len
        } else {
            layout.long_len()
        };
        blocks.push(&data[offset..offset + len]);
        offset += len;
    }

    let coder = ReedSolomonCoder::new(layout.ec_per_block);
    let ec_blocks: Vec<Vec<u8>> = blocks.iter().map(|block| coder.encode(block)).collect();

    let total = layout.data_codewords + layout.num_blocks * layout.ec_per_block;
    let mut out = Vec::with_capacity(total);
    for i in 0..layout.long_len() {
        for block in &blocks {
            if let Some(&codeword) = block.get(i) {
                out.push(codeword);
            }
        }
    }
    for i in 0..layout.ec_per_block {
        for ec in &ec_blocks {
            out.push(ec[i]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QrOptions;

    #[test]
    fn test_annex_i_data_codewords() {
        // "01234567" at 1-M: the reference bit stream from ISO/IEC 18004
        // Annex I, including terminator and pad codewords.
        let segments = [Segment::numeric("01234567").unwrap()];
        let options = QrOptions::new()
            .with_version(1)
            .unwrap()
            .with_ec_level(EcLevel::M);
        let version = Version::new(1).unwrap();

        let mut bits = BitBuffer::new();
        segments[0].write(&mut bits, version).unwrap();
        assert_eq!(bits.len(), 41);

        let encoded = encode(&segments, &options).unwrap();
        assert_eq!(encoded.version, version);
        // 16 data + 10 EC codewords, a single block.
        assert_eq!(
            encoded.codewords,
            vec![
                0x10, 0x20, 0x0C, 0x56, 0x61, 0x80, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC,
                0x11, 0xEC, 0x11, 0xA5, 0x24, 0xD4, 0xC1, 0xED, 0x36, 0xC7, 0x87, 0x2C, 0x55,
            ]
        );
    }

    #[test]
    fn test_auto_version_selection() {
        let segments = [Segment::byte(vec![0u8; 20])];
        let options = QrOptions::new().with_ec_level(EcLevel::L);
        // 20 bytes exceed 1-L (17 data bytes usable) and fit 2-L.
        assert_eq!(
            choose_version(&segments, &options).unwrap(),
            Version::new(2).unwrap()
        );
    }

    #[test]
    fn test_min_version_respected() {
        let segments = [Segment::numeric("1").unwrap()];
        let options = QrOptions::new().with_min_version(5).unwrap();
        assert_eq!(
            choose_version(&segments, &options).unwrap(),
            Version::new(5).unwrap()
        );
    }

    #[test]
    fn test_overflow_fixed_version() {
        let segments = [Segment::byte(vec![0u8; 20])];
        let options = QrOptions::new()
            .with_version(1)
            .unwrap()
            .with_ec_level(EcLevel::H);
        assert_eq!(choose_version(&segments, &options), Err(QrError::DataOverflow));
    }

    #[test]
    fn test_overflow_beyond_v40() {
        // 2954 bytes of byte data exceed 40-H (1276 data codewords).
        let segments = [Segment::byte(vec![0xAB; 2954])];
        let options = QrOptions::new().with_ec_level(EcLevel::H);
        assert_eq!(encode(&segments, &options).unwrap_err(), QrError::DataOverflow);
    }

    #[test]
    fn test_interleave_order_multiple_blocks() {
        // 5-Q has 2 blocks of 15 then 2 blocks of 16 data codewords.
        let version = Version::new(5).unwrap();
        let layout = tables::ec_block_layout(version, EcLevel::Q);
        assert_eq!(
            (layout.num_blocks, layout.num_short, layout.short_len),
            (4, 2, 15)
        );
        let data: Vec<u8> = (0..layout.data_codewords as u8).collect();
        let out = interleave(&data, version, EcLevel::Q);
        // First column: the first codeword of each block.
        assert_eq!(out[0], 0);
        assert_eq!(out[1], 15);
        assert_eq!(out[2], 30);
        assert_eq!(out[3], 46);
        // Last data column only has entries from the two long blocks.
        let data_total = layout.data_codewords;
        assert_eq!(out[data_total - 2], 45);
        assert_eq!(out[data_total - 1], 61);
        assert_eq!(out.len(), tables::raw_codewords(version));
    }

    #[test]
    fn test_padding_alternates() {
        let segments = [Segment::numeric("1").unwrap()];
        let options = QrOptions::new()
            .with_version(1)
            .unwrap()
            .with_ec_level(EcLevel::H);
        let encoded = encode(&segments, &options).unwrap();
        // 9 data codewords: header + 1 digit + terminator round to 3 bytes,
        // then EC/11 alternation fills the rest.
        assert_eq!(&encoded.codewords[3..9], &[0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11]);
    }
}
