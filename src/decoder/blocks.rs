//! Block de-interleaving and Reed-Solomon correction.

use crate::error::{QrError, QrResult};
use crate::models::{EcLevel, Version};
use crate::reed_solomon::ReedSolomonDecoder;
use crate::tables;

/// Undo the encoder's column-wise interleave, correct every block and
/// return the concatenated data codewords.
pub fn deinterleave_and_correct(
    codewords: &[u8],
    version: Version,
    ec_level: EcLevel,
) -> QrResult<Vec<u8>> {
    let layout = tables::ec_block_layout(version, ec_level);
    let total = layout.data_codewords + layout.num_blocks * layout.ec_per_block;
    if codewords.len() < total {
        return Err(QrError::NotEnoughBits {
            requested: total * 8,
            available: codewords.len() * 8,
        });
    }

    let block_len = |b: usize| {
        if b < layout.num_short {
            layout.short_len
        } else {
            layout.long_len()
        }
    };

    let mut blocks: Vec<Vec<u8>> = (0..layout.num_blocks)
        .map(|b| Vec::with_capacity(block_len(b) + layout.ec_per_block))
        .collect();

    let mut idx = 0;
    for i in 0..layout.long_len() {
        for (b, block) in blocks.iter_mut().enumerate() {
            if i < block_len(b) {
                block.push(codewords[idx]);
                idx += 1;
            }
        }
    }
    for _ in 0..layout.ec_per_block {
        for block in blocks.iter_mut() {
            block.push(codewords[idx]);
            idx += 1;
        }
    }

    let decoder = ReedSolomonDecoder::new(layout.ec_per_block);
    let mut data = Vec::with_capacity(layout.data_codewords);
    for (b, block) in blocks.iter_mut().enumerate() {
        decoder.decode(block)?;
        data.extend_from_slice(&block[..block_len(b)]);
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::data;
    use crate::models::QrOptions;
    use crate::modes::Segment;

    fn encoded(payload: &[u8], v: u8, level: EcLevel) -> (Vec<u8>, Version) {
        let options = QrOptions::new()
            .with_version(v)
            .unwrap()
            .with_ec_level(level);
        let out = data::encode(&[Segment::byte(payload)], &options).unwrap();
        (out.codewords, out.version)
    }

    #[test]
    fn test_roundtrip_single_block() {
        let (codewords, version) = encoded(b"single block", 1, EcLevel::M);
        let data = deinterleave_and_correct(&codewords, version, EcLevel::M).unwrap();
        // Data codewords lead with the byte-mode header.
        assert_eq!(data.len(), 16);
        assert_eq!(data[0], 0b0100_0000 | (12 >> 4));
    }

    #[test]
    fn test_roundtrip_multi_block_with_errors() {
        let payload: Vec<u8> = (0..60).collect();
        let (mut codewords, version) = encoded(&payload, 5, EcLevel::Q);
        // 5-Q has four blocks with 18 EC codewords each; scatter errors
        // below every block's correction limit.
        for i in [0, 7, 19, 33, 54, 70, 91, 120] {
            codewords[i] ^= 0x5A;
        }
        let corrected = deinterleave_and_correct(&codewords, version, EcLevel::Q).unwrap();
        let clean = deinterleave_and_correct(&encoded(&payload, 5, EcLevel::Q).0, version, EcLevel::Q)
            .unwrap();
        assert_eq!(corrected, clean);
    }

    #[test]
    fn test_uncorrectable_block() {
        let (mut codewords, version) = encoded(b"doomed", 1, EcLevel::L);
        // 1-L corrects at most 3 codewords; destroy 6.
        for byte in codewords.iter_mut().take(6) {
            *byte ^= 0xFF;
        }
        assert!(matches!(
            deinterleave_and_correct(&codewords, version, EcLevel::L),
            Err(QrError::ReedSolomonFailure(_))
        ));
    }

    #[test]
    fn test_short_input_rejected() {
        let version = Version::new(1).unwrap();
        assert!(deinterleave_and_correct(&[0u8; 10], version, EcLevel::L).is_err());
    }
}
