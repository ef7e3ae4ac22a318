//! BitQR - QR code encoding and decoding core
//!
//! A pure Rust implementation of the ISO/IEC 18004 bit-level pipeline:
//! segment encoding (numeric, alphanumeric, byte, kanji, hanzi, ECI),
//! Reed-Solomon error correction over GF(256), matrix construction with
//! masking, and the full decode path from a tagged module matrix back to
//! the payload string.
//!
//! Rendering and camera-image detection live outside this crate; they talk
//! to the core through [`QrMatrix`], [`output`] and [`luminance`].

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

mod debug;
/// QR code decoding (format extraction, RS correction, segment parsing)
pub mod decoder;
/// QR code encoding (segments, RS codewords, placement, masking)
pub mod encoder;
/// Error types shared by both pipelines
pub mod error;
/// Luminance sources for image front-ends
pub mod luminance;
/// Core data structures (QrMatrix, BitBuffer, QrOptions, metadata types)
pub mod models;
/// Segment modes and their bit-level codecs
pub mod modes;
/// Output backend helpers
pub mod output;
/// Reed-Solomon and GF(256) arithmetic
pub mod reed_solomon;
/// Per-version capacity and layout tables
pub mod tables;

pub use error::{QrError, QrResult};
pub use models::{
    BitBuffer, EcLevel, MaskPattern, Module, ModuleTag, QrCode, QrMatrix, QrOptions, Version,
};
pub use modes::{Mode, Segment};

use models::ModeSpec;

/// Encode a text payload into a finished module matrix.
///
/// With `mode: Auto` the tightest mode covering the payload is used; a
/// fixed mode rejects payloads outside its alphabet.
pub fn encode(payload: &str, options: &QrOptions) -> QrResult<QrMatrix> {
    let segment = match options.mode() {
        ModeSpec::Auto => Segment::with_mode(Mode::detect(payload), payload)?,
        ModeSpec::Fixed(mode) => Segment::with_mode(mode, payload)?,
    };
    encoder::encode_multi(&[segment], options)
}

/// Encode raw bytes as a single byte-mode segment.
pub fn encode_bytes(payload: &[u8], options: &QrOptions) -> QrResult<QrMatrix> {
    encoder::encode_multi(&[Segment::byte(payload)], options)
}

/// Encode an explicit segment list.
pub fn encode_multi(segments: &[Segment], options: &QrOptions) -> QrResult<QrMatrix> {
    encoder::encode_multi(segments, options)
}

/// Decode a module matrix into its payload string.
pub fn decode(matrix: &QrMatrix) -> QrResult<String> {
    decoder::decode_matrix(matrix).map(|qr| qr.content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_reference_symbol() {
        // ISO/IEC 18004 Annex I parameters: "01234567", 1-M, mask 2.
        let options = QrOptions::new()
            .with_version(1)
            .unwrap()
            .with_ec_level(EcLevel::M)
            .with_mask_pattern(2)
            .unwrap()
            .with_quiet_zone(false);
        let matrix = encode("01234567", &options).unwrap();
        assert_eq!(matrix.size(), 21);
        assert!(matrix.get(8, 13).is_dark(), "dark module");
        let qr = decoder::decode_matrix(&matrix).unwrap();
        assert_eq!(qr.content, "01234567");
        assert_eq!(qr.ec_level, EcLevel::M);
        assert_eq!(qr.mask_pattern, MaskPattern::Pattern2);
    }

    #[test]
    fn test_alphanumeric_auto_mask() {
        let options = QrOptions::new().with_ec_level(EcLevel::Q);
        let matrix = encode("HELLO WORLD", &options).unwrap();
        let qr = decoder::decode_matrix(&matrix).unwrap();
        assert_eq!(qr.content, "HELLO WORLD");
        assert_eq!(qr.version.number(), 1);
    }

    #[test]
    fn test_byte_utf8_roundtrip() {
        let payload = "Hello, 世界";
        let matrix = encode_bytes(payload.as_bytes(), &QrOptions::new()).unwrap();
        assert_eq!(decode(&matrix).unwrap(), payload);
    }

    #[test]
    fn test_eci_utf8_roundtrip() {
        let segments = [
            Segment::eci(26).unwrap(),
            Segment::byte("Γειά".as_bytes()),
        ];
        let options = QrOptions::new().with_version(5).unwrap();
        let matrix = encode_multi(&segments, &options).unwrap();
        assert_eq!(decode(&matrix).unwrap(), "Γειά");
    }

    #[test]
    fn test_hanzi_roundtrip_across_versions() {
        let payload = "无可奈何燃花作香";
        for v in [7u8, 15, 30] {
            let options = QrOptions::new().with_version(v).unwrap();
            let matrix = encode_multi(&[Segment::hanzi(payload).unwrap()], &options).unwrap();
            assert_eq!(decode(&matrix).unwrap(), payload, "v{v}");
        }
    }

    #[test]
    fn test_overflow_surfaces() {
        let options = QrOptions::new().with_ec_level(EcLevel::H);
        assert_eq!(
            encode_bytes(&vec![0x42; 2954], &options).unwrap_err(),
            QrError::DataOverflow
        );
    }

    #[test]
    fn test_kanji_roundtrip() {
        let options = QrOptions::new();
        let matrix = encode("日本語テスト", &options).unwrap();
        assert_eq!(decode(&matrix).unwrap(), "日本語テスト");
    }

    #[test]
    fn test_roundtrip_across_levels() {
        let payloads = [
            "12345678901234567890",
            "ALPHANUMERIC TEST $%*+-./:",
            "mixed case bytes åäö",
        ];
        for level in [EcLevel::L, EcLevel::M, EcLevel::Q, EcLevel::H] {
            for payload in payloads {
                let options = QrOptions::new().with_ec_level(level);
                let matrix = encode(payload, &options).unwrap();
                assert_eq!(decode(&matrix).unwrap(), payload, "{level:?} {payload}");
            }
        }
    }

    #[test]
    fn test_large_version_roundtrip() {
        // A version with version-info blocks and many EC blocks.
        let payload = "A".repeat(900);
        let options = QrOptions::new()
            .with_version(20)
            .unwrap()
            .with_ec_level(EcLevel::M);
        let matrix = encode(&payload, &options).unwrap();
        assert_eq!(decode(&matrix).unwrap(), payload);
    }

    #[test]
    fn test_fixed_mode_rejects_foreign_payload() {
        let options = QrOptions::new().with_mode(Mode::Numeric);
        assert!(matches!(
            encode("NOT NUMERIC", &options),
            Err(QrError::IllegalCharacter { .. })
        ));
    }

    #[test]
    fn test_quiet_zone_and_invert_options() {
        let options = QrOptions::new()
            .with_quiet_zone_size(2)
            .unwrap()
            .with_invert_matrix(true);
        let matrix = encode("OPTIONS", &options).unwrap();
        // Inverted output renders the quiet zone dark.
        assert!(matrix.get(0, 0).is_dark());
        assert_eq!(matrix.get(0, 0).tag(), ModuleTag::QuietZone);
        let mut restored = matrix.clone();
        restored.invert();
        assert_eq!(decode(&restored).unwrap(), "OPTIONS");
    }
}
