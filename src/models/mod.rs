//! Core data structures for QR code processing
//!
//! This module defines the main types used throughout the library:
//! - BitBuffer: bit stream with a write head and read cursor
//! - QrMatrix: module grid with per-module function tags
//! - QrOptions: validated encoder configuration
//! - Version, EcLevel, MaskPattern: QR code metadata

pub mod bits;
pub mod matrix;
pub mod options;
pub mod qr_code;

pub use bits::BitBuffer;
pub use matrix::{Module, ModuleTag, QrMatrix};
pub use options::{MaskSpec, ModeSpec, QrOptions, VersionSpec};
pub use qr_code::{EcLevel, MaskPattern, QrCode, Version, ALL_MASK_PATTERNS};
