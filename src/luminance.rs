//! Luminance sources for decoder front-ends.
//!
//! A [`LuminanceSource`] hands row-major grayscale pixels to whatever
//! resolves symbol geometry; this crate only defines the capability plus
//! file- and blob-backed implementations and a global binarization helper.

use std::path::Path;

use crate::models::QrMatrix;

/// Row-major 8-bit luminance provider (0 = black, 255 = white).
pub trait LuminanceSource {
    /// Width in pixels.
    fn width(&self) -> usize;
    /// Height in pixels.
    fn height(&self) -> usize;
    /// One row of luminance values.
    fn row(&self, y: usize) -> &[u8];
    /// The full row-major luminance plane.
    fn matrix(&self) -> &[u8];
}

/// In-memory luminance source.
#[derive(Debug, Clone)]
pub struct BlobLuminanceSource {
    gray: Vec<u8>,
    width: usize,
    height: usize,
}

impl BlobLuminanceSource {
    /// Wrap an existing grayscale plane.
    pub fn from_gray(gray: Vec<u8>, width: usize, height: usize) -> Self {
        debug_assert_eq!(gray.len(), width * height);
        Self { gray, width, height }
    }

    /// Convert packed RGB bytes (3 per pixel) to luminance with the usual
    /// integer weights: Y = (76*R + 150*G + 29*B) >> 8.
    pub fn from_rgb(rgb: &[u8], width: usize, height: usize) -> Self {
        let gray = rgb
            .chunks_exact(3)
            .map(|px| ((76 * px[0] as u32 + 150 * px[1] as u32 + 29 * px[2] as u32) >> 8) as u8)
            .collect();
        Self::from_gray(gray, width, height)
    }
}

impl LuminanceSource for BlobLuminanceSource {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn row(&self, y: usize) -> &[u8] {
        &self.gray[y * self.width..(y + 1) * self.width]
    }

    fn matrix(&self) -> &[u8] {
        &self.gray
    }
}

/// Luminance source backed by an image file.
#[derive(Debug, Clone)]
pub struct FileLuminanceSource {
    blob: BlobLuminanceSource,
}

impl FileLuminanceSource {
    /// Load and convert an image file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let img = image::open(path)?.to_luma8();
        let (width, height) = img.dimensions();
        Ok(Self {
            blob: BlobLuminanceSource::from_gray(
                img.into_raw(),
                width as usize,
                height as usize,
            ),
        })
    }
}

impl LuminanceSource for FileLuminanceSource {
    fn width(&self) -> usize {
        self.blob.width()
    }

    fn height(&self) -> usize {
        self.blob.height()
    }

    fn row(&self, y: usize) -> &[u8] {
        self.blob.row(y)
    }

    fn matrix(&self) -> &[u8] {
        self.blob.matrix()
    }
}

/// Binarize a source with Otsu's global threshold (true = dark).
pub fn binarize(source: &impl LuminanceSource) -> Vec<Vec<bool>> {
    let pixels = source.matrix();
    let mut histogram = [0usize; 256];
    for &px in pixels {
        histogram[px as usize] += 1;
    }

    let total = pixels.len();
    let sum: u64 = histogram
        .iter()
        .enumerate()
        .map(|(v, &count)| v as u64 * count as u64)
        .sum();

    let mut sum_back = 0u64;
    let mut weight_back = 0usize;
    let mut best_threshold = 127u8;
    let mut best_variance = 0.0f64;
    for t in 0..256 {
        weight_back += histogram[t];
        if weight_back == 0 {
            continue;
        }
        let weight_fore = total - weight_back;
        if weight_fore == 0 {
            break;
        }
        sum_back += t as u64 * histogram[t] as u64;
        let mean_back = sum_back as f64 / weight_back as f64;
        let mean_fore = (sum - sum_back) as f64 / weight_fore as f64;
        let variance =
            weight_back as f64 * weight_fore as f64 * (mean_back - mean_fore).powi(2);
        if variance > best_variance {
            best_variance = variance;
            best_threshold = t as u8;
        }
    }

    (0..source.height())
        .map(|y| source.row(y).iter().map(|&px| px <= best_threshold).collect())
        .collect()
}

/// Binarize a source that maps one pixel per module and build the tagged
/// matrix for it. The side length must be a valid symbol size.
pub fn to_matrix(source: &impl LuminanceSource) -> crate::error::QrResult<QrMatrix> {
    let grid = binarize(source);
    let version = crate::models::Version::from_size(grid.len())?;
    QrMatrix::from_bools(version, &grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_rows() {
        let source = BlobLuminanceSource::from_gray(vec![0, 64, 128, 255], 2, 2);
        assert_eq!(source.width(), 2);
        assert_eq!(source.height(), 2);
        assert_eq!(source.row(0), &[0, 64]);
        assert_eq!(source.row(1), &[128, 255]);
        assert_eq!(source.matrix().len(), 4);
    }

    #[test]
    fn test_rgb_conversion() {
        let source = BlobLuminanceSource::from_rgb(&[255, 255, 255, 0, 0, 0], 2, 1);
        assert!(source.row(0)[0] > 240);
        assert_eq!(source.row(0)[1], 0);
    }

    #[test]
    fn test_binarize_bimodal() {
        let mut gray = vec![30u8; 8];
        gray.extend(vec![220u8; 8]);
        let source = BlobLuminanceSource::from_gray(gray, 4, 4);
        let grid = binarize(&source);
        assert!(grid[0].iter().all(|&dark| dark));
        assert!(grid[3].iter().all(|&dark| !dark));
    }

    #[test]
    fn test_encode_render_rescan_roundtrip() {
        // Render an encoded symbol to a 1:1 luminance plane and scan it back.
        let options = crate::QrOptions::new().with_quiet_zone(false);
        let matrix = crate::encode("LUMINANCE", &options).unwrap();
        let size = matrix.size();
        let mut gray = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                gray.push(if matrix.get(x, y).is_dark() { 10 } else { 245 });
            }
        }
        let source = BlobLuminanceSource::from_gray(gray, size, size);
        let rescanned = to_matrix(&source).unwrap();
        assert_eq!(crate::decode(&rescanned).unwrap(), "LUMINANCE");
    }
}
