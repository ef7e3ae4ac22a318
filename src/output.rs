//! Output backend helpers: module-value rendering and file writing.

use std::io::Write;
use std::path::Path;

use crate::error::{QrError, QrResult};
use crate::models::{QrMatrix, QrOptions};

/// Render a matrix as text using the options' per-layer module values.
///
/// Layers without a configured value fall back to `##` for dark and two
/// spaces for light modules, which prints as a scannable block symbol on
/// dark-on-light terminals.
pub fn render_text(matrix: &QrMatrix, options: &QrOptions) -> String {
    let values = options.module_values();
    let mut out = String::new();
    for y in 0..matrix.size() {
        for x in 0..matrix.size() {
            let module = matrix.get(x, y);
            match values.get(&module) {
                Some(value) => out.push_str(value),
                None => out.push_str(if module.is_dark() { "##" } else { "  " }),
            }
        }
        out.push('\n');
    }
    out
}

/// Write backend output to a file.
///
/// Fails with [`QrError::CannotWriteFile`] when the target cannot be
/// created or the write comes up short.
pub fn write_to_file<P: AsRef<Path>>(path: P, bytes: &[u8]) -> QrResult<()> {
    let path = path.as_ref();
    let wrap = |err: std::io::Error| QrError::CannotWriteFile {
        path: path.display().to_string(),
        reason: err.to_string(),
    };
    let mut file = std::fs::File::create(path).map_err(wrap)?;
    file.write_all(bytes).map_err(wrap)?;
    file.flush().map_err(wrap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Module, ModuleTag};

    #[test]
    fn test_render_text_defaults() {
        let options = crate::QrOptions::new().with_quiet_zone(false);
        let matrix = crate::encode("RENDER", &options).unwrap();
        let text = render_text(&matrix, &options);
        assert_eq!(text.lines().count(), matrix.size());
        // Top-left finder corner is dark.
        assert!(text.starts_with("##"));
    }

    #[test]
    fn test_render_text_custom_values() {
        let options = crate::QrOptions::new()
            .with_quiet_zone(false)
            .with_module_value(Module::new(ModuleTag::Finder, true), "F");
        let matrix = crate::encode("RENDER", &options).unwrap();
        let text = render_text(&matrix, &options);
        assert!(text.starts_with('F'));
    }

    #[test]
    fn test_write_to_file_failure() {
        let err = write_to_file("/nonexistent-dir/qr.txt", b"data").unwrap_err();
        assert!(matches!(err, QrError::CannotWriteFile { .. }));
    }

    #[test]
    fn test_write_to_file_roundtrip() {
        let path = std::env::temp_dir().join("bitqr_output_test.txt");
        write_to_file(&path, b"matrix bytes").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"matrix bytes");
        let _ = std::fs::remove_file(&path);
    }
}
