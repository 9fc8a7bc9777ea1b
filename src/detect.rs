//! Input format detection and PDF payload validation.

use crate::error::{Error, Result};
use std::path::Path;

/// Importable input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Markdown résumé (`.md`, `.markdown`)
    Markdown,
    /// JSON project file (`.json`)
    Project,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Markdown => write!(f, "Markdown"),
            InputFormat::Project => write!(f, "JSON project"),
        }
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Detect the input format from a file extension.
///
/// # Example
/// ```
/// use resumark::detect::{detect_format_from_path, InputFormat};
///
/// let format = detect_format_from_path("resume.md").unwrap();
/// assert_eq!(format, InputFormat::Markdown);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "md" | "markdown" => Ok(InputFormat::Markdown),
        "json" => Ok(InputFormat::Project),
        _ => Err(Error::UnknownFormat(path.display().to_string())),
    }
}

/// Detect the input format from content.
///
/// A leading `{` means a JSON project; any other text is treated as
/// Markdown and left to the importer to accept or reject.
pub fn detect_format_from_str(text: &str) -> InputFormat {
    let trimmed = text.trim_start_matches('\u{feff}').trim_start();
    if trimmed.starts_with('{') {
        InputFormat::Project
    } else {
        InputFormat::Markdown
    }
}

/// PDF version from a payload header (e.g. `"1.7"`), if it is a PDF.
pub fn pdf_version(data: &[u8]) -> Option<String> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return None;
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();
    is_valid_version(&version).then_some(version)
}

/// Check if a version string is valid.
fn is_valid_version(version: &str) -> bool {
    if version.len() != 3 {
        return false;
    }

    let chars: Vec<char> = version.chars().collect();
    chars[0].is_ascii_digit() && chars[1] == '.' && chars[2].is_ascii_digit()
}

/// Check if bytes start with a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    pdf_version(data).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(
            detect_format_from_path("cv.MARKDOWN").unwrap(),
            InputFormat::Markdown
        );
        assert_eq!(
            detect_format_from_path("dir/cv.json").unwrap(),
            InputFormat::Project
        );
        assert!(matches!(
            detect_format_from_path("cv.pdf"),
            Err(Error::UnknownFormat(_))
        ));
        assert!(detect_format_from_path("README").is_err());
    }

    #[test]
    fn test_detect_by_content() {
        assert_eq!(
            detect_format_from_str("  {\"header\": {}}"),
            InputFormat::Project
        );
        assert_eq!(
            detect_format_from_str("\u{feff}{\"header\": {}}"),
            InputFormat::Project
        );
        assert_eq!(
            detect_format_from_str("# A\n## Skills\nRust"),
            InputFormat::Markdown
        );
        assert_eq!(detect_format_from_str("just words"), InputFormat::Markdown);
    }

    #[test]
    fn test_pdf_version() {
        assert_eq!(pdf_version(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3").as_deref(), Some("1.7"));
        assert_eq!(pdf_version(b"%PDF-2.0\n").as_deref(), Some("2.0"));
        assert_eq!(pdf_version(b"%PDF"), None);
    }

    #[test]
    fn test_is_pdf_bytes() {
        assert!(is_pdf_bytes(b"%PDF-1.4\n"));
        assert!(!is_pdf_bytes(b"<!DOCTYPE html>"));
    }

    #[test]
    fn test_version_validation() {
        assert!(is_valid_version("1.0"));
        assert!(is_valid_version("2.0"));
        assert!(!is_valid_version("10.0"));
        assert!(!is_valid_version("abc"));
    }
}
