// file: src/parser/loader.rs
// description: document loading boundary for resume and job description files
// reference: format-specific extraction is delegated to implementors

use crate::error::{AnalysisError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Turns a document on disk into plain text.
pub trait DocumentLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<String>;

    fn supports(&self, path: &Path) -> bool;
}

/// Reads plain-text formats. Binary formats are reported as parse failures.
pub struct TextDocumentLoader {
    extensions: Vec<String>,
}

impl TextDocumentLoader {
    pub fn new() -> Self {
        Self::with_extensions(&["txt", "md", "text"])
    }

    pub fn with_extensions<S: AsRef<str>>(extensions: &[S]) -> Self {
        Self {
            extensions: extensions
                .iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }
}

impl Default for TextDocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentLoader for TextDocumentLoader {
    fn supports(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|known| known.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
    }

    fn load(&self, path: &Path) -> Result<String> {
        if !self.supports(path) {
            return Err(AnalysisError::parse(path, "Unsupported file type"));
        }

        let bytes = fs::read(path).map_err(|e| AnalysisError::parse(path, e.to_string()))?;
        let text = String::from_utf8(bytes)
            .map_err(|_| AnalysisError::parse(path, "File is not valid UTF-8 text"))?;

        debug!("Loaded {} ({} chars)", path.display(), text.chars().count());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use tempfile::TempDir;

    #[test]
    fn test_load_text_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("resume.txt");
        fs::write(&path, "Senior Accountant\nManaged AP").unwrap();

        let loader = TextDocumentLoader::new();
        assert_eq!(loader.load(&path).unwrap(), "Senior Accountant\nManaged AP");
    }

    #[test]
    fn test_unsupported_extension_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("resume.pdf");
        fs::write(&path, b"%PDF-1.7").unwrap();

        let err = TextDocumentLoader::new().load(&path).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::ParseError);
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("resume.txt");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x81]).unwrap();

        let err = TextDocumentLoader::new().load(&path).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::ParseError);
    }

    #[test]
    fn test_custom_extensions() {
        let loader = TextDocumentLoader::with_extensions(&[".rst"]);
        assert!(loader.supports(Path::new("cv.RST")));
        assert!(!loader.supports(Path::new("cv.txt")));
    }
}
