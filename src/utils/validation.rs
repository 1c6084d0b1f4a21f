// file: src/utils/validation.rs
// description: input validation for documents, paths and batch settings
// reference: input validation patterns

use crate::error::{AnalysisError, Result};
use std::fs;
use std::path::Path;
use tracing::warn;

pub struct Validator;

impl Validator {
    pub fn validate_file_path(path: &Path) -> Result<()> {
        let canonical = fs::canonicalize(path).map_err(|e| {
            AnalysisError::Validation(format!(
                "Cannot canonicalize path {}: {}",
                path.display(),
                e
            ))
        })?;

        if !canonical.is_file() {
            return Err(AnalysisError::Validation(format!(
                "Path is not a file: {}",
                canonical.display()
            )));
        }

        Ok(())
    }

    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(AnalysisError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(AnalysisError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// Checks the normalized length of one document. `label` is "Resume" or
    /// "Job description". Returns the character count.
    pub fn validate_document_text(
        cleaned: &str,
        label: &str,
        min_chars: usize,
        warn_chars: usize,
    ) -> Result<usize> {
        let count = cleaned.chars().count();

        if count < min_chars {
            return Err(AnalysisError::Validation(format!(
                "{} is too short or empty: contains only {} characters, minimum {} required",
                label, count, min_chars
            )));
        }

        if count > warn_chars {
            warn!(
                "{} is very long ({} characters); analysis may be slow",
                label, count
            );
        }

        Ok(count)
    }

    pub fn validate_worker_count(workers: usize) -> Result<()> {
        if workers == 0 {
            return Err(AnalysisError::Validation(
                "Worker count must be greater than 0".to_string(),
            ));
        }

        if workers > 256 {
            return Err(AnalysisError::Validation(
                "Worker count too large (max 256)".to_string(),
            ));
        }

        Ok(())
    }

    /// File-name-safe stem for exported results.
    pub fn sanitize_file_stem(name: &str) -> String {
        let stem: String = name
            .trim()
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        if stem.is_empty() {
            "result".to_string()
        } else {
            stem
        }
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((index, _)) => format!("{}...", &text[..index]),
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_validate_file_path() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("resume.txt");
        fs::write(&file_path, "text").unwrap();

        assert!(Validator::validate_file_path(&file_path).is_ok());
        assert!(Validator::validate_file_path(temp.path()).is_err());
        assert!(Validator::validate_file_path(Path::new("/nonexistent/resume.txt")).is_err());
    }

    #[test]
    fn test_validate_directory() {
        let temp = TempDir::new().unwrap();
        assert!(Validator::validate_directory(temp.path()).is_ok());
        assert!(Validator::validate_directory(Path::new("/nonexistent")).is_err());
    }

    #[test]
    fn test_short_document_is_validation_error() {
        let err = Validator::validate_document_text("too short", "Resume", 50, 50_000).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::ValidationError);
        assert!(err.to_string().contains("Resume is too short or empty"));
        assert!(err.to_string().contains("only 9 characters"));
    }

    #[test]
    fn test_long_document_passes() {
        let text = "a".repeat(120);
        assert_eq!(Validator::validate_document_text(&text, "Job description", 50, 100).unwrap(), 120);
    }

    #[test]
    fn test_validate_worker_count() {
        assert!(Validator::validate_worker_count(4).is_ok());
        assert!(Validator::validate_worker_count(0).is_err());
        assert!(Validator::validate_worker_count(1000).is_err());
    }

    #[test]
    fn test_sanitize_file_stem() {
        assert_eq!(Validator::sanitize_file_stem("jane doe.resume"), "jane_doe_resume");
        assert_eq!(Validator::sanitize_file_stem("  "), "result");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(Validator::truncate_text("short", 10), "short");
        assert_eq!(Validator::truncate_text("this is a very long text", 10), "this is a ...");
        assert_eq!(Validator::truncate_text("résumé écrit", 6), "résumé...");
    }
}
