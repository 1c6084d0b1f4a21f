// file: src/error.rs
// description: Custom error types, three-tier error classification and result alias
// reference: https://docs.rs/thiserror

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Analysis failed: {0}")]
    Processing(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Gap validator error: {0}")]
    Validator(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification surfaced to callers of the analysis engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    ParseError,
    ValidationError,
    ProcessingError,
}

impl AnalysisError {
    pub fn error_type(&self) -> ErrorType {
        match self {
            AnalysisError::Parse { .. } => ErrorType::ParseError,
            AnalysisError::Validation(_) => ErrorType::ValidationError,
            _ => ErrorType::ProcessingError,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        AnalysisError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: String,
    pub error_type: ErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorReport {
    pub fn new(error: impl Into<String>, error_type: ErrorType) -> Self {
        Self {
            error: error.into(),
            error_type,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl From<&AnalysisError> for ErrorReport {
    fn from(err: &AnalysisError) -> Self {
        let error_type = err.error_type();
        let details = match error_type {
            ErrorType::ParseError => {
                "File may be corrupted, password-protected, or in an unsupported format."
            }
            ErrorType::ValidationError => "Both documents need at least some readable content.",
            ErrorType::ProcessingError => {
                "An unexpected error occurred during analysis. Please check your files and try again."
            }
        };
        ErrorReport::new(err.to_string(), error_type).with_details(details)
    }
}
