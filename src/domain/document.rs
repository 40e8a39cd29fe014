//! Uploaded document types.

use std::fmt;
use thiserror::Error;

/// Failures that abort an analysis and are reported to the caller.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Text extraction failed: {0}")]
    ExtractionFailure(String),
}

/// Document formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Parse a format tag such as `pdf` or `DOCX`.
    pub fn from_tag(tag: &str) -> Result<Self, ExtractionError> {
        match tag.trim().to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "txt" => Ok(Self::Txt),
            other => Err(ExtractionError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Txt => "txt",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain text pulled out of a document, already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    text: String,
}

impl ExtractedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of Unicode scalar values.
    pub fn character_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Number of whitespace-delimited tokens.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
