//! Analysis results and the JSON shapes returned to clients.

use serde::{Deserialize, Serialize};

/// Raw outcome of asking the completion service for an analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisReply {
    Completed(String),
    /// No credential configured, or the call failed.
    Unavailable,
}

/// Structured analysis of a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub key_points: Vec<String>,
    pub document_type: String,
    pub risks_concerns: Vec<String>,
    pub recommendations: Vec<String>,
    pub full_analysis: String,
}

/// What the pipeline produced for a readable document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Analyzed {
        character_count: usize,
        word_count: usize,
        result: AnalysisResult,
    },
    /// Extraction succeeded but found nothing but whitespace.
    EmptyDocument,
}

pub const EMPTY_DOCUMENT_MESSAGE: &str =
    "Document appears to be empty or text could not be extracted";

/// Response body describing one analysed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentReport {
    Analyzed {
        text_length: usize,
        word_count: usize,
        analysis: AnalysisResult,
        success: bool,
    },
    Empty {
        error: String,
    },
}

impl From<AnalysisOutcome> for DocumentReport {
    fn from(outcome: AnalysisOutcome) -> Self {
        match outcome {
            AnalysisOutcome::Analyzed {
                character_count,
                word_count,
                result,
            } => Self::Analyzed {
                text_length: character_count,
                word_count,
                analysis: result,
                success: true,
            },
            AnalysisOutcome::EmptyDocument => Self::Empty {
                error: EMPTY_DOCUMENT_MESSAGE.to_string(),
            },
        }
    }
}

/// Response for `POST /api/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub filename: String,
    pub analysis: DocumentReport,
}
