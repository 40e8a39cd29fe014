//! Turning a free-text model reply into an [`AnalysisResult`].
//!
//! The reply is expected to follow the section headings requested by the
//! prompt, but nothing enforces that. [`KeywordPartitioner`] scrapes the
//! sections out with plain substring checks and falls back to fixed
//! placeholders for anything it cannot find. Callers only see the
//! [`ReplyPartitioner`] trait.

use crate::domain::{AnalysisReply, AnalysisResult, ExtractedText};
use crate::services::classifier;

pub const SUMMARY_PLACEHOLDER: &str = "Summary not available";

pub const MAX_KEY_POINTS: usize = 5;
pub const MAX_RISKS: usize = 3;
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Stand-in for `full_analysis` when no model reply was available.
pub const MOCK_FULL_ANALYSIS: &str =
    "Mock analysis - Please configure OpenAI API key for detailed legal document analysis.";

/// Builds the structured result for one analysis call.
pub trait ReplyPartitioner: Send + Sync {
    fn partition(&self, reply: &AnalysisReply, extracted: &ExtractedText) -> AnalysisResult;
}

/// Section scraping by heading keywords.
///
/// Each section is an independent pass over the reply lines, so a malformed
/// reply can land the same line in more than one section.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordPartitioner;

impl ReplyPartitioner for KeywordPartitioner {
    fn partition(&self, reply: &AnalysisReply, extracted: &ExtractedText) -> AnalysisResult {
        let text = match reply {
            AnalysisReply::Completed(text) => text,
            AnalysisReply::Unavailable => return mock_analysis(extracted),
        };

        let lines: Vec<&str> = text.split('\n').collect();

        AnalysisResult {
            summary: summary(&lines),
            key_points: section(
                &lines,
                |upper| upper.contains("KEY POINTS"),
                &["RISKS", "RECOMMENDATIONS", "DOCUMENT TYPE"],
                MAX_KEY_POINTS,
            ),
            document_type: classifier::classify(extracted).to_string(),
            risks_concerns: section(
                &lines,
                |upper| upper.contains("RISKS") || upper.contains("CONCERNS"),
                &["RECOMMENDATIONS", "SUMMARY"],
                MAX_RISKS,
            ),
            recommendations: section(
                &lines,
                |upper| upper.contains("RECOMMENDATIONS"),
                &[],
                MAX_RECOMMENDATIONS,
            ),
            full_analysis: text.clone(),
        }
    }
}

/// The fixed result used when the completion service is unavailable.
///
/// Only `document_type` depends on the input.
pub fn mock_analysis(extracted: &ExtractedText) -> AnalysisResult {
    AnalysisResult {
        summary: "Legal document analysis - OpenAI API not configured. This is a sample analysis."
            .to_string(),
        key_points: vec![
            "Document contains legal terminology".to_string(),
            "Multiple clauses and provisions identified".to_string(),
            "Requires professional legal review".to_string(),
        ],
        document_type: classifier::classify(extracted).to_string(),
        risks_concerns: vec![
            "Unable to perform detailed risk analysis without AI".to_string(),
            "Professional legal review recommended".to_string(),
        ],
        recommendations: vec![
            "Configure OpenAI API for detailed analysis".to_string(),
            "Consult with a qualified attorney".to_string(),
            "Review all terms carefully".to_string(),
        ],
        full_analysis: MOCK_FULL_ANALYSIS.to_string(),
    }
}

/// The line right after the first line mentioning SUMMARY, verbatim.
fn summary(lines: &[&str]) -> String {
    lines
        .iter()
        .position(|line| line.to_uppercase().contains("SUMMARY"))
        .and_then(|idx| lines.get(idx + 1))
        .map(|line| line.to_string())
        .unwrap_or_else(|| SUMMARY_PLACEHOLDER.to_string())
}

/// Non-blank lines after a heading matched by `opens`, up to the first line
/// starting with one of `stops`.
///
/// Heading lines are never captured themselves; a repeated heading inside
/// the section is skipped. Stop prefixes are case-sensitive.
fn section(
    lines: &[&str],
    opens: impl Fn(&str) -> bool,
    stops: &[&str],
    limit: usize,
) -> Vec<String> {
    let mut items = Vec::new();
    let mut inside = false;

    for line in lines {
        if opens(&line.to_uppercase()) {
            inside = true;
            continue;
        }
        if !inside {
            continue;
        }
        if stops.iter().any(|stop| line.starts_with(stop)) {
            break;
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            items.push(trimmed.to_string());
        }
    }

    items.truncate(limit);
    items
}
