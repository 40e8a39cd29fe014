//! The document analysis pipeline.
//!
//! extract -> build prompt -> request analysis -> partition. Only extraction
//! failures reach the caller; a blank document short-circuits before the
//! completion service is called, and an unavailable service degrades to the
//! mock analysis.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::{AnalysisOutcome, DocumentFormat, ExtractionError};
use crate::services::ai_client::CompletionService;
use crate::services::extractor;
use crate::services::partitioner::{KeywordPartitioner, ReplyPartitioner};
use crate::services::prompt::build_prompt;

/// Runs the analysis pipeline for uploaded documents.
#[derive(Clone)]
pub struct DocumentAnalyzer {
    completion: Arc<dyn CompletionService>,
    partitioner: Arc<dyn ReplyPartitioner>,
}

impl DocumentAnalyzer {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self {
            completion,
            partitioner: Arc::new(KeywordPartitioner),
        }
    }

    pub fn completion_configured(&self) -> bool {
        self.completion.is_configured()
    }

    /// Analyse the document at `path`.
    #[instrument(skip_all, fields(format = %format))]
    pub async fn analyze(
        &self,
        path: &Path,
        format: DocumentFormat,
    ) -> Result<AnalysisOutcome, ExtractionError> {
        let owned: PathBuf = path.to_path_buf();
        let extracted = tokio::task::spawn_blocking(move || extractor::extract(&owned, format))
            .await
            .map_err(|e| ExtractionError::ExtractionFailure(format!("extraction task failed: {e}")))??;

        if extracted.is_blank() {
            info!("Document is empty, skipping analysis");
            return Ok(AnalysisOutcome::EmptyDocument);
        }

        let prompt = build_prompt(&extracted);
        let reply = self.completion.request_analysis(&prompt).await;
        let result = self.partitioner.partition(&reply, &extracted);

        info!(
            character_count = extracted.character_count(),
            word_count = extracted.word_count(),
            document_type = %result.document_type,
            "Document analysed"
        );

        Ok(AnalysisOutcome::Analyzed {
            character_count: extracted.character_count(),
            word_count: extracted.word_count(),
            result,
        })
    }

    /// Like [`DocumentAnalyzer::analyze`], with the format given as a tag.
    pub async fn analyze_tagged(
        &self,
        path: &Path,
        format: &str,
    ) -> Result<AnalysisOutcome, ExtractionError> {
        self.analyze(path, DocumentFormat::from_tag(format)?).await
    }
}
