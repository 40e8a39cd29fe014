//! Service layer modules for the document analysis pipeline.
//!
//! Extraction, prompt construction, the completion service client, reply
//! partitioning and document-type classification, wired together by
//! [`DocumentAnalyzer`].

pub mod ai_client;
pub mod analyzer;
pub mod classifier;
pub mod extractor;
pub mod partitioner;
pub mod prompt;

pub use ai_client::OpenAiClient;
pub use analyzer::DocumentAnalyzer;
