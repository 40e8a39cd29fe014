//! Completion service client used for legal document analysis.
//!
//! Talks to an OpenAI-compatible chat-completions endpoint. Every failure is
//! folded into [`AnalysisReply::Unavailable`] so the caller can fall back to
//! the mock analysis instead of failing the request.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::CompletionSettings;
use crate::domain::AnalysisReply;

pub const MODEL: &str = "gpt-3.5-turbo";
pub const MAX_TOKENS: u32 = 1000;
pub const TEMPERATURE: f32 = 0.3;

const SYSTEM_INSTRUCTION: &str = "You are a legal document analysis assistant. \
Provide clear, structured analysis of legal documents.";

/// Anything that can turn an analysis prompt into a model reply.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Whether a credential was supplied at construction.
    fn is_configured(&self) -> bool;

    async fn request_analysis(&self, prompt: &str) -> AnalysisReply;
}

#[derive(Debug, Error)]
enum CompletionError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("service returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("response contained no completion text")]
    EmptyCompletion,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'static str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Error body returned by the completion service.
#[derive(Deserialize)]
struct ServiceErrorResponse {
    error: ServiceErrorDetail,
}

#[derive(Deserialize)]
struct ServiceErrorDetail {
    message: String,
}

/// Client for the hosted chat-completion API.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    /// Create a client from immutable completion settings.
    pub fn new(settings: &CompletionSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        if settings.is_configured() {
            tracing::info!(base_url = %settings.base_url, model = MODEL, "Completion client initialized");
        } else {
            warn!("OPENAI_API_KEY not set - analysis will use mock responses");
        }

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }

    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model: MODEL,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        debug!(url = %url, prompt_chars = prompt.chars().count(), "Completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ServiceErrorResponse>()
                .await
                .map(|e| e.error.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(CompletionError::Status { status, message });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(CompletionError::EmptyCompletion)
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    #[instrument(skip_all)]
    async fn request_analysis(&self, prompt: &str) -> AnalysisReply {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("Completion service not configured");
            return AnalysisReply::Unavailable;
        };

        match self.complete(api_key, prompt).await {
            Ok(text) => {
                debug!(reply_chars = text.chars().count(), "Completion received");
                AnalysisReply::Completed(text)
            }
            Err(e) => {
                warn!(error = %e, "AI analysis failed - falling back to mock analysis");
                AnalysisReply::Unavailable
            }
        }
    }
}
