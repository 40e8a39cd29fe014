pub mod analyze;
pub mod chat;
pub mod health;

use axum::{http::HeaderMap, routing::get, routing::post, Router};
use std::sync::Arc;

use crate::app::{AppState, X_REQUEST_ID};

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        // Document analysis
        .route("/api/analyze", post(analyze::analyze_document))
        // Chat surfaces
        .route("/api/chat", post(chat::chat))
        .route("/webhook/whatsapp", post(chat::whatsapp_webhook))
}

/// Request ID set by the request-id middleware, if any.
pub fn get_request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
pub(crate) mod testing {
    use axum::{body::to_bytes, response::Response, Router};
    use serde::de::DeserializeOwned;
    use std::sync::Arc;
    use tempfile::TempDir;

    use crate::app::{create_app, AppState};
    use crate::config::test_settings;
    use crate::domain::AnalysisReply;
    use crate::services::analyzer::testing::ScriptedCompletion;
    use crate::services::DocumentAnalyzer;

    /// Full application backed by a scripted completion service and a
    /// throwaway upload directory. Keep the `TempDir` alive for the test.
    pub fn test_app(reply: AnalysisReply) -> (Router, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(dir.path().join("uploads"));
        let analyzer = DocumentAnalyzer::new(Arc::new(ScriptedCompletion::new(reply)));
        (create_app(AppState::new(settings, analyzer)), dir)
    }

    pub async fn read_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
