//! Document upload and analysis endpoint.

use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

use crate::app::AppState;
use crate::domain::AnalyzeResponse;
use crate::error::{ApiError, ApiResult};
use crate::routes::get_request_id;

const MAX_FILENAME_CHARS: usize = 100;

/// Analyse an uploaded document.
///
/// POST /api/analyze (multipart, field `file`)
pub async fn analyze_document(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult<Json<AnalyzeResponse>> {
    let request_id = get_request_id(&headers);

    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        upload = Some((filename, data));
        break;
    }

    let (filename, data) = match upload {
        Some((filename, data)) if !filename.is_empty() => (filename, data),
        _ => return Err(ApiError::bad_request("No file provided")),
    };

    if !state.settings.is_allowed_file(&filename) {
        return Err(ApiError::bad_request("Invalid file type"));
    }
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    let safe_name = sanitize_filename(&filename);
    tracing::info!(
        request_id = ?request_id,
        filename = %safe_name,
        format = %extension,
        bytes = data.len(),
        "Document received"
    );

    let path = store_upload(&state.settings.upload_dir, &safe_name, &data).await?;
    let outcome = state.analyzer.analyze_tagged(&path, &extension).await;

    if let Err(e) = tokio::fs::remove_file(&path).await {
        tracing::warn!(error = %e, path = %path.display(), "Failed to remove uploaded file");
    }

    Ok(Json(AnalyzeResponse {
        filename: safe_name,
        analysis: outcome?.into(),
    }))
}

async fn store_upload(dir: &std::path::Path, safe_name: &str, data: &[u8]) -> ApiResult<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create upload directory {}", dir.display()))?;

    // Unique prefix so concurrent uploads of the same name never collide
    let path = dir.join(format!("{}_{}", Uuid::new_v4(), safe_name));
    tokio::fs::write(&path, data)
        .await
        .with_context(|| format!("Failed to store upload {}", path.display()))?;

    Ok(path)
}

/// Replace everything outside `[A-Za-z0-9.-]` with `_` and cap the length.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .take(MAX_FILENAME_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnalysisReply, DocumentReport, EMPTY_DOCUMENT_MESSAGE};
    use crate::routes::testing::{read_json, test_app};
    use crate::services::{classifier, partitioner::MOCK_FULL_ANALYSIS};
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    const BOUNDARY: &str = "X-JOLLYBOT-TEST-BOUNDARY";

    fn multipart_request(field: &str, filename: &str, contents: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(contents);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header("content-length", body.len())
            .body(Body::from(body))
            .unwrap()
    }

    fn upload_dir_is_empty(dir: &std::path::Path) -> bool {
        match std::fs::read_dir(dir) {
            Ok(mut entries) => entries.next().is_none(),
            Err(_) => true,
        }
    }

    #[test]
    fn filenames_are_sanitized_and_capped() {
        assert_eq!(sanitize_filename("My Lease (final).pdf"), "My_Lease__final_.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_filename(&"a".repeat(150)).len(), 100);
    }

    #[tokio::test]
    async fn text_upload_is_analysed_and_removed() {
        let (app, dir) = test_app(AnalysisReply::Unavailable);

        let response = app
            .oneshot(multipart_request(
                "file",
                "rental lease.txt",
                b"This lease is made between the landlord and the tenant.",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: AnalyzeResponse = read_json(response).await;
        assert_eq!(body.filename, "rental_lease.txt");
        match body.analysis {
            DocumentReport::Analyzed {
                text_length,
                word_count,
                analysis,
                success,
            } => {
                assert!(success);
                assert_eq!(text_length, 55);
                assert_eq!(word_count, 10);
                assert_eq!(analysis.document_type, classifier::LEASE);
                assert_eq!(analysis.full_analysis, MOCK_FULL_ANALYSIS);
            }
            other => panic!("unexpected report: {other:?}"),
        }
        assert!(upload_dir_is_empty(&dir.path().join("uploads")));
    }

    #[tokio::test]
    async fn blank_upload_reports_empty_document() {
        let (app, dir) = test_app(AnalysisReply::Completed("SUMMARY:\nunused".into()));

        let response = app
            .oneshot(multipart_request("file", "blank.txt", b"   \n\n  "))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: AnalyzeResponse = read_json(response).await;
        match body.analysis {
            DocumentReport::Empty { error } => assert_eq!(error, EMPTY_DOCUMENT_MESSAGE),
            other => panic!("unexpected report: {other:?}"),
        }
        assert!(upload_dir_is_empty(&dir.path().join("uploads")));
    }

    #[tokio::test]
    async fn missing_file_field_is_rejected() {
        let (app, _dir) = test_app(AnalysisReply::Unavailable);

        let response = app
            .oneshot(multipart_request("attachment", "lease.txt", b"lease"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = read_json(response).await;
        assert_eq!(body["message"], "No file provided");
    }

    #[tokio::test]
    async fn disallowed_extension_is_rejected() {
        let (app, _dir) = test_app(AnalysisReply::Unavailable);

        let response = app
            .oneshot(multipart_request("file", "payload.exe", b"MZ"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = read_json(response).await;
        assert_eq!(body["message"], "Invalid file type");
    }

    #[tokio::test]
    async fn unreadable_document_is_unprocessable() {
        let (app, dir) = test_app(AnalysisReply::Unavailable);

        let response = app
            .oneshot(multipart_request("file", "contract.pdf", b"not a pdf at all"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = read_json(response).await;
        assert_eq!(body["code"], "EXTRACTION_FAILED");
        assert!(upload_dir_is_empty(&dir.path().join("uploads")));
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected() {
        let (app, _dir) = test_app(AnalysisReply::Unavailable);
        let contents = vec![b'a'; 2 * 1024 * 1024];

        let response = app
            .oneshot(multipart_request("file", "huge.txt", &contents))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body: serde_json::Value = read_json(response).await;
        assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
        assert_eq!(body["message"], "File exceeds the maximum upload size");
    }
}
