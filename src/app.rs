use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Settings;
use crate::routes;
use crate::services::DocumentAnalyzer;

/// Header name for request ID
pub const X_REQUEST_ID: &str = "x-request-id";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub analyzer: DocumentAnalyzer,
}

impl AppState {
    pub fn new(settings: Settings, analyzer: DocumentAnalyzer) -> Arc<Self> {
        Arc::new(Self { settings, analyzer })
    }
}

/// Build the complete application with all middleware
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(&state.settings);

    // Extractors stop reading past the upload size; multipart overruns surface
    // as ApiError::PayloadTooLarge
    let body_limit = DefaultBodyLimit::max(state.settings.max_upload_bytes());

    // Build trace layer (use DEBUG for spans to reduce overhead at INFO level)
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    // Sets a UUID v4 request ID when the client sent none, and echoes it back
    let header_name = HeaderName::from_static(X_REQUEST_ID);
    let set_request_id = SetRequestIdLayer::new(header_name.clone(), MakeRequestUuid);
    let propagate_request_id = PropagateRequestIdLayer::new(header_name);

    Router::new()
        .merge(routes::api_router())
        // Middleware stack (applied bottom-up)
        .layer(body_limit)
        .layer(propagate_request_id)
        .layer(trace_layer)
        .layer(set_request_id)
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors_allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let max_age = if settings.env.is_dev() {
        std::time::Duration::from_secs(86400)
    } else {
        std::time::Duration::from_secs(3600)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            HeaderName::from_static(X_REQUEST_ID),
        ]))
        .max_age(max_age)
}
