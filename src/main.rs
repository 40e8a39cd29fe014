mod app;
mod config;
mod domain;
mod error;
mod logging;
mod routes;
mod services;

use anyhow::{Context, Result};
use std::sync::Arc;

use services::{DocumentAnalyzer, OpenAiClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        upload_dir = %settings.upload_dir.display(),
        "Starting JollyLLBot backend"
    );

    tokio::fs::create_dir_all(&settings.upload_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create upload directory {}",
                settings.upload_dir.display()
            )
        })?;

    // Create completion service client
    let client = OpenAiClient::new(&settings.completion)?;
    let analyzer = DocumentAnalyzer::new(Arc::new(client));

    // Create application state
    let state = app::AppState::new(settings.clone(), analyzer);

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
