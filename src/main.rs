use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

use invoice_extractor_rust::api::{self, AppState};
use invoice_extractor_rust::{create_pool, AppConfig, CategorizerService, OpenAiClient};

// Statements arrive as whole PDFs; the axum default 2 MB limit is too tight.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    let config = AppConfig::from_env();
    if config.openai.api_key.is_empty() {
        return Err("OPENAI_API_KEY não configurada.".into());
    }
    info!(
        "Starting server on {}:{} (model {})",
        config.server.host, config.server.port, config.openai.model
    );

    let pool = create_pool(&config.database.url).await?;
    info!("Database pool created");

    let llm = OpenAiClient::new(config.openai.api_key.clone(), config.openai.model.clone());
    let categorizer = CategorizerService::new(pool, Arc::new(llm.clone()));
    let state = Arc::new(AppState { llm, categorizer });

    let app = Router::new()
        .route("/health", get(api::health_check))
        .route("/extract", post(api::extract))
        .route("/extract_base64", post(api::extract_base64))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /extract         - multipart PDF upload");
    info!("  POST /extract_base64  - base64 PDF payload");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
