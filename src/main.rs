//! Tour Sales Assistant - Main entry point
//!
//! Runs the sales assistant as a Model Context Protocol (MCP) server over stdio.

use anyhow::Result;
use std::sync::Arc;
use tour_sales_assistant::client::{ApiClient, DriveClient, OpenAiClient, RetryPolicy, SheetsClient};
use tour_sales_assistant::repositories::{
    CatalogSource, DocumentStore, DriveDocumentStore, LanguageModel, OpenAiLanguageModel,
    SheetsCatalogSource,
};
use tour_sales_assistant::services::{AssistantSettings, SalesAssistant};
use tour_sales_assistant::{Config, Metrics, SalesMcpServer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(std::env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string()))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting Tour Sales Assistant (sheet: {}, folder: {}, model: {})",
        config.tour_sheet_id, config.knowledge_folder_id, config.openai_model
    );

    let metrics = Metrics::new();
    let retry = RetryPolicy::new(config.max_retries);
    let google_api = |base_url: &str| {
        ApiClient::new(
            base_url,
            config.google_access_token.clone(),
            config.request_timeout,
            retry.clone(),
            metrics.clone(),
        )
    };

    let catalog = Arc::new(SheetsCatalogSource::new(
        SheetsClient::new(google_api(&config.sheets_api_url)),
        config.tour_sheet_range.clone(),
    )) as Arc<dyn CatalogSource>;

    let store = Arc::new(DriveDocumentStore::new(DriveClient::new(google_api(
        &config.drive_api_url,
    )))) as Arc<dyn DocumentStore>;

    if config.openai_api_key.is_empty() {
        info!("OPENAI_API_KEY not set; language model tools will report a missing key");
    }
    let openai_api = ApiClient::new(
        config.openai_api_url.clone(),
        config.openai_api_key.clone(),
        config.request_timeout,
        retry.clone(),
        metrics.clone(),
    );
    let model = Arc::new(OpenAiLanguageModel::new(OpenAiClient::new(
        openai_api,
        config.openai_model.clone(),
        !config.openai_api_key.is_empty(),
    ))) as Arc<dyn LanguageModel>;

    let settings = AssistantSettings::new(
        config.tour_sheet_id.clone(),
        config.knowledge_folder_id.clone(),
    )
    .with_context_radius(config.context_radius)
    .with_match_mode(config.match_mode.clone())
    .with_max_results(config.max_match_results);

    let assistant = Arc::new(SalesAssistant::new(catalog, store, model, settings));
    let server = SalesMcpServer::new(assistant);

    info!("Starting MCP server with stdio transport");
    tour_sales_assistant::server::run_server(server).await?;

    let summary = metrics.summary();
    info!(
        requests = summary.http_requests_total,
        errors = summary.http_errors_total,
        retries = summary.http_retries_total,
        avg_ms = summary.http_duration_avg_ms,
        files_listed = summary.files_listed_total,
        documents = summary.documents_downloaded_total,
        records = summary.records_fetched_total,
        "Tour Sales Assistant shutdown complete"
    );
    Ok(())
}
