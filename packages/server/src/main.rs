// Main entry point for the company research API server

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use research::{ApifySocialSource, HttpWebSource, OpenAiModel, ResearchPipeline};

mod app;
mod config;
mod routes;

use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server=debug,research=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Company Research API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Assemble the pipeline
    let mut model = OpenAiModel::new(config.openai_api_key);
    if let Some(name) = &config.openai_model {
        model = model.with_model(name);
    }
    let pipeline = ResearchPipeline::new(
        model,
        HttpWebSource::new(),
        ApifySocialSource::new(config.apify_token),
    );

    let app = app::build_app(pipeline);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Research endpoint: POST http://localhost:{}/research", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
