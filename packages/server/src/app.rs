//! Router and shared state assembly.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use research::{ApifySocialSource, HttpWebSource, OpenAiModel, ResearchPipeline};

use crate::routes::{ping_handler, research_handler, root_handler};

/// The concrete pipeline this server runs: OpenAI for the model calls,
/// plain HTTP for websites, Apify for social profiles.
pub type Pipeline = ResearchPipeline<OpenAiModel, HttpWebSource, ApifySocialSource>;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

/// Build the application router.
pub fn build_app(pipeline: Pipeline) -> Router {
    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    // CORS: the SSE endpoint is consumed from browsers on other origins
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/", get(root_handler))
        .route("/ping", get(ping_handler))
        .route("/research", post(research_handler))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
