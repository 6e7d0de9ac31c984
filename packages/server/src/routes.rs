//! HTTP handlers for the research API.
//!
//! POST /research takes a JSON search configuration and streams the run's
//! events over SSE. Each stream event's name is the wire discriminator and
//! its data is the full JSON event, so clients can either dispatch on the
//! SSE event name or parse the payload's `type` field.

use std::convert::Infallible;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    response::IntoResponse,
    Json,
};
use futures::StreamExt;
use serde::Serialize;
use serde_json::json;

use research::SearchConfig;

use crate::app::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

/// Start a research run and stream its events.
///
/// Validation failures return 400 with a JSON error body; no stream is
/// opened and no external call is made. Client disconnects cancel the
/// run, since dropping the SSE stream drops the underlying research
/// stream.
pub async fn research_handler(
    Extension(state): Extension<AppState>,
    Json(config): Json<SearchConfig>,
) -> Result<Sse<impl futures::Stream<Item = Result<Event, Infallible>>>, (StatusCode, Json<ErrorResponse>)>
{
    let stream = state.pipeline.start(config).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    tracing::info!(run_id = %stream.run_id(), "Research run started");

    let events = stream.filter_map(|event| async move {
        Event::default()
            .event(event.kind())
            .json_data(&event)
            .ok()
            .map(Ok::<_, Infallible>)
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

/// Liveness probe.
pub async fn ping_handler() -> &'static str {
    "pong"
}

/// Service banner.
pub async fn root_handler() -> impl IntoResponse {
    Json(json!({
        "service": "company-research",
        "endpoints": {
            "research": "POST /research",
            "ping": "GET /ping"
        }
    }))
}
