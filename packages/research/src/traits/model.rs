//! Language model client trait.
//!
//! The pipeline makes one structured model call per stage. Each stage has
//! its own method and its own response schema so the orchestrator never
//! depends on a specific vendor's request/response shape. Prompt wording
//! lives in [`crate::pipeline::prompts`]; implementations only move text.

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::types::{AnalysisDraft, CandidateDraft};

/// Abstraction over an LLM vendor for the pipeline's structured calls.
///
/// Implementations wrap a specific provider and handle its request and
/// response framing. Retries-within-call, if any, are the
/// implementation's concern; the orchestrator never retries.
#[async_trait]
pub trait LanguageModelClient: Send + Sync {
    /// Discovery call: return candidate companies for the given prompt.
    ///
    /// The response schema is a list of `{name, url, rationale}` objects.
    /// Implementations should return whatever the model produced; URL
    /// validation happens in the pipeline.
    async fn discover(&self, prompt: &str) -> ClientResult<Vec<CandidateDraft>>;

    /// Synthesis call: merge collected payloads into an analysis draft.
    ///
    /// The response schema is a single [`AnalysisDraft`] including a
    /// `relevance_score`. The score is clamped by the pipeline, so do not
    /// rely on the model honoring the [0,100] range.
    async fn synthesize(&self, prompt: &str) -> ClientResult<AnalysisDraft>;

    /// Aggregate call: produce market insights text over the final results.
    async fn market_insights(&self, prompt: &str) -> ClientResult<String>;
}
