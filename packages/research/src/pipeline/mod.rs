//! The research pipeline: discovery, collection, synthesis, publishing.
//!
//! Control flow for one run:
//!
//! 1. [`discovery`]: one model call produces validated candidates (fatal
//!    on failure).
//! 2. [`collector`]: per-candidate concurrent web + social fetch,
//!    failure-as-absence.
//! 3. [`synthesis`]: second model call merges payloads into a scored
//!    [`crate::CompanyAnalysis`] (non-fatal on failure).
//! 4. [`run`]: the orchestrator, a bounded worker pool feeding a single
//!    publisher task that owns the outward event stream.

pub mod collector;
pub mod discovery;
pub mod insights;
pub mod prompts;
pub mod run;
pub mod synthesis;

pub use run::{ResearchPipeline, ResearchStream, RunPhase};

use crate::types::{CompanyAnalysis, SourceRef};

/// Internal message from a worker to the publisher task.
///
/// All reports for a run flow through one mpsc channel, which is what
/// guarantees that a candidate's `source_resource` precedes its outcome:
/// the worker sends both on the same channel, in order.
#[derive(Debug)]
pub(crate) enum WorkerReport {
    /// Website fetch succeeded; surface the page to the caller.
    Source(SourceRef),

    /// Candidate survived synthesis.
    Completed(Box<CompanyAnalysis>),

    /// Candidate dropped (empty collection or synthesis failure).
    Dropped { name: String, reason: String },
}
