//! Streaming Market Research Library
//!
//! An orchestration pipeline that turns a structured search configuration
//! into a live stream of analyzed companies: an LLM proposes candidates,
//! each candidate's website and social profile are collected concurrently,
//! and a synthesis call scores the result against the caller's criteria.
//!
//! # Design Philosophy
//!
//! **"Failure is absence, not error"**
//!
//! - Per-candidate fetch failures never abort a run or a sibling
//! - Missing data leaves fields empty instead of fabricated
//! - Exactly one terminal event per stream (`done` or `error`)
//! - Collaborators behind traits, so the orchestrator has no vendor ties
//!
//! # Usage
//!
//! ```rust,ignore
//! use research::{ResearchPipeline, SearchConfig};
//! use research::testing::{MockLanguageModel, MockSocialSource, MockWebSource};
//!
//! let pipeline = ResearchPipeline::new(
//!     MockLanguageModel::new(),
//!     MockWebSource::new(),
//!     MockSocialSource::new(),
//! );
//!
//! let mut stream = pipeline.start(config)?;
//! while let Some(event) = stream.recv().await {
//!     println!("{}", serde_json::to_string(&event)?);
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Collaborator seams (model client, web source, social source)
//! - [`types`] - Configs, candidates, payloads, analyses, stream events
//! - [`pipeline`] - The orchestrator: discovery, collection, synthesis
//! - [`sources`] - Source implementations (HTTP web fetcher, Apify social)
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod pipeline;
pub mod security;
pub mod sources;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "openai")]
pub mod model;

// Re-export core types at crate root
pub use error::{ClientError, ConfigError, DiscoveryError, FetchError, SynthesisError};
pub use pipeline::{ResearchPipeline, ResearchStream, RunPhase};
pub use security::SecretString;
pub use sources::HttpWebSource;
pub use traits::{LanguageModelClient, SocialProfileSource, WebContentSource};
pub use types::{
    AnalysisDraft, Candidate, CandidateDraft, CompanyAnalysis, PipelineConfig, RawCollection,
    ResearchEvent, SearchConfig, SocialProfile, SourceRef, WebContent,
};

#[cfg(feature = "openai")]
pub use model::OpenAiModel;

#[cfg(feature = "apify")]
pub use sources::ApifySocialSource;
