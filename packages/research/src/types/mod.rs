//! Data types flowing through the research pipeline.

pub mod analysis;
pub mod candidate;
pub mod collection;
pub mod config;
pub mod event;

pub use analysis::{AnalysisDraft, CompanyAnalysis};
pub use candidate::{Candidate, CandidateDraft};
pub use collection::{RawCollection, SocialProfile, WebContent};
pub use config::{PipelineConfig, SearchConfig};
pub use event::{ResearchEvent, SourceRef};
