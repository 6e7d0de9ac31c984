//! Stream events emitted by a pipeline run.
//!
//! Each event serializes to a self-contained JSON object with a `type`
//! discriminator, matching the wire format consumed by SSE clients.

use serde::{Deserialize, Serialize};

use super::analysis::CompanyAnalysis;

/// Reference to a fetched source page, surfaced as a `source_resource` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Page title, falling back to the candidate name when absent.
    pub title: String,

    /// URL the content was fetched from.
    pub url: String,
}

/// One event on a run's output stream.
///
/// The stream for a given run contains at most one terminal event
/// (`done` or `error`), and it is always the last event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResearchEvent {
    /// Human-readable phase description.
    Status { message: String },

    /// Completed-candidate counter. `current` is non-decreasing and
    /// `total` is fixed once Discovery completes.
    Progress { current: usize, total: usize },

    /// One per successful website fetch, before that candidate's outcome.
    SourceResource { source: SourceRef },

    /// One per surviving candidate.
    CompanyResult { data: CompanyAnalysis },

    /// Optional aggregate summary, at most one, before the terminal event.
    MarketInsights { insights: String },

    /// Terminal: fatal (Discovery) failure.
    Error { message: String },

    /// Terminal: successful completion, possibly with zero results.
    Done,
}

impl ResearchEvent {
    /// The wire discriminator for this event.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Status { .. } => "status",
            Self::Progress { .. } => "progress",
            Self::SourceResource { .. } => "source_resource",
            Self::CompanyResult { .. } => "company_result",
            Self::MarketInsights { .. } => "market_insights",
            Self::Error { .. } => "error",
            Self::Done => "done",
        }
    }

    /// True for `done` and `error`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_format() {
        let event = ResearchEvent::Progress {
            current: 2,
            total: 5,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "progress", "current": 2, "total": 5})
        );
    }

    #[test]
    fn test_source_resource_shape() {
        let event = ResearchEvent::SourceResource {
            source: SourceRef {
                title: "Acme Corp".into(),
                url: "https://acme.example".into(),
            },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "source_resource");
        assert_eq!(json["source"]["title"], "Acme Corp");
        assert_eq!(json["source"]["url"], "https://acme.example");
    }

    #[test]
    fn test_done_is_bare_discriminator() {
        let json = serde_json::to_value(ResearchEvent::Done).unwrap();
        assert_eq!(json, serde_json::json!({"type": "done"}));
    }

    #[test]
    fn test_terminal_classification() {
        assert!(ResearchEvent::Done.is_terminal());
        assert!(ResearchEvent::Error {
            message: "x".into()
        }
        .is_terminal());
        assert!(!ResearchEvent::Status {
            message: "x".into()
        }
        .is_terminal());
        assert_eq!(ResearchEvent::Done.kind(), "done");
    }
}
