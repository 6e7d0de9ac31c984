//! Candidate companies produced by Discovery.

use url::Url;

/// A company identified by Discovery as worth investigating.
///
/// Transient, exists only for the duration of one pipeline run. The
/// homepage URL has already passed syntactic validation (http/https
/// scheme plus host) by the time a `Candidate` is constructed.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Company name as stated by the model.
    pub name: String,

    /// Official homepage URL.
    pub homepage_url: Url,

    /// Why Discovery considers this company a match.
    pub rationale: String,

    /// Provenance label attached to the run's structured logs.
    pub source_label: String,
}

impl Candidate {
    /// Create a candidate with the default provenance label.
    pub fn new(name: impl Into<String>, homepage_url: Url) -> Self {
        Self {
            name: name.into(),
            homepage_url,
            rationale: String::new(),
            source_label: "model_discovery".to_string(),
        }
    }

    /// Set the rationale.
    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = rationale.into();
        self
    }

    /// Set the provenance label.
    pub fn with_source_label(mut self, label: impl Into<String>) -> Self {
        self.source_label = label.into();
        self
    }
}

/// Raw discovery output before URL validation.
///
/// What the model actually returned; Discovery turns the usable subset
/// into [`Candidate`]s and drops the rest silently.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CandidateDraft {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub rationale: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_and_overrides() {
        let url = Url::parse("https://acme.example").unwrap();

        let candidate = Candidate::new("Acme", url.clone());
        assert_eq!(candidate.source_label, "model_discovery");
        assert_eq!(candidate.rationale, "");

        let candidate = Candidate::new("Acme", url)
            .with_rationale("fits the criteria")
            .with_source_label("manual");
        assert_eq!(candidate.source_label, "manual");
        assert_eq!(candidate.rationale, "fits the criteria");
    }
}
