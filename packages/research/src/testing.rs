//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the research
//! pipeline without making real model or network calls. All mocks are
//! deterministic and track their calls for assertions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use url::Url;

use crate::error::{ClientError, ClientResult, FetchError, FetchResult};
use crate::traits::{LanguageModelClient, SocialProfileSource, WebContentSource};
use crate::types::{AnalysisDraft, Candidate, CandidateDraft, SocialProfile, WebContent};

/// Record of a call made to [`MockLanguageModel`].
#[derive(Debug, Clone)]
pub enum ModelCall {
    Discover { prompt_len: usize },
    Synthesize { prompt_len: usize },
    MarketInsights { prompt_len: usize },
}

/// A mock language model returning configurable, deterministic responses.
#[derive(Default)]
pub struct MockLanguageModel {
    discovery: Arc<RwLock<Vec<CandidateDraft>>>,
    /// Synthesis drafts keyed by company name found in the prompt; the
    /// fallback draft serves prompts matching no key.
    synthesis: Arc<RwLock<HashMap<String, AnalysisDraft>>>,
    fallback_synthesis: Arc<RwLock<Option<AnalysisDraft>>>,
    insights: Arc<RwLock<Option<String>>>,
    fail_discovery: Arc<RwLock<bool>>,
    fail_synthesis: Arc<RwLock<bool>>,
    fail_insights: Arc<RwLock<bool>>,
    /// Company names whose synthesis calls should fail.
    fail_synthesis_for: Arc<RwLock<Vec<String>>>,
    calls: Arc<RwLock<Vec<ModelCall>>>,
}

impl MockLanguageModel {
    /// Create a mock with default behavior (empty discovery, generic draft).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the discovery response.
    pub fn with_discovery(self, drafts: Vec<CandidateDraft>) -> Self {
        *self.discovery.write().unwrap() = drafts;
        self
    }

    /// Set the synthesis draft served for every prompt.
    pub fn with_synthesis(self, draft: AnalysisDraft) -> Self {
        *self.fallback_synthesis.write().unwrap() = Some(draft);
        self
    }

    /// Set the synthesis draft for prompts mentioning a company name.
    pub fn with_synthesis_for(self, company: impl Into<String>, draft: AnalysisDraft) -> Self {
        self.synthesis.write().unwrap().insert(company.into(), draft);
        self
    }

    /// Set the market-insights response.
    pub fn with_insights(self, text: impl Into<String>) -> Self {
        *self.insights.write().unwrap() = Some(text.into());
        self
    }

    /// Make discovery calls fail.
    pub fn fail_discovery(self) -> Self {
        *self.fail_discovery.write().unwrap() = true;
        self
    }

    /// Make all synthesis calls fail.
    pub fn fail_synthesis(self) -> Self {
        *self.fail_synthesis.write().unwrap() = true;
        self
    }

    /// Make synthesis fail for prompts mentioning a company name.
    pub fn fail_synthesis_for(self, company: impl Into<String>) -> Self {
        self.fail_synthesis_for.write().unwrap().push(company.into());
        self
    }

    /// Make market-insights calls fail.
    pub fn fail_insights(self) -> Self {
        *self.fail_insights.write().unwrap() = true;
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<ModelCall> {
        self.calls.read().unwrap().clone()
    }

    fn default_draft() -> AnalysisDraft {
        serde_json::from_value(serde_json::json!({
            "company_name": "Mock Company",
            "industry_classification": "General",
            "summary": "A mock analysis.",
            "relevance_score": 50
        }))
        .expect("static draft is valid")
    }
}

#[async_trait]
impl LanguageModelClient for MockLanguageModel {
    async fn discover(&self, prompt: &str) -> ClientResult<Vec<CandidateDraft>> {
        self.calls.write().unwrap().push(ModelCall::Discover {
            prompt_len: prompt.len(),
        });
        if *self.fail_discovery.read().unwrap() {
            return Err(ClientError::Api {
                status: 500,
                message: "mock discovery failure".to_string(),
            });
        }
        Ok(self.discovery.read().unwrap().clone())
    }

    async fn synthesize(&self, prompt: &str) -> ClientResult<AnalysisDraft> {
        self.calls.write().unwrap().push(ModelCall::Synthesize {
            prompt_len: prompt.len(),
        });
        if *self.fail_synthesis.read().unwrap() {
            return Err(ClientError::Api {
                status: 500,
                message: "mock synthesis failure".to_string(),
            });
        }
        if self
            .fail_synthesis_for
            .read()
            .unwrap()
            .iter()
            .any(|name| prompt.contains(name.as_str()))
        {
            return Err(ClientError::Unparsable(
                "mock synthesis failure for company".to_string(),
            ));
        }

        // Most specific first: per-company draft, then fallback, then default
        if let Some(draft) = self
            .synthesis
            .read()
            .unwrap()
            .iter()
            .find(|(name, _)| prompt.contains(name.as_str()))
            .map(|(_, draft)| draft.clone())
        {
            return Ok(draft);
        }
        Ok(self
            .fallback_synthesis
            .read()
            .unwrap()
            .clone()
            .unwrap_or_else(Self::default_draft))
    }

    async fn market_insights(&self, prompt: &str) -> ClientResult<String> {
        self.calls.write().unwrap().push(ModelCall::MarketInsights {
            prompt_len: prompt.len(),
        });
        if *self.fail_insights.read().unwrap() {
            return Err(ClientError::Api {
                status: 500,
                message: "mock insights failure".to_string(),
            });
        }
        Ok(self
            .insights
            .read()
            .unwrap()
            .clone()
            .unwrap_or_else(|| "Mock market insights.".to_string()))
    }
}

/// A mock web content source serving predefined pages.
///
/// URLs with no registered content fail with a connection error, so an
/// empty mock behaves like an unreachable network.
#[derive(Default)]
pub struct MockWebSource {
    pages: Arc<RwLock<HashMap<String, WebContent>>>,
    fail_urls: Arc<RwLock<Vec<String>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockWebSource {
    /// Create a new mock web source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register content for a URL.
    pub fn with_content(self, url: impl Into<String>, content: WebContent) -> Self {
        self.pages.write().unwrap().insert(url.into(), content);
        self
    }

    /// Mark a URL as failing even if content is registered.
    pub fn fail_url(self, url: impl Into<String>) -> Self {
        self.fail_urls.write().unwrap().push(url.into());
        self
    }

    /// URLs fetched from this mock, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl WebContentSource for MockWebSource {
    async fn fetch(&self, url: &Url) -> FetchResult<WebContent> {
        let key = url.to_string();
        self.calls.write().unwrap().push(key.clone());

        if self.fail_urls.read().unwrap().contains(&key) {
            return Err(FetchError::Status {
                status: 503,
                url: key,
            });
        }
        self.pages
            .read()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or(FetchError::Status {
                status: 404,
                url: key,
            })
    }
}

/// A mock social profile source keyed by company name.
#[derive(Default)]
pub struct MockSocialSource {
    profiles: Arc<RwLock<HashMap<String, SocialProfile>>>,
    fail_companies: Arc<RwLock<Vec<String>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockSocialSource {
    /// Create a new mock social source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a profile for a company name.
    pub fn with_profile(self, company: impl Into<String>, profile: SocialProfile) -> Self {
        self.profiles
            .write()
            .unwrap()
            .insert(company.into(), profile);
        self
    }

    /// Mark a company as failing.
    pub fn fail_company(self, company: impl Into<String>) -> Self {
        self.fail_companies.write().unwrap().push(company.into());
        self
    }

    /// Company names fetched from this mock, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl SocialProfileSource for MockSocialSource {
    async fn fetch(&self, candidate: &Candidate) -> FetchResult<SocialProfile> {
        self.calls.write().unwrap().push(candidate.name.clone());

        if self
            .fail_companies
            .read()
            .unwrap()
            .contains(&candidate.name)
        {
            return Err(FetchError::Status {
                status: 503,
                url: candidate.name.clone(),
            });
        }
        self.profiles
            .read()
            .unwrap()
            .get(&candidate.name)
            .cloned()
            .ok_or_else(|| FetchError::InvalidTarget(candidate.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_model_records_calls() {
        let model = MockLanguageModel::new();
        let _ = model.discover("find companies").await.unwrap();
        let _ = model.synthesize("analyze Acme").await.unwrap();

        let calls = model.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[0], ModelCall::Discover { .. }));
        assert!(matches!(calls[1], ModelCall::Synthesize { .. }));
    }

    #[tokio::test]
    async fn test_mock_model_per_company_draft() {
        let draft: AnalysisDraft = serde_json::from_value(serde_json::json!({
            "company_name": "Acme",
            "summary": "Specific draft",
            "relevance_score": 91
        }))
        .unwrap();
        let model = MockLanguageModel::new().with_synthesis_for("Acme", draft);

        let result = model.synthesize("please analyze Acme today").await.unwrap();
        assert_eq!(result.summary, "Specific draft");

        let other = model.synthesize("please analyze Other").await.unwrap();
        assert_eq!(other.summary, "A mock analysis.");
    }

    #[tokio::test]
    async fn test_mock_web_source_unknown_url_fails() {
        let source = MockWebSource::new();
        let url = Url::parse("https://missing.example").unwrap();
        assert!(source.fetch(&url).await.is_err());
        assert_eq!(source.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_social_source_fail_switch() {
        let source = MockSocialSource::new()
            .with_profile("Acme", SocialProfile::default())
            .fail_company("Acme");
        let candidate = Candidate::new("Acme", Url::parse("https://acme.example").unwrap());
        assert!(source.fetch(&candidate).await.is_err());
    }
}
