//! Candidate discovery: one structured model call plus URL validation.

use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::error::{ClientError, DiscoveryError};
use crate::pipeline::prompts::format_discovery_prompt;
use crate::traits::LanguageModelClient;
use crate::types::{Candidate, SearchConfig};

/// Syntactic homepage check: absolute http(s) URL with a host.
///
/// Deep paths are accepted; discovery is instructed to return official
/// homepages, and anything that parses is usable downstream.
pub fn parse_homepage_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    match url.scheme() {
        "http" | "https" => {}
        _ => return None,
    }
    url.host_str()?;
    Some(url)
}

/// Run Discovery for a sanitized config.
///
/// Drafts with malformed URLs are dropped silently, never retried. Fails
/// only when the model call itself fails or zero drafts survive
/// validation (both fatal for the run).
pub async fn discover<M: LanguageModelClient>(
    config: &SearchConfig,
    model: &M,
    limit: usize,
    timeout: Duration,
) -> Result<Vec<Candidate>, DiscoveryError> {
    let prompt = format_discovery_prompt(config, limit);

    let drafts = tokio::time::timeout(timeout, model.discover(&prompt))
        .await
        .map_err(|_| DiscoveryError::Client(ClientError::Timeout))??;

    debug!(drafts = drafts.len(), "Discovery call returned");

    let mut candidates = Vec::new();
    for draft in drafts {
        match parse_homepage_url(&draft.url) {
            Some(url) => {
                candidates.push(
                    Candidate::new(draft.name, url).with_rationale(draft.rationale),
                );
            }
            None => {
                warn!(name = %draft.name, url = %draft.url, "Dropping candidate with invalid URL");
            }
        }
        if candidates.len() == limit {
            break;
        }
    }

    if candidates.is_empty() {
        return Err(DiscoveryError::NoCandidates);
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockLanguageModel;
    use crate::types::CandidateDraft;

    fn config() -> SearchConfig {
        serde_json::from_value(serde_json::json!({
            "included_industries": ["Fintech"],
            "required_keywords": ["api"],
            "target_countries": ["USA"]
        }))
        .unwrap()
    }

    fn draft(name: &str, url: &str) -> CandidateDraft {
        serde_json::from_value(serde_json::json!({
            "name": name, "url": url, "rationale": "fits"
        }))
        .unwrap()
    }

    #[test]
    fn test_homepage_url_validation() {
        assert!(parse_homepage_url("https://acme.example").is_some());
        assert!(parse_homepage_url("http://acme.example/about").is_some());
        assert!(parse_homepage_url(" https://acme.example ").is_some());
        assert!(parse_homepage_url("ftp://acme.example").is_none());
        assert!(parse_homepage_url("not a url").is_none());
        assert!(parse_homepage_url("acme.example").is_none()); // relative
        assert!(parse_homepage_url("https://").is_none()); // no host
    }

    #[tokio::test]
    async fn test_malformed_urls_dropped_silently() {
        let model = MockLanguageModel::new().with_discovery(vec![
            draft("Good", "https://good.example"),
            draft("Bad", "not-a-url"),
            draft("AlsoGood", "https://also-good.example"),
        ]);

        let candidates = discover(&config(), &model, 10, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].name, "Good");
        assert_eq!(candidates[1].name, "AlsoGood");
    }

    #[tokio::test]
    async fn test_zero_survivors_is_fatal() {
        let model = MockLanguageModel::new().with_discovery(vec![draft("Bad", "nope")]);

        let err = discover(&config(), &model, 10, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::NoCandidates));
    }

    #[tokio::test]
    async fn test_client_failure_is_fatal() {
        let model = MockLanguageModel::new().fail_discovery();

        let err = discover(&config(), &model, 10, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::Client(_)));
    }

    #[tokio::test]
    async fn test_limit_caps_candidates() {
        let model = MockLanguageModel::new().with_discovery(vec![
            draft("A", "https://a.example"),
            draft("B", "https://b.example"),
            draft("C", "https://c.example"),
        ]);

        let candidates = discover(&config(), &model, 2, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(candidates.len(), 2);
    }
}
