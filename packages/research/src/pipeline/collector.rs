//! Per-candidate data collection from both external sources.
//!
//! The two sub-fetches run concurrently and each failure is converted
//! into absence at this call site: a collector never fails outright and
//! never aborts sibling candidates.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::pipeline::WorkerReport;
use crate::traits::{SocialProfileSource, WebContentSource};
use crate::types::{Candidate, PipelineConfig, RawCollection, SourceRef};

/// Collect website content and social-profile data for one candidate.
///
/// Emits a `source_resource` report as soon as the website fetch
/// succeeds, independent of the social outcome. Returns an empty
/// collection when both sub-fetches fail.
pub(crate) async fn collect<W, S>(
    candidate: &Candidate,
    web: &W,
    social: &S,
    config: &PipelineConfig,
    reports: &mpsc::Sender<WorkerReport>,
) -> RawCollection
where
    W: WebContentSource + ?Sized,
    S: SocialProfileSource + ?Sized,
{
    let web_fut = async {
        match tokio::time::timeout(config.web_timeout, web.fetch(&candidate.homepage_url)).await {
            Ok(Ok(content)) => {
                debug!(company = %candidate.name, url = %content.url, "Website fetch succeeded");
                let source = SourceRef {
                    title: content
                        .title
                        .clone()
                        .unwrap_or_else(|| candidate.name.clone()),
                    url: content.url.clone(),
                };
                // Send errors mean the run was cancelled and the publisher
                // is gone; the payload is still returned for synthesis.
                let _ = reports.send(WorkerReport::Source(source)).await;
                Some(content)
            }
            Ok(Err(e)) => {
                warn!(company = %candidate.name, error = %e, "Website fetch failed");
                None
            }
            Err(_) => {
                warn!(company = %candidate.name, "Website fetch timed out");
                None
            }
        }
    };

    let social_fut = async {
        match tokio::time::timeout(config.social_timeout, social.fetch(candidate)).await {
            Ok(Ok(profile)) => {
                debug!(company = %candidate.name, "Social profile fetch succeeded");
                Some(profile)
            }
            Ok(Err(e)) => {
                warn!(company = %candidate.name, error = %e, "Social profile fetch failed");
                None
            }
            Err(_) => {
                warn!(company = %candidate.name, "Social profile fetch timed out");
                None
            }
        }
    };

    let (website, social) = tokio::join!(web_fut, social_fut);

    RawCollection { website, social }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockSocialSource, MockWebSource};
    use crate::types::{SocialProfile, WebContent};
    use url::Url;

    fn candidate() -> Candidate {
        Candidate::new("Acme", Url::parse("https://acme.example").unwrap())
    }

    #[tokio::test]
    async fn test_both_sources_present() {
        let web = MockWebSource::new().with_content(
            "https://acme.example/",
            WebContent::new("https://acme.example/", "body").with_title("Acme"),
        );
        let social =
            MockSocialSource::new().with_profile("Acme", SocialProfile::default());
        let (tx, mut rx) = mpsc::channel(8);

        let raw = collect(&candidate(), &web, &social, &PipelineConfig::default(), &tx).await;
        assert!(raw.website.is_some());
        assert!(raw.social.is_some());

        // source_resource report emitted for the successful web fetch
        match rx.recv().await.unwrap() {
            WorkerReport::Source(source) => {
                assert_eq!(source.title, "Acme");
                assert_eq!(source.url, "https://acme.example/");
            }
            other => panic!("unexpected report: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_source_emitted_despite_social_failure() {
        let web = MockWebSource::new().with_content(
            "https://acme.example/",
            WebContent::new("https://acme.example/", "body"),
        );
        let social = MockSocialSource::new().fail_company("Acme");
        let (tx, mut rx) = mpsc::channel(8);

        let raw = collect(&candidate(), &web, &social, &PipelineConfig::default(), &tx).await;
        assert!(raw.website.is_some());
        assert!(raw.social.is_none());

        // Title falls back to the candidate name when the page has none
        match rx.recv().await.unwrap() {
            WorkerReport::Source(source) => assert_eq!(source.title, "Acme"),
            other => panic!("unexpected report: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_both_failures_yield_empty_collection() {
        let web = MockWebSource::new(); // no pages registered
        let social = MockSocialSource::new().fail_company("Acme");
        let (tx, mut rx) = mpsc::channel(8);

        let raw = collect(&candidate(), &web, &social, &PipelineConfig::default(), &tx).await;
        assert!(raw.is_empty());

        drop(tx);
        assert!(rx.recv().await.is_none()); // nothing was emitted
    }
}
