//! Synthesis: merge collected payloads into a scored analysis.
//!
//! The model produces a draft; local post-processing enforces the score
//! bound, recomputes the industry match, forces the official website, and
//! sources the social-platform fields from the social payload rather than
//! the model.

use std::time::Duration;

use tracing::debug;

use crate::error::{ClientError, SynthesisError};
use crate::pipeline::prompts::format_synthesis_prompt;
use crate::traits::LanguageModelClient;
use crate::types::{AnalysisDraft, Candidate, CompanyAnalysis, RawCollection, SearchConfig};

/// Clamp a model-reported score into [0,100].
///
/// Never trust external output ranges.
pub fn clamp_score(score: i64) -> u8 {
    score.clamp(0, 100) as u8
}

/// Case-insensitive substring overlap in either direction.
///
/// "Fintech" matches a classification of "Financial Technology (Fintech)"
/// and "fintech" matches "Fintech & Payments".
pub fn industry_overlaps(included: &[String], classification: &str) -> bool {
    let classification = classification.to_lowercase();
    if classification.trim().is_empty() {
        return false;
    }
    included.iter().any(|industry| {
        let industry = industry.to_lowercase();
        classification.contains(&industry) || industry.contains(&classification)
    })
}

/// Turn a draft into the final analysis for a candidate.
fn finalize(
    draft: AnalysisDraft,
    candidate: &Candidate,
    raw: &RawCollection,
    config: &SearchConfig,
) -> CompanyAnalysis {
    let social = raw.social.as_ref();

    CompanyAnalysis {
        company_name: if draft.company_name.trim().is_empty() {
            candidate.name.clone()
        } else {
            draft.company_name
        },
        // Always the discovered official homepage, never a profile link.
        website: candidate.homepage_url.to_string(),
        industry_match: industry_overlaps(
            &config.included_industries,
            &draft.industry_classification,
        ),
        employee_count_estimate: draft
            .employee_count_estimate
            .or_else(|| social.and_then(|s| s.employee_count.clone())),
        locations: draft.locations,
        certifications: draft.certifications,
        product_categories: draft.product_categories,
        summary: draft.summary,
        contact_info: draft.contact_info,
        estimated_revenue: draft.estimated_revenue,
        market_cap: draft.market_cap,
        strategic_goals: draft.strategic_goals,
        // Social-platform fields come from the social payload; absent when
        // the social fetch failed, regardless of what the model said.
        linkedin_url: social.and_then(|s| s.linkedin_url.clone()),
        follower_count: social.and_then(|s| s.follower_count),
        founded_year: social.and_then(|s| s.founded_year).or(draft.founded_year),
        specialties: match social {
            Some(s) if !s.specialties.is_empty() => s.specialties.clone(),
            _ => draft.specialties,
        },
        relevance_score: clamp_score(draft.relevance_score),
    }
}

/// Run Synthesis for one candidate.
///
/// Non-fatal for the run: on failure the candidate is dropped and a
/// progress tick still fires.
pub async fn synthesize<M: LanguageModelClient + ?Sized>(
    candidate: &Candidate,
    raw: &RawCollection,
    config: &SearchConfig,
    model: &M,
    timeout: Duration,
) -> Result<CompanyAnalysis, SynthesisError> {
    let prompt = format_synthesis_prompt(candidate, raw, config);

    let draft = tokio::time::timeout(timeout, model.synthesize(&prompt))
        .await
        .map_err(|_| SynthesisError::Client(ClientError::Timeout))??;

    if draft.summary.trim().is_empty() {
        return Err(SynthesisError::RejectedDraft {
            reason: "empty summary".to_string(),
        });
    }

    let analysis = finalize(draft, candidate, raw, config);
    debug!(
        company = %analysis.company_name,
        score = analysis.relevance_score,
        industry_match = analysis.industry_match,
        "Synthesis complete"
    );
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockLanguageModel;
    use crate::types::{SocialProfile, WebContent};
    use url::Url;

    fn config() -> SearchConfig {
        serde_json::from_value(serde_json::json!({
            "included_industries": ["Fintech"],
            "required_keywords": ["api"],
            "target_countries": ["USA"]
        }))
        .unwrap()
    }

    fn candidate() -> Candidate {
        Candidate::new("Acme", Url::parse("https://acme.example").unwrap())
    }

    fn draft(score: i64, classification: &str) -> AnalysisDraft {
        serde_json::from_value(serde_json::json!({
            "company_name": "Acme",
            "industry_classification": classification,
            "summary": "Payments API vendor",
            "relevance_score": score,
            "locations": ["New York, USA"],
            "founded_year": 2012,
            "specialties": ["payments"]
        }))
        .unwrap()
    }

    #[test]
    fn test_clamp_score_bounds() {
        assert_eq!(clamp_score(-5), 0);
        assert_eq!(clamp_score(0), 0);
        assert_eq!(clamp_score(73), 73);
        assert_eq!(clamp_score(100), 100);
        assert_eq!(clamp_score(150), 100);
    }

    #[test]
    fn test_industry_overlap() {
        let included = vec!["Fintech".to_string()];
        assert!(industry_overlaps(&included, "Financial Technology (Fintech)"));
        assert!(industry_overlaps(&included, "fintech"));
        // Inverse direction: broad included term, narrow classification
        assert!(industry_overlaps(
            &["Fintech & Payments".to_string()],
            "fintech"
        ));
        assert!(!industry_overlaps(&included, "Agriculture"));
        assert!(!industry_overlaps(&included, ""));
    }

    #[tokio::test]
    async fn test_score_clamped_and_website_forced() {
        let model = MockLanguageModel::new().with_synthesis(draft(150, "Fintech"));
        let raw = RawCollection {
            website: Some(WebContent::new("https://acme.example/about", "body")),
            social: None,
        };

        let analysis = synthesize(&candidate(), &raw, &config(), &model, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(analysis.relevance_score, 100);
        assert_eq!(analysis.website, "https://acme.example/");
        assert!(analysis.industry_match);
    }

    #[tokio::test]
    async fn test_social_fields_absent_without_social_payload() {
        let model = MockLanguageModel::new().with_synthesis(draft(80, "Fintech"));
        let raw = RawCollection {
            website: Some(WebContent::new("https://acme.example", "body")),
            social: None,
        };

        let analysis = synthesize(&candidate(), &raw, &config(), &model, Duration::from_secs(5))
            .await
            .unwrap();
        assert!(analysis.linkedin_url.is_none());
        assert!(analysis.follower_count.is_none());
        // Draft-only fields still pass through
        assert_eq!(analysis.founded_year, Some(2012));
        assert_eq!(analysis.specialties, vec!["payments"]);
    }

    #[tokio::test]
    async fn test_social_payload_overrides_model() {
        let model = MockLanguageModel::new().with_synthesis(draft(80, "Fintech"));
        let raw = RawCollection {
            website: None,
            social: Some(SocialProfile {
                linkedin_url: Some("https://linkedin.com/company/acme".into()),
                follower_count: Some(12_000),
                founded_year: Some(2010),
                specialties: vec!["payments".into(), "apis".into()],
                ..Default::default()
            }),
        };

        let analysis = synthesize(&candidate(), &raw, &config(), &model, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(
            analysis.linkedin_url.as_deref(),
            Some("https://linkedin.com/company/acme")
        );
        assert_eq!(analysis.follower_count, Some(12_000));
        assert_eq!(analysis.founded_year, Some(2010));
        assert_eq!(analysis.specialties.len(), 2);
    }

    #[tokio::test]
    async fn test_mismatched_industry_not_trusted_from_model() {
        let model = MockLanguageModel::new().with_synthesis(draft(80, "Agriculture"));
        let raw = RawCollection {
            website: Some(WebContent::new("https://acme.example", "body")),
            social: None,
        };

        let analysis = synthesize(&candidate(), &raw, &config(), &model, Duration::from_secs(5))
            .await
            .unwrap();
        assert!(!analysis.industry_match);
    }

    #[tokio::test]
    async fn test_client_failure_is_synthesis_error() {
        let model = MockLanguageModel::new().fail_synthesis();
        let raw = RawCollection {
            website: Some(WebContent::new("https://acme.example", "body")),
            social: None,
        };

        let err = synthesize(&candidate(), &raw, &config(), &model, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, SynthesisError::Client(_)));
    }

    #[tokio::test]
    async fn test_deterministic_given_deterministic_client() {
        let model = MockLanguageModel::new().with_synthesis(draft(80, "Fintech"));
        let raw = RawCollection {
            website: Some(WebContent::new("https://acme.example", "body")),
            social: None,
        };

        let first = synthesize(&candidate(), &raw, &config(), &model, Duration::from_secs(5))
            .await
            .unwrap();
        let second = synthesize(&candidate(), &raw, &config(), &model, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(first, second);
    }
}
