//! Optional aggregate market-insights step.

use std::time::Duration;

use tracing::warn;

use crate::pipeline::prompts::format_insights_prompt;
use crate::traits::LanguageModelClient;
use crate::types::CompanyAnalysis;

/// Generate market insights over the surviving analyses.
///
/// Best-effort: returns `None` when there is nothing to aggregate or the
/// model call fails. Skipping this step never affects the correctness of
/// the rest of the stream.
pub async fn generate_insights<M: LanguageModelClient + ?Sized>(
    analyses: &[CompanyAnalysis],
    model: &M,
    timeout: Duration,
) -> Option<String> {
    if analyses.is_empty() {
        return None;
    }

    let prompt = format_insights_prompt(analyses);
    match tokio::time::timeout(timeout, model.market_insights(&prompt)).await {
        Ok(Ok(text)) if !text.trim().is_empty() => Some(text),
        Ok(Ok(_)) => None,
        Ok(Err(e)) => {
            warn!(error = %e, "Market insights call failed, skipping");
            None
        }
        Err(_) => {
            warn!("Market insights call timed out, skipping");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockLanguageModel;

    fn analysis() -> CompanyAnalysis {
        CompanyAnalysis {
            company_name: "Acme".into(),
            website: "https://acme.example".into(),
            industry_match: true,
            employee_count_estimate: None,
            locations: vec![],
            certifications: vec![],
            product_categories: vec![],
            summary: "Payments API vendor".into(),
            contact_info: None,
            estimated_revenue: None,
            market_cap: None,
            strategic_goals: vec![],
            linkedin_url: None,
            follower_count: None,
            founded_year: None,
            specialties: vec![],
            relevance_score: 80,
        }
    }

    #[tokio::test]
    async fn test_empty_input_skips_call() {
        let model = MockLanguageModel::new();
        let result = generate_insights(&[], &model, Duration::from_secs(5)).await;
        assert!(result.is_none());
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failure_is_silent() {
        let model = MockLanguageModel::new().fail_insights();
        let result = generate_insights(&[analysis()], &model, Duration::from_secs(5)).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_insights_returned() {
        let model = MockLanguageModel::new().with_insights("# Market Landscape\n...");
        let result = generate_insights(&[analysis()], &model, Duration::from_secs(5)).await;
        assert_eq!(result.as_deref(), Some("# Market Landscape\n..."));
    }
}
