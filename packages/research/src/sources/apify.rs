//! Apify-backed social profile source.
//!
//! Wraps the LinkedIn company-profile scraper actor. One actor run per
//! candidate; the actor's own retries and proxying are its concern.

use apify_client::{ApifyClient, ApifyError, LinkedInCompany};
use async_trait::async_trait;
use tracing::debug;

use crate::error::{FetchError, FetchResult};
use crate::traits::SocialProfileSource;
use crate::types::{Candidate, SocialProfile};

/// Social profile source backed by the Apify platform.
pub struct ApifySocialSource {
    client: ApifyClient,
}

impl ApifySocialSource {
    /// Create a source with the given Apify API token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: ApifyClient::new(token.into()),
        }
    }
}

fn map_error(e: ApifyError) -> FetchError {
    match e {
        ApifyError::Http(e) => FetchError::Http(Box::new(e)),
        ApifyError::Api { status, message } => {
            // Fold API-level failures into the status taxonomy
            FetchError::Status {
                status,
                url: message,
            }
        }
        ApifyError::RunFailed(status) => FetchError::Unparsable(format!("actor run {}", status)),
    }
}

fn map_company(record: LinkedInCompany) -> SocialProfile {
    SocialProfile {
        linkedin_url: record.linkedin_url,
        follower_count: record.follower_count,
        employee_count: record.employee_count,
        founded_year: record.founded_year,
        specialties: record.specialties,
        headquarters: record.headquarters,
        description: record.about.or(record.tagline),
    }
}

#[async_trait]
impl SocialProfileSource for ApifySocialSource {
    async fn fetch(&self, candidate: &Candidate) -> FetchResult<SocialProfile> {
        debug!(company = %candidate.name, "Apify company profile fetch");
        let records = self
            .client
            .scrape_company_profiles(&[candidate.name.clone()], 1)
            .await
            .map_err(map_error)?;

        records
            .into_iter()
            .next()
            .map(map_company)
            .ok_or_else(|| FetchError::InvalidTarget(candidate.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_company_prefers_about_over_tagline() {
        let record: LinkedInCompany = serde_json::from_value(serde_json::json!({
            "companyName": "Acme",
            "linkedinUrl": "https://linkedin.com/company/acme",
            "followerCount": 12000,
            "about": "Long about text",
            "tagline": "Short tagline",
            "specialties": ["payments"]
        }))
        .unwrap();

        let profile = map_company(record);
        assert_eq!(profile.description.as_deref(), Some("Long about text"));
        assert_eq!(profile.follower_count, Some(12_000));
        assert_eq!(profile.specialties, vec!["payments"]);
    }
}
