//! Per-candidate raw data collected from external sources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Extracted website content from the Web Content Source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebContent {
    /// URL the content was fetched from (after redirects).
    pub url: String,

    /// Page title, if one could be extracted.
    pub title: Option<String>,

    /// Extracted page text.
    pub text: String,

    /// When the fetch completed.
    pub fetched_at: DateTime<Utc>,
}

impl WebContent {
    /// Create web content fetched now.
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            text: text.into(),
            fetched_at: Utc::now(),
        }
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Firmographic record from the Social Profile Source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialProfile {
    /// Company profile URL on the social platform.
    pub linkedin_url: Option<String>,

    /// Follower count on the platform.
    pub follower_count: Option<u64>,

    /// Stated employee count or range.
    pub employee_count: Option<String>,

    /// Year the company was founded.
    pub founded_year: Option<i32>,

    /// Listed specialties.
    #[serde(default)]
    pub specialties: Vec<String>,

    /// Headquarters location.
    pub headquarters: Option<String>,

    /// Profile description / about text.
    pub description: Option<String>,
}

/// Everything collected for one candidate before Synthesis.
///
/// Each field is present only if the corresponding source succeeded.
/// Absence is explicit so downstream code cannot mistake a failed fetch
/// for valid empty data. An empty collection means the candidate is
/// dropped without entering Synthesis.
#[derive(Debug, Clone, Default)]
pub struct RawCollection {
    /// Website payload, present only if the Web Content Source succeeded.
    pub website: Option<WebContent>,

    /// Social payload, present only if the Social Profile Source succeeded.
    pub social: Option<SocialProfile>,
}

impl RawCollection {
    /// True when both sub-fetches failed.
    pub fn is_empty(&self) -> bool {
        self.website.is_none() && self.social.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_collection_emptiness() {
        assert!(RawCollection::default().is_empty());

        let with_web = RawCollection {
            website: Some(WebContent::new("https://a.com", "text")),
            social: None,
        };
        assert!(!with_web.is_empty());

        let with_social = RawCollection {
            website: None,
            social: Some(SocialProfile::default()),
        };
        assert!(!with_social.is_empty());
    }
}
