use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input for the LinkedIn company-profile scraper actor.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyScraperInput {
    /// Company names or LinkedIn company page URLs.
    pub queries: Vec<String>,
    #[serde(rename = "resultsLimit")]
    pub results_limit: u32,
}

/// A LinkedIn company record from the Apify dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkedInCompany {
    #[serde(rename = "companyName")]
    pub company_name: Option<String>,
    #[serde(rename = "linkedinUrl")]
    pub linkedin_url: Option<String>,
    pub website: Option<String>,
    pub tagline: Option<String>,
    pub about: Option<String>,
    pub industry: Option<String>,
    #[serde(rename = "followerCount")]
    pub follower_count: Option<u64>,
    #[serde(rename = "employeeCount")]
    pub employee_count: Option<String>,
    #[serde(rename = "foundedYear")]
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub headquarters: Option<String>,
}

/// Wrapper for Apify API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Apify actor run metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RunData {
    pub id: String,
    pub status: String,
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: String,
    #[serde(rename = "startedAt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "finishedAt")]
    pub finished_at: Option<DateTime<Utc>>,
}
