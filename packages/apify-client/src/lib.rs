//! Pure Apify REST API client.
//!
//! A minimal client for the Apify platform API. Supports starting actor
//! runs, polling for completion, and fetching dataset results.
//!
//! # Example
//!
//! ```rust,ignore
//! use apify_client::ApifyClient;
//!
//! let client = ApifyClient::new("your-api-token".into());
//!
//! let companies = client.scrape_company_profiles(&["Acme Corp".into()], 1).await?;
//! for company in &companies {
//!     println!("{}", company.company_name.as_deref().unwrap_or("(unnamed)"));
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{ApifyError, Result};
pub use types::{CompanyScraperInput, LinkedInCompany, RunData};

use serde::de::DeserializeOwned;
use types::ApiResponse;

const BASE_URL: &str = "https://api.apify.com/v2";

/// Actor ID for the LinkedIn company-profile scraper.
const COMPANY_PROFILE_SCRAPER: &str = "bebity~linkedin-company-scraper";

pub struct ApifyClient {
    client: reqwest::Client,
    token: String,
}

impl ApifyClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
        }
    }

    /// Start a company-profile scrape run. Returns immediately with run metadata.
    pub async fn start_company_scrape(
        &self,
        queries: &[String],
        limit: u32,
    ) -> Result<RunData> {
        let input = CompanyScraperInput {
            queries: queries.to_vec(),
            results_limit: limit,
        };

        let url = format!("{}/acts/{}/runs", BASE_URL, COMPANY_PROFILE_SCRAPER);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&input)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let api_resp: ApiResponse<RunData> = resp.json().await?;
        Ok(api_resp.data)
    }

    /// Poll until a run completes. Uses `waitForFinish=60` for efficient long-polling.
    pub async fn wait_for_run(&self, run_id: &str) -> Result<RunData> {
        loop {
            let url = format!("{}/actor-runs/{}?waitForFinish=60", BASE_URL, run_id);
            let resp = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(ApifyError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let api_resp: ApiResponse<RunData> = resp.json().await?;
            match api_resp.data.status.as_str() {
                "SUCCEEDED" => return Ok(api_resp.data),
                "FAILED" | "ABORTED" | "TIMED-OUT" => {
                    return Err(ApifyError::RunFailed(api_resp.data.status));
                }
                _ => {
                    tracing::debug!(run_id, status = %api_resp.data.status, "Run still in progress");
                    continue;
                }
            }
        }
    }

    /// Fetch dataset items from a completed run.
    pub async fn get_dataset_items<T: DeserializeOwned>(
        &self,
        dataset_id: &str,
    ) -> Result<Vec<T>> {
        let url = format!("{}/datasets/{}/items?format=json", BASE_URL, dataset_id);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let items: Vec<T> = resp.json().await?;
        Ok(items)
    }

    /// Scrape company profiles end-to-end: start run, poll, fetch results.
    pub async fn scrape_company_profiles(
        &self,
        queries: &[String],
        limit: u32,
    ) -> Result<Vec<LinkedInCompany>> {
        tracing::info!(count = queries.len(), limit, "Starting company profile scrape");

        let run = self.start_company_scrape(queries, limit).await?;
        tracing::info!(run_id = %run.id, "Apify run started, polling for completion");

        let completed = self.wait_for_run(&run.id).await?;
        tracing::info!(
            run_id = %completed.id,
            dataset_id = %completed.default_dataset_id,
            "Run completed, fetching results"
        );

        let companies: Vec<LinkedInCompany> = self
            .get_dataset_items(&completed.default_dataset_id)
            .await?;
        tracing::info!(count = companies.len(), "Fetched company profiles");

        Ok(companies)
    }
}
