//! Web content source trait.

use async_trait::async_trait;
use url::Url;

use crate::error::FetchResult;
use crate::types::WebContent;

/// Fetches and extracts the text of a company website.
///
/// Failures (timeout, non-2xx, parse failure) are recorded as absence by
/// the collector, never propagated as pipeline failures.
#[async_trait]
pub trait WebContentSource: Send + Sync {
    /// Fetch a page and return its extracted title and text.
    async fn fetch(&self, url: &Url) -> FetchResult<WebContent>;
}
