//! Social profile source trait.

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::types::{Candidate, SocialProfile};

/// Fetches firmographic data for a company from a social platform.
///
/// The candidate carries both name and homepage; implementations may use
/// either to locate the profile. Failures are recorded as absence by the
/// collector.
#[async_trait]
pub trait SocialProfileSource: Send + Sync {
    /// Fetch the firmographic record for a candidate company.
    async fn fetch(&self, candidate: &Candidate) -> FetchResult<SocialProfile>;
}
