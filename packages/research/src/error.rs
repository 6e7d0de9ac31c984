//! Typed errors for the research pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. The taxonomy mirrors the
//! failure policy: `DiscoveryError` is fatal for a run, `SynthesisError`
//! and `FetchError` are confined to a single candidate, and `ConfigError`
//! is rejected synchronously before any external call is made.

use thiserror::Error;

/// Validation errors for a [`crate::SearchConfig`].
///
/// Reported synchronously to the caller, never as a stream event.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required list field is empty after blank entries are stripped.
    #[error("required field is empty: {field}")]
    MissingField { field: &'static str },

    /// `min_employees` exceeds `max_employees`.
    #[error("invalid employee range: min {min} > max {max}")]
    InvalidEmployeeRange { min: u64, max: u64 },
}

/// Errors from the Language Model Client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Non-success status from the model API
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the requested schema
    #[error("unparsable model response: {0}")]
    Unparsable(String),

    /// Call exceeded its deadline
    #[error("model call timed out")]
    Timeout,

    /// Missing or invalid configuration (API key, base URL)
    #[error("config error: {0}")]
    Config(String),
}

/// Errors from the Web Content Source or Social Profile Source.
///
/// Always caught at the collector call site and converted into absence:
/// a `FetchError` never aborts a run or a sibling candidate.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Non-2xx response
    #[error("HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    /// Fetch exceeded its deadline
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// Invalid URL or company identifier
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// Response could not be parsed into the expected record
    #[error("unparsable response: {0}")]
    Unparsable(String),
}

/// Fatal discovery failure: the run emits `error` and terminates.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The model call itself failed
    #[error("discovery call failed: {0}")]
    Client(#[from] ClientError),

    /// The model returned zero usable candidates after URL validation
    #[error("no usable candidates returned")]
    NoCandidates,
}

/// Non-fatal synthesis failure: the candidate is dropped, the run continues.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// The model call itself failed
    #[error("synthesis call failed: {0}")]
    Client(#[from] ClientError),

    /// The model returned a draft that cannot be used
    #[error("rejected draft: {reason}")]
    RejectedDraft { reason: String },
}

/// Result type alias for model client operations.
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Result type alias for source fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;
