use thiserror::Error;

/// Errors from the Apify platform API.
#[derive(Debug, Error)]
pub enum ApifyError {
    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the API
    #[error("Apify API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The actor run finished in a non-success state
    #[error("Apify run finished with status {0}")]
    RunFailed(String),
}

pub type Result<T> = std::result::Result<T, ApifyError>;
