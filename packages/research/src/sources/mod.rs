//! Source implementations for the external collaborator seams.

pub mod http;

#[cfg(feature = "apify")]
pub mod apify;

pub use http::HttpWebSource;

#[cfg(feature = "apify")]
pub use apify::ApifySocialSource;
