//! HTTP-based web content source.
//!
//! A basic fetch-and-extract implementation suitable for most company
//! websites: one GET per homepage, title from the `<title>` tag, text by
//! stripping markup. JavaScript-heavy sites will yield thin text, which
//! degrades a single candidate, never the run.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, warn};
use url::Url;

use crate::error::{FetchError, FetchResult};
use crate::traits::WebContentSource;
use crate::types::WebContent;

/// Web content source backed by a plain HTTP client.
///
/// # Example
///
/// ```rust,ignore
/// use research::sources::HttpWebSource;
///
/// let source = HttpWebSource::new().with_user_agent("ResearchBot/1.0");
/// let content = source.fetch(&url).await?;
/// ```
pub struct HttpWebSource {
    client: reqwest::Client,
    user_agent: String,
}

impl Default for HttpWebSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpWebSource {
    /// Create a new source with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            user_agent: "ResearchBot/1.0".to_string(),
        }
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Extract title from HTML.
    fn extract_title(html: &str) -> Option<String> {
        let title_pattern = regex::Regex::new(r"(?s)<title[^>]*>(.*?)</title>").ok()?;
        title_pattern
            .captures(html)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// Strip markup down to readable text.
    fn html_to_text(html: &str) -> String {
        let mut text = html.to_string();

        // Remove scripts and styles
        let script_pattern = regex::Regex::new(r"(?s)<script[^>]*>.*?</script>").unwrap();
        let style_pattern = regex::Regex::new(r"(?s)<style[^>]*>.*?</style>").unwrap();
        text = script_pattern.replace_all(&text, "").to_string();
        text = style_pattern.replace_all(&text, "").to_string();

        // Block-level elements become line breaks
        let block_pattern =
            regex::Regex::new(r"</(p|div|h1|h2|h3|h4|li|tr|section|article)>").unwrap();
        text = block_pattern.replace_all(&text, "\n").to_string();
        let br_pattern = regex::Regex::new(r"<br\s*/?>").unwrap();
        text = br_pattern.replace_all(&text, "\n").to_string();

        // Remove remaining tags
        let tag_pattern = regex::Regex::new(r"<[^>]+>").unwrap();
        text = tag_pattern.replace_all(&text, "").to_string();

        // Clean up whitespace
        let multi_newline = regex::Regex::new(r"\n{3,}").unwrap();
        text = multi_newline.replace_all(&text, "\n\n").to_string();

        // Decode common HTML entities
        text = text
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        text.trim().to_string()
    }
}

#[async_trait]
impl WebContentSource for HttpWebSource {
    async fn fetch(&self, url: &Url) -> FetchResult<WebContent> {
        debug!(url = %url, "HTTP fetch starting");
        let response = self
            .client
            .get(url.clone())
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "HTTP request failed");
                FetchError::Http(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // Capture final URL after redirects
        let final_url = response.url().to_string();

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        let title = Self::extract_title(&html);
        let text = Self::html_to_text(&html);

        let mut content = WebContent {
            url: final_url,
            title: None,
            text,
            fetched_at: Utc::now(),
        };
        if let Some(title) = title {
            content = content.with_title(title);
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title() {
        let html = "<html><head><title> Acme Corp | Payments </title></head></html>";
        assert_eq!(
            HttpWebSource::extract_title(html).as_deref(),
            Some("Acme Corp | Payments")
        );
        assert!(HttpWebSource::extract_title("<html></html>").is_none());
        assert!(HttpWebSource::extract_title("<title></title>").is_none());
    }

    #[test]
    fn test_html_to_text_strips_markup() {
        let html = r#"<html><head><style>p{color:red}</style>
            <script>alert(1)</script></head>
            <body><h1>Acme</h1><p>Payments &amp; APIs</p></body></html>"#;
        let text = HttpWebSource::html_to_text(html);
        assert!(text.contains("Acme"));
        assert!(text.contains("Payments & APIs"));
        assert!(!text.contains("alert"));
        assert!(!text.contains("color:red"));
        assert!(!text.contains('<'));
    }
}
