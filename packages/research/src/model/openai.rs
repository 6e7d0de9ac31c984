//! OpenAI implementation of [`LanguageModelClient`].
//!
//! Uses the chat completions endpoint with `json_schema` response_format
//! for the two structured calls, and a plain chat completion for the
//! free-text insights report.
//!
//! # Example
//!
//! ```rust,ignore
//! use research::model::OpenAiModel;
//!
//! let model = OpenAiModel::new("sk-...").with_model("gpt-4o");
//! let pipeline = ResearchPipeline::new(model, web, social);
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::security::SecretString;
use crate::traits::LanguageModelClient;
use crate::types::{AnalysisDraft, CandidateDraft};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o";

const DISCOVERY_SYSTEM: &str =
    "You are a market research assistant. You identify real companies and \
     return only verifiable official homepage URLs. Respond with JSON only.";

const SYNTHESIS_SYSTEM: &str =
    "You are a company analyst. You produce factual, conservative company \
     profiles strictly from the provided data. Respond with JSON only.";

const INSIGHTS_SYSTEM: &str =
    "You are a market research analyst. You write concise, professional \
     markdown reports.";

/// OpenAI-backed language model client.
#[derive(Clone)]
pub struct OpenAiModel {
    client: Client,
    api_key: SecretString,
    model: String,
    base_url: String,
}

impl OpenAiModel {
    /// Create a client with the given API key.
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> ClientResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ClientError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set the chat model (default: gpt-4o).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Structured output with JSON schema (OpenAI's json_schema response_format).
    async fn generate_structured(
        &self,
        system: &str,
        user: &str,
        schema_name: &str,
        schema: serde_json::Value,
    ) -> ClientResult<String> {
        let request = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "temperature": 0.0,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": schema_name,
                    "strict": false,
                    "schema": schema,
                },
            },
        });

        self.send_chat(&request).await
    }

    /// Plain chat completion, no response schema.
    async fn chat(&self, system: &str, user: &str) -> ClientResult<String> {
        let request = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "temperature": 0.0,
            "max_tokens": 4096,
        });

        self.send_chat(&request).await
    }

    async fn send_chat(&self, request: &serde_json::Value) -> ClientResult<String> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose()),
            )
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse =
            response.json().await.map_err(map_reqwest_error)?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ClientError::Unparsable("no choices in response".into()))
    }
}

fn map_reqwest_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Http(Box::new(e))
    }
}

/// Strip markdown code fences some models wrap around JSON output.
fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

// json_schema response_format requires an object root, so the discovery
// array is wrapped in a `candidates` field.
#[derive(Deserialize)]
struct DiscoveryResponse {
    #[serde(default)]
    candidates: Vec<CandidateDraft>,
}

fn discovery_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "candidates": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "url": { "type": "string" },
                        "rationale": { "type": "string" },
                    },
                    "required": ["name", "url"],
                    "additionalProperties": false,
                },
            },
        },
        "required": ["candidates"],
        "additionalProperties": false,
    })
}

fn synthesis_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "company_name": { "type": "string" },
            "industry_classification": { "type": "string" },
            "employee_count_estimate": { "type": ["string", "null"] },
            "locations": { "type": "array", "items": { "type": "string" } },
            "certifications": { "type": "array", "items": { "type": "string" } },
            "product_categories": { "type": "array", "items": { "type": "string" } },
            "summary": { "type": "string" },
            "contact_info": { "type": ["string", "null"] },
            "estimated_revenue": { "type": ["string", "null"] },
            "market_cap": { "type": ["string", "null"] },
            "strategic_goals": { "type": "array", "items": { "type": "string" } },
            "founded_year": { "type": ["integer", "null"] },
            "specialties": { "type": "array", "items": { "type": "string" } },
            "relevance_score": { "type": "integer" },
        },
        "required": ["company_name", "summary", "relevance_score"],
        "additionalProperties": false,
    })
}

#[async_trait]
impl LanguageModelClient for OpenAiModel {
    async fn discover(&self, prompt: &str) -> ClientResult<Vec<CandidateDraft>> {
        debug!(model = %self.model, "Discovery call");
        let wrapped = format!(
            "{}\n\nWrap the array in an object: {{\"candidates\": [...]}}",
            prompt
        );
        let content = self
            .generate_structured(
                DISCOVERY_SYSTEM,
                &wrapped,
                "company_candidates",
                discovery_schema(),
            )
            .await?;

        let parsed: DiscoveryResponse = serde_json::from_str(strip_fences(&content))
            .map_err(|e| ClientError::Unparsable(e.to_string()))?;
        Ok(parsed.candidates)
    }

    async fn synthesize(&self, prompt: &str) -> ClientResult<AnalysisDraft> {
        debug!(model = %self.model, "Synthesis call");
        let content = self
            .generate_structured(
                SYNTHESIS_SYSTEM,
                prompt,
                "company_analysis",
                synthesis_schema(),
            )
            .await?;

        serde_json::from_str(strip_fences(&content))
            .map_err(|e| ClientError::Unparsable(e.to_string()))
    }

    async fn market_insights(&self, prompt: &str) -> ClientResult<String> {
        debug!(model = %self.model, "Insights call");
        self.chat(INSIGHTS_SYSTEM, prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fences_handles_fenced_and_bare_json() {
        assert_eq!(strip_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_fences("```\n[]\n```"), "[]");
        assert_eq!(strip_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn test_discovery_response_tolerates_missing_rationale() {
        let parsed: DiscoveryResponse = serde_json::from_str(
            r#"{"candidates": [{"name": "Acme", "url": "https://acme.example"}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.candidates.len(), 1);
        assert_eq!(parsed.candidates[0].name, "Acme");
    }

    #[test]
    fn test_schemas_are_objects() {
        assert!(discovery_schema().is_object());
        assert!(synthesis_schema().is_object());
    }
}
