//! Configuration types: the caller's search criteria and pipeline tuning.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Immutable search criteria submitted by the caller.
///
/// Unknown JSON fields are ignored on deserialization. Blank list entries
/// are stripped by [`SearchConfig::sanitized`]; validation happens before
/// any external call via [`SearchConfig::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Industries the company must belong to (at least one required).
    pub included_industries: Vec<String>,

    /// Industries that disqualify a company.
    #[serde(default)]
    pub excluded_industries: Vec<String>,

    /// Keywords that must be present (at least one required).
    pub required_keywords: Vec<String>,

    /// Keywords that disqualify a company.
    #[serde(default)]
    pub excluded_keywords: Vec<String>,

    /// Minimum employee count.
    #[serde(default)]
    pub min_employees: Option<u64>,

    /// Maximum employee count.
    #[serde(default)]
    pub max_employees: Option<u64>,

    /// Target countries or regions (at least one required).
    pub target_countries: Vec<String>,

    /// Countries that disqualify a company.
    #[serde(default)]
    pub excluded_countries: Vec<String>,

    /// Required certifications (e.g. ISO 9001).
    #[serde(default)]
    pub required_certifications: Vec<String>,

    /// Required product categories.
    #[serde(default)]
    pub required_product_categories: Vec<String>,
}

fn strip_blanks(list: &[String]) -> Vec<String> {
    list.iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

impl SearchConfig {
    /// Return a copy with blank entries stripped from every list field.
    pub fn sanitized(&self) -> Self {
        Self {
            included_industries: strip_blanks(&self.included_industries),
            excluded_industries: strip_blanks(&self.excluded_industries),
            required_keywords: strip_blanks(&self.required_keywords),
            excluded_keywords: strip_blanks(&self.excluded_keywords),
            min_employees: self.min_employees,
            max_employees: self.max_employees,
            target_countries: strip_blanks(&self.target_countries),
            excluded_countries: strip_blanks(&self.excluded_countries),
            required_certifications: strip_blanks(&self.required_certifications),
            required_product_categories: strip_blanks(&self.required_product_categories),
        }
    }

    /// Validate the (already sanitized) config.
    ///
    /// Required lists must be non-empty and the employee range must be
    /// ordered. Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.included_industries.is_empty() {
            return Err(ConfigError::MissingField {
                field: "included_industries",
            });
        }
        if self.required_keywords.is_empty() {
            return Err(ConfigError::MissingField {
                field: "required_keywords",
            });
        }
        if self.target_countries.is_empty() {
            return Err(ConfigError::MissingField {
                field: "target_countries",
            });
        }
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(ConfigError::InvalidEmployeeRange { min, max });
            }
        }
        Ok(())
    }
}

/// Tuning knobs for one pipeline run.
///
/// Timeouts apply per external call; a timed-out call is a failure of
/// that call only and is never retried by the orchestrator.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum candidates processed concurrently.
    pub concurrency: usize,

    /// Number of candidates requested from Discovery.
    pub discovery_limit: usize,

    /// Deadline for a single website fetch.
    pub web_timeout: Duration,

    /// Deadline for a single social-profile fetch.
    pub social_timeout: Duration,

    /// Deadline for a single model call (discovery, synthesis, insights).
    pub model_timeout: Duration,

    /// Capacity of the outward event channel.
    pub channel_capacity: usize,

    /// Skip the aggregate market-insights call entirely.
    pub skip_insights: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            discovery_limit: 10,
            web_timeout: Duration::from_secs(30),
            social_timeout: Duration::from_secs(60),
            model_timeout: Duration::from_secs(90),
            channel_capacity: 64,
            skip_insights: false,
        }
    }
}

impl PipelineConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker pool size.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set the number of candidates requested from Discovery.
    pub fn with_discovery_limit(mut self, limit: usize) -> Self {
        self.discovery_limit = limit.max(1);
        self
    }

    /// Set the website fetch deadline.
    pub fn with_web_timeout(mut self, timeout: Duration) -> Self {
        self.web_timeout = timeout;
        self
    }

    /// Set the social-profile fetch deadline.
    pub fn with_social_timeout(mut self, timeout: Duration) -> Self {
        self.social_timeout = timeout;
        self
    }

    /// Set the model call deadline.
    pub fn with_model_timeout(mut self, timeout: Duration) -> Self {
        self.model_timeout = timeout;
        self
    }

    /// Disable the aggregate market-insights step.
    pub fn without_insights(mut self) -> Self {
        self.skip_insights = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> SearchConfig {
        serde_json::from_value(serde_json::json!({
            "included_industries": ["Fintech"],
            "required_keywords": ["api"],
            "target_countries": ["USA"]
        }))
        .unwrap()
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let config: SearchConfig = serde_json::from_value(serde_json::json!({
            "included_industries": ["Fintech"],
            "required_keywords": ["api"],
            "target_countries": ["USA"],
            "some_future_field": 42
        }))
        .unwrap();
        assert_eq!(config.included_industries, vec!["Fintech"]);
    }

    #[test]
    fn test_sanitize_strips_blanks() {
        let mut config = minimal();
        config.included_industries = vec!["  Fintech ".into(), "   ".into(), "".into()];
        let clean = config.sanitized();
        assert_eq!(clean.included_industries, vec!["Fintech"]);
    }

    #[test]
    fn test_validate_rejects_empty_required_list() {
        let mut config = minimal();
        config.target_countries = vec!["  ".into()];
        let err = config.sanitized().validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField {
                field: "target_countries"
            }
        ));
    }

    #[test]
    fn test_validate_employee_range() {
        let mut config = minimal();
        config.min_employees = Some(500);
        config.max_employees = Some(50);
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::InvalidEmployeeRange { min: 500, max: 50 }
        ));

        config.max_employees = Some(500);
        assert!(config.validate().is_ok());

        // One-sided bounds are fine
        config.max_employees = None;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pipeline_config_builders() {
        let config = PipelineConfig::new()
            .with_concurrency(0)
            .with_discovery_limit(3)
            .without_insights();
        assert_eq!(config.concurrency, 1); // floor of 1
        assert_eq!(config.discovery_limit, 3);
        assert!(config.skip_insights);
    }
}
