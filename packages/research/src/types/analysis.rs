//! The final output unit: a scored company analysis.

use serde::{Deserialize, Serialize};

/// A verified company profile, produced once per surviving candidate.
///
/// Immutable after emission. `relevance_score` is always within [0,100];
/// the orchestrator clamps it before emission regardless of what the
/// model returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyAnalysis {
    pub company_name: String,

    /// Official homepage. Always the candidate's discovered URL, never a
    /// social profile link.
    pub website: String,

    /// Whether the company's industry overlaps the requested industries.
    pub industry_match: bool,

    pub employee_count_estimate: Option<String>,

    pub locations: Vec<String>,

    pub certifications: Vec<String>,

    pub product_categories: Vec<String>,

    pub summary: String,

    pub contact_info: Option<String>,

    #[serde(default)]
    pub estimated_revenue: Option<String>,

    #[serde(default)]
    pub market_cap: Option<String>,

    #[serde(default)]
    pub strategic_goals: Vec<String>,

    // Social-platform fields, populated from the social payload when present
    #[serde(default)]
    pub linkedin_url: Option<String>,

    #[serde(default)]
    pub follower_count: Option<u64>,

    #[serde(default)]
    pub founded_year: Option<i32>,

    #[serde(default)]
    pub specialties: Vec<String>,

    /// Fit with the search criteria, 0–100 inclusive.
    pub relevance_score: u8,
}

/// Raw synthesis output before local post-processing.
///
/// The model's score is an unbounded integer here; the orchestrator
/// clamps it. `industry_classification` feeds the local industry-match
/// cross-check; the model's own judgement is not trusted directly.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisDraft {
    pub company_name: String,

    /// The model's stated industry classification (free text).
    #[serde(default)]
    pub industry_classification: String,

    #[serde(default)]
    pub employee_count_estimate: Option<String>,

    #[serde(default)]
    pub locations: Vec<String>,

    #[serde(default)]
    pub certifications: Vec<String>,

    #[serde(default)]
    pub product_categories: Vec<String>,

    pub summary: String,

    #[serde(default)]
    pub contact_info: Option<String>,

    #[serde(default)]
    pub estimated_revenue: Option<String>,

    #[serde(default)]
    pub market_cap: Option<String>,

    #[serde(default)]
    pub strategic_goals: Vec<String>,

    #[serde(default)]
    pub founded_year: Option<i32>,

    #[serde(default)]
    pub specialties: Vec<String>,

    pub relevance_score: i64,
}
