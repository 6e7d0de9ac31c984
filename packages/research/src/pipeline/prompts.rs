//! Prompts for the pipeline's structured model calls.
//!
//! One prompt per schema: discovery, synthesis, market insights. The
//! templates spell out the exact JSON shape so any schema-capable model
//! client can satisfy the traits without vendor-specific prompt logic.

use crate::types::{Candidate, CompanyAnalysis, RawCollection, SearchConfig};

/// Template for the discovery call. Placeholders: `{limit}`, `{criteria}`.
pub const DISCOVERY_PROMPT: &str = r#"Task: Identify {limit} real companies matching these criteria:
{criteria}

CRITICAL INSTRUCTIONS:
- Return ONLY the official homepage URL for each company.
- DO NOT return links to news articles, blog posts, directories, or social
  profiles (Wikipedia, Clutch, LinkedIn, etc.).
- If the official site is unknown, exclude the company.

Output a JSON array of objects:
[
  {
    "name": "Company Name",
    "url": "https://company-official-website.com",
    "rationale": "One sentence: why this company matches."
  }
]"#;

/// Template for the synthesis call. Placeholders: `{name}`, `{homepage}`,
/// `{rationale}`, `{criteria}`, `{data}`.
pub const SYNTHESIS_PROMPT: &str = r#"Analyze the company "{name}" ({homepage}) against these requirements:
{criteria}

Discovery rationale: {rationale}

Collected data:
{data}

Output a single JSON object:
{
  "company_name": "str",
  "industry_classification": "str (the company's primary industry)",
  "employee_count_estimate": "str (e.g. 50-200) or null",
  "locations": ["City, Country"],
  "certifications": ["str"],
  "product_categories": ["str"],
  "summary": "Professional 1-2 sentence summary",
  "contact_info": "email/phone or null",
  "estimated_revenue": "str (e.g. $10M+) or null",
  "market_cap": "str (e.g. Private or $1B) or null",
  "strategic_goals": ["str"],
  "founded_year": int or null,
  "specialties": ["str"],
  "relevance_score": int (0-100, fit with the requirements)
}"#;

/// Template for the market-insights call. Placeholder: `{summaries}`.
pub const INSIGHTS_PROMPT: &str = r#"Synthesize a concise market research report from these analyzed companies:

{summaries}

Output a professional markdown report with these sections:
# Market Landscape
# Competitive Analysis
# Strategic Opportunities

Keep it concise."#;

/// Render the caller's criteria as prompt lines.
fn format_criteria(config: &SearchConfig) -> String {
    let mut lines = vec![
        format!("- Industries: {}", config.included_industries.join(", ")),
        format!("- Keywords: {}", config.required_keywords.join(", ")),
        format!("- Countries: {}", config.target_countries.join(", ")),
    ];
    if !config.excluded_industries.is_empty() {
        lines.push(format!(
            "- Excluded industries: {}",
            config.excluded_industries.join(", ")
        ));
    }
    if !config.excluded_keywords.is_empty() {
        lines.push(format!(
            "- Excluded keywords: {}",
            config.excluded_keywords.join(", ")
        ));
    }
    if !config.excluded_countries.is_empty() {
        lines.push(format!(
            "- Excluded countries: {}",
            config.excluded_countries.join(", ")
        ));
    }
    if let Some(min) = config.min_employees {
        lines.push(format!("- Minimum employees: {}", min));
    }
    if let Some(max) = config.max_employees {
        lines.push(format!("- Maximum employees: {}", max));
    }
    if !config.required_certifications.is_empty() {
        lines.push(format!(
            "- Required certifications: {}",
            config.required_certifications.join(", ")
        ));
    }
    if !config.required_product_categories.is_empty() {
        lines.push(format!(
            "- Required product categories: {}",
            config.required_product_categories.join(", ")
        ));
    }
    lines.join("\n")
}

/// Build the discovery prompt from a sanitized config.
pub fn format_discovery_prompt(config: &SearchConfig, limit: usize) -> String {
    DISCOVERY_PROMPT
        .replace("{limit}", &limit.to_string())
        .replace("{criteria}", &format_criteria(config))
}

// Website text is truncated to keep synthesis prompts within budget.
const MAX_WEBSITE_CHARS: usize = 4000;

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Render the collected payloads as a prompt section.
///
/// Only payloads that are actually present appear; a failed fetch leaves
/// no trace in the prompt.
fn format_collected_data(raw: &RawCollection) -> String {
    let mut sections = Vec::new();

    if let Some(web) = &raw.website {
        sections.push(format!(
            "WEBSITE ({})\nTitle: {}\n{}",
            web.url,
            web.title.as_deref().unwrap_or("(none)"),
            truncate_chars(&web.text, MAX_WEBSITE_CHARS),
        ));
    }

    if let Some(social) = &raw.social {
        let mut lines = vec!["SOCIAL PROFILE".to_string()];
        if let Some(url) = &social.linkedin_url {
            lines.push(format!("Profile: {}", url));
        }
        if let Some(count) = social.follower_count {
            lines.push(format!("Followers: {}", count));
        }
        if let Some(emp) = &social.employee_count {
            lines.push(format!("Employees: {}", emp));
        }
        if let Some(year) = social.founded_year {
            lines.push(format!("Founded: {}", year));
        }
        if !social.specialties.is_empty() {
            lines.push(format!("Specialties: {}", social.specialties.join(", ")));
        }
        if let Some(hq) = &social.headquarters {
            lines.push(format!("Headquarters: {}", hq));
        }
        if let Some(desc) = &social.description {
            lines.push(format!("About: {}", truncate_chars(desc, 2000)));
        }
        sections.push(lines.join("\n"));
    }

    sections.join("\n\n")
}

/// Build the synthesis prompt for one candidate.
pub fn format_synthesis_prompt(
    candidate: &Candidate,
    raw: &RawCollection,
    config: &SearchConfig,
) -> String {
    SYNTHESIS_PROMPT
        .replace("{name}", &candidate.name)
        .replace("{homepage}", candidate.homepage_url.as_str())
        .replace("{rationale}", &candidate.rationale)
        .replace("{criteria}", &format_criteria(config))
        .replace("{data}", &format_collected_data(raw))
}

/// Build the market-insights prompt over the surviving analyses.
pub fn format_insights_prompt(analyses: &[CompanyAnalysis]) -> String {
    let summaries: Vec<String> = analyses
        .iter()
        .map(|a| {
            format!(
                "- {}: {} (score {}/100, revenue {})",
                a.company_name,
                a.summary,
                a.relevance_score,
                a.estimated_revenue.as_deref().unwrap_or("Unknown"),
            )
        })
        .collect();

    INSIGHTS_PROMPT.replace("{summaries}", &summaries.join("\n"))
}
