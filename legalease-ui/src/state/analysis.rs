//! Analysis Types
//!
//! Wire types from the analysis service and the checks run before a
//! submission leaves the page.

use serde::{Deserialize, Serialize};

/// Minimum trimmed length of pasted text
pub const MIN_PASTED_TEXT_CHARS: usize = 100;

/// Document name stored for pasted text
pub const PASTED_TEXT_NAME: &str = "Pasted Text";

pub const DOCUMENT_FAILURE_ALERT: &str = "Sorry, something went wrong. Please try again.";
pub const URL_FAILURE_ALERT: &str =
    "Failed to analyze URL. The site might be blocking bots or the URL is invalid.";
pub const SHORT_TEXT_ALERT: &str = "Please paste at least 100 characters.";
pub const EMPTY_URL_ALERT: &str = "Please enter a valid URL";

/// Analysis returned by `/analyzeDocument` and `/analyzeUrl`
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    #[serde(default)]
    pub risk_flags: Vec<RiskFlag>,
    #[serde(default)]
    pub key_clauses: Vec<KeyClause>,
    pub full_document_text: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RiskFlag {
    pub title: String,
    pub explanation: String,
    pub level: String,
}

impl RiskFlag {
    /// Red is high risk; every other level renders as medium
    pub fn tier(&self) -> RiskTier {
        if self.level.trim().eq_ignore_ascii_case("red") {
            RiskTier::High
        } else {
            RiskTier::Medium
        }
    }

    pub fn css_class(&self) -> String {
        format!("risk-item risk-{}", self.level.trim().to_lowercase())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskTier {
    High,
    Medium,
}

impl RiskTier {
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::High => "High Risk",
            RiskTier::Medium => "Medium Risk",
        }
    }

    /// Lucide icon name
    pub fn icon(&self) -> &'static str {
        match self {
            RiskTier::High => "alert-triangle",
            RiskTier::Medium => "alert-circle",
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeyClause {
    pub title: String,
    pub original_text: String,
    pub simplified_text: String,
}

/// Accept pasted text of at least [`MIN_PASTED_TEXT_CHARS`] after trimming.
/// The text itself is returned as pasted, surrounding whitespace included.
pub fn validate_pasted_text(text: &str) -> Result<&str, &'static str> {
    if text.trim().chars().count() < MIN_PASTED_TEXT_CHARS {
        return Err(SHORT_TEXT_ALERT);
    }
    Ok(text)
}

/// Accept any non-blank URL; the service decides whether it can be fetched
pub fn validate_url(url: &str) -> Result<&str, &'static str> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(EMPTY_URL_ALERT);
    }
    Ok(trimmed)
}
