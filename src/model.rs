//! Core data types for document analysis
//!
//! This module defines the values that flow through the pipeline:
//! - `AnalysisRequest`: what the user submitted (file, pasted text or URL)
//! - `AnalysisResult`: what the backend returned
//! - `RiskFlag` / `KeyClause`: the structured parts of a result
//! - `ChatTurn`: one line of the follow-up conversation

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;

use crate::error::ValidationError;

/// Minimum number of characters pasted text must contain (after trimming)
pub const MIN_PASTED_TEXT_CHARS: usize = 100;

/// Document name recorded for pasted text submissions
pub const PASTED_TEXT_NAME: &str = "Pasted Text";

/// A document submitted for analysis
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisRequest {
    /// Uploaded file contents
    File { name: String, bytes: Vec<u8> },
    /// Text pasted by the user
    PastedText { text: String },
    /// Remote document fetched by the backend
    Url { url: String },
}

impl AnalysisRequest {
    /// Build a file upload request
    pub fn file(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::File {
            name: name.into(),
            bytes,
        }
    }

    /// Read a file from disk into an upload request
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Ok(Self::file(name, bytes))
    }

    /// Build a pasted-text request
    ///
    /// Fails unless the trimmed text holds at least
    /// [`MIN_PASTED_TEXT_CHARS`] characters.
    pub fn pasted_text(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        let len = text.trim().chars().count();
        if len < MIN_PASTED_TEXT_CHARS {
            return Err(ValidationError::TextTooShort {
                len,
                min: MIN_PASTED_TEXT_CHARS,
            });
        }
        Ok(Self::PastedText { text })
    }

    /// Build a URL request
    ///
    /// Only presence is checked; the backend decides whether the URL is usable.
    pub fn url(url: &str) -> Result<Self, ValidationError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ValidationError::EmptyUrl);
        }
        Ok(Self::Url {
            url: url.to_string(),
        })
    }

    /// Name shown for this document on the dashboard
    pub fn document_name(&self) -> String {
        match self {
            Self::File { name, .. } if !name.is_empty() => name.clone(),
            Self::File { .. } | Self::PastedText { .. } => PASTED_TEXT_NAME.to_string(),
            Self::Url { url } => url.clone(),
        }
    }

    /// Short label used in log events
    pub fn kind(&self) -> &'static str {
        match self {
            Self::File { .. } => "file",
            Self::PastedText { .. } => "text",
            Self::Url { .. } => "url",
        }
    }
}

/// Structured analysis returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Plain-text summary of the whole document
    pub summary: String,
    /// Detected concerns, in backend order
    #[serde(default)]
    pub risk_flags: Vec<RiskFlag>,
    /// Notable passages with plain-language paraphrases
    #[serde(default)]
    pub key_clauses: Vec<KeyClause>,
    /// Text the backend extracted; used as chat context
    pub full_document_text: String,
}

/// A detected contractual concern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFlag {
    pub title: String,
    pub explanation: String,
    pub level: RiskLevel,
}

/// Severity of a risk flag
///
/// The backend emits `"Red"` / `"Yellow"`; matching ignores case. Any other
/// label is kept verbatim in `Other` so it survives a session round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskLevel {
    Red,
    Yellow,
    Other(String),
}

impl RiskLevel {
    /// Parse a level label, ignoring case
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "red" => Self::Red,
            "yellow" => Self::Yellow,
            _ => Self::Other(label.to_string()),
        }
    }

    /// Lowercase label, as used in CSS classes
    pub fn css_label(&self) -> String {
        match self {
            Self::Red => "red".to_string(),
            Self::Yellow => "yellow".to_string(),
            Self::Other(label) => label.trim().to_lowercase(),
        }
    }

    /// Presentation tier for this level
    pub fn tier(&self) -> RiskTier {
        match self {
            Self::Red => RiskTier::High,
            Self::Yellow | Self::Other(_) => RiskTier::Medium,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => write!(f, "Red"),
            Self::Yellow => write!(f, "Yellow"),
            Self::Other(label) => write!(f, "{}", label),
        }
    }
}

impl Serialize for RiskLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RiskLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::parse(&label))
    }
}

/// Fixed presentation tier derived from a risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    High,
    Medium,
}

impl RiskTier {
    /// Tooltip text
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High Risk",
            Self::Medium => "Medium Risk",
        }
    }

    /// Icon name
    pub fn icon(&self) -> &'static str {
        match self {
            Self::High => "alert-triangle",
            Self::Medium => "alert-circle",
        }
    }
}

/// A contract passage paired with a plain-language paraphrase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyClause {
    pub title: String,
    pub original_text: String,
    pub simplified_text: String,
}

/// Who produced a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the chat transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}
