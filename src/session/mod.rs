//! Session Store
//!
//! Key/value area that carries the last analysis from the entry page to the
//! dashboard page. The two pages never share memory; they meet only here.
//!
//! ## Keys
//!
//! - `documentName`: name shown on the dashboard
//! - `analysisResult`: serialized [`AnalysisResult`]
//! - `fullDocumentText`: extracted text, used as chat context
//!
//! [`AnalysisSession`] is the typed read/write contract over these keys.
//! Backends implement the raw [`SessionStore`] trait.

mod file;
mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

use thiserror::Error;

use crate::model::AnalysisResult;

pub const DOCUMENT_NAME_KEY: &str = "documentName";
pub const ANALYSIS_RESULT_KEY: &str = "analysisResult";
pub const FULL_DOCUMENT_TEXT_KEY: &str = "fullDocumentText";

/// Raw string key/value storage scoped to one session
pub trait SessionStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> SessionResult<Option<String>>;

    /// Write several values as one unit
    fn set_many(&self, entries: &[(&str, String)]) -> SessionResult<()>;

    /// Remove every key
    fn clear(&self) -> SessionResult<()>;
}

/// The analysis handed from the entry page to the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSession {
    pub document_name: String,
    pub result: AnalysisResult,
}

impl AnalysisSession {
    pub fn new(document_name: impl Into<String>, result: AnalysisResult) -> Self {
        Self {
            document_name: document_name.into(),
            result,
        }
    }

    /// Write all three session keys
    pub fn save(&self, store: &dyn SessionStore) -> SessionResult<()> {
        let serialized = serde_json::to_string(&self.result)?;
        store.set_many(&[
            (DOCUMENT_NAME_KEY, self.document_name.clone()),
            (ANALYSIS_RESULT_KEY, serialized),
            (FULL_DOCUMENT_TEXT_KEY, self.result.full_document_text.clone()),
        ])?;

        tracing::debug!(
            document = %self.document_name,
            risk_flags = self.result.risk_flags.len(),
            key_clauses = self.result.key_clauses.len(),
            "Saved analysis to session"
        );
        Ok(())
    }

    /// Read the analysis back
    ///
    /// Returns `Ok(None)` when either the result or the document name is
    /// absent.
    pub fn load(store: &dyn SessionStore) -> SessionResult<Option<Self>> {
        let (Some(serialized), Some(document_name)) =
            (store.get(ANALYSIS_RESULT_KEY)?, store.get(DOCUMENT_NAME_KEY)?)
        else {
            return Ok(None);
        };

        let result: AnalysisResult = serde_json::from_str(&serialized)?;
        Ok(Some(Self {
            document_name,
            result,
        }))
    }
}

/// Chat context stored alongside the analysis
pub fn document_text(store: &dyn SessionStore) -> SessionResult<Option<String>> {
    store.get(FULL_DOCUMENT_TEXT_KEY)
}

/// Errors that can occur in the session store
#[derive(Error, Debug)]
pub enum SessionError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Lock acquisition failed
    #[error("Lock error: {0}")]
    Lock(String),
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;
