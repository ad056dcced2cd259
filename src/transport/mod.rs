//! Analysis Backend Transport
//!
//! Outbound calls to the remote analysis service. Three endpoints exist:
//!
//! - `POST /analyzeDocument`: multipart upload, returns an [`AnalysisResult`]
//! - `POST /analyzeUrl`: JSON `{url}`, returns an [`AnalysisResult`]
//! - `POST /askQuestion`: JSON `{question, context}`, returns `{answer}`
//!
//! Every call is a single request with no retry. A non-2xx status, an
//! `error` field in the body and a missing response all map to
//! [`TransportError`].

mod http;
#[cfg(test)]
pub(crate) mod fake;

pub use http::{HttpBackend, HttpBackendConfig};

use async_trait::async_trait;
use thiserror::Error;

use crate::model::AnalysisResult;

/// A document payload ready for multipart upload
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentUpload {
    /// File name reported in the multipart part
    pub file_name: String,
    /// MIME type of the part
    pub mime_type: String,
    /// Raw document bytes
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    /// File name used for pasted text
    pub const PASTED_TEXT_FILE: &'static str = "pasted-text.txt";

    /// Upload for a file, with a MIME type guessed from its extension
    pub fn file(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = guess_mime_type(&file_name);
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    /// Upload for pasted text
    pub fn text(text: &str) -> Self {
        Self {
            file_name: Self::PASTED_TEXT_FILE.to_string(),
            mime_type: "text/plain".to_string(),
            bytes: text.as_bytes().to_vec(),
        }
    }
}

/// The service reads PDF and plain text; anything else goes up as raw bytes
const ACCEPTED_MIME_TYPES: &[&str] = &["application/pdf", "text/plain"];

fn guess_mime_type(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .iter()
        .map(|mime| mime.essence_str().to_string())
        .find(|mime| ACCEPTED_MIME_TYPES.contains(&mime.as_str()))
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

/// The remote analysis service
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Analyze an uploaded document
    async fn analyze_document(
        &self,
        upload: &DocumentUpload,
    ) -> Result<AnalysisResult, TransportError>;

    /// Analyze a document the backend fetches from `url`
    async fn analyze_url(&self, url: &str) -> Result<AnalysisResult, TransportError>;

    /// Answer `question` using `context` as the only source
    async fn ask_question(&self, question: &str, context: &str) -> Result<String, TransportError>;
}

/// Errors that can occur when talking to the analysis backend
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Backend unreachable: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Backend reported an error: {0}")]
    Application(String),

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}
