//! HTTP Backend Client
//!
//! `reqwest` implementation of [`AnalysisBackend`].

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{AnalysisBackend, DocumentUpload, TransportError};
use crate::config::BackendConfig;
use crate::model::AnalysisResult;

/// Configuration for the HTTP backend
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Service origin, without a trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        BackendConfig::default().into()
    }
}

impl From<BackendConfig> for HttpBackendConfig {
    fn from(config: BackendConfig) -> Self {
        Self {
            request_timeout: config.request_timeout(),
            base_url: config.base_url,
        }
    }
}

/// Analysis backend reached over HTTP
pub struct HttpBackend {
    client: Client,
    config: HttpBackendConfig,
}

impl HttpBackend {
    /// Create a new backend client with the given configuration
    pub fn new(config: HttpBackendConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let config = HttpBackendConfig {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ..config
        };

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &HttpBackendConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }
}

#[async_trait]
impl AnalysisBackend for HttpBackend {
    async fn analyze_document(
        &self,
        upload: &DocumentUpload,
    ) -> Result<AnalysisResult, TransportError> {
        let url = self.endpoint("analyzeDocument");

        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime_type)?;
        let form = Form::new().part("document", part);

        tracing::debug!(
            url = %url,
            file_name = %upload.file_name,
            bytes = upload.bytes.len(),
            "Uploading document"
        );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(classify)?;

        decode(response).await
    }

    async fn analyze_url(&self, url: &str) -> Result<AnalysisResult, TransportError> {
        let endpoint = self.endpoint("analyzeUrl");

        tracing::debug!(url = %endpoint, target = %url, "Requesting URL analysis");

        let response = self
            .client
            .post(&endpoint)
            .json(&AnalyzeUrlRequest { url })
            .send()
            .await
            .map_err(classify)?;

        decode(response).await
    }

    async fn ask_question(&self, question: &str, context: &str) -> Result<String, TransportError> {
        let url = self.endpoint("askQuestion");

        tracing::debug!(
            url = %url,
            question_len = question.len(),
            context_len = context.len(),
            "Asking question"
        );

        let response = self
            .client
            .post(&url)
            .json(&AskQuestionRequest { question, context })
            .send()
            .await
            .map_err(classify)?;

        let answer: AnswerResponse = decode(response).await?;
        Ok(answer.answer)
    }
}

/// Map a send failure to the transport taxonomy
fn classify(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Network(e.to_string())
    } else {
        TransportError::Request(e)
    }
}

/// Decode a response body, honouring status codes and `{error}` bodies
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
    let status = response.status();
    let body = response.text().await.map_err(classify)?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        return Err(TransportError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let value: serde_json::Value =
        serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))?;

    if let Some(error) = value.get("error").and_then(|e| e.as_str()) {
        return Err(TransportError::Application(error.to_string()));
    }

    serde_json::from_value(value).map_err(|e| TransportError::Decode(e.to_string()))
}

// ============================================
// Request/Response DTOs
// ============================================

#[derive(Debug, Serialize)]
struct AnalyzeUrlRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Serialize)]
struct AskQuestionRequest<'a> {
    question: &'a str,
    context: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnswerResponse {
    answer: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Multipart, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    fn sample_result() -> Value {
        json!({
            "summary": "A standard NDA.",
            "riskFlags": [
                {"level": "Yellow", "title": "Broad scope", "explanation": "Covers everything."}
            ],
            "keyClauses": [],
            "fullDocumentText": "Confidential information means..."
        })
    }

    /// Serve `router` on an ephemeral port and return a backend pointed at it
    async fn spawn_backend(router: Router) -> HttpBackend {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        HttpBackend::new(HttpBackendConfig {
            base_url: format!("http://{}/", addr),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let backend = HttpBackend::new(HttpBackendConfig {
            base_url: "http://example.test///".to_string(),
            request_timeout: Duration::from_secs(1),
        })
        .unwrap();
        assert_eq!(backend.endpoint("askQuestion"), "http://example.test/askQuestion");
    }

    #[tokio::test]
    async fn test_analyze_document_sends_multipart_field() {
        let router = Router::new().route(
            "/analyzeDocument",
            post(|mut multipart: Multipart| async move {
                let field = multipart.next_field().await.unwrap().unwrap();
                assert_eq!(field.name(), Some("document"));
                assert_eq!(field.file_name(), Some("lease.txt"));
                let bytes = field.bytes().await.unwrap();
                assert_eq!(&bytes[..], b"lease body");
                Json(sample_result())
            }),
        );
        let backend = spawn_backend(router).await;

        let upload = DocumentUpload::file("lease.txt", b"lease body".to_vec());
        let result = backend.analyze_document(&upload).await.unwrap();

        assert_eq!(result.summary, "A standard NDA.");
        assert_eq!(result.risk_flags.len(), 1);
    }

    #[tokio::test]
    async fn test_analyze_url_application_error() {
        let router = Router::new().route(
            "/analyzeUrl",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["url"], "https://example.com/tos");
                Json(json!({"error": "blocked"}))
            }),
        );
        let backend = spawn_backend(router).await;

        let err = backend.analyze_url("https://example.com/tos").await.unwrap_err();
        assert!(matches!(err, TransportError::Application(ref m) if m == "blocked"));
    }

    #[tokio::test]
    async fn test_non_success_status_uses_error_field() {
        let router = Router::new().route(
            "/analyzeUrl",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "Could not fetch text from URL."})),
                )
            }),
        );
        let backend = spawn_backend(router).await;

        match backend.analyze_url("https://example.com").await {
            Err(TransportError::Status { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Could not fetch text from URL.");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_required_field_is_decode_error() {
        let router = Router::new().route(
            "/analyzeUrl",
            post(|| async { Json(json!({"riskFlags": []})) }),
        );
        let backend = spawn_backend(router).await;

        let err = backend.analyze_url("https://example.com").await.unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[tokio::test]
    async fn test_ask_question_round_trip() {
        let router = Router::new().route(
            "/askQuestion",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["context"], "Rent is due monthly.");
                Json(json!({"answer": format!("You asked: {}", body["question"].as_str().unwrap())}))
            }),
        );
        let backend = spawn_backend(router).await;

        let answer = backend
            .ask_question("When is rent due?", "Rent is due monthly.")
            .await
            .unwrap();
        assert_eq!(answer, "You asked: When is rent due?");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Bind then drop to get a port with nothing listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = HttpBackend::new(HttpBackendConfig {
            base_url: format!("http://{}", addr),
            request_timeout: Duration::from_secs(2),
        })
        .unwrap();

        let err = backend.ask_question("q", "c").await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }
}
