//! HTTP API Client
//!
//! Functions for communicating with the analysis service. Every call is a
//! single POST with no retry. A non-success status, an `error` field in the
//! body and a network failure all come back as `Err`.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;

use crate::state::analysis::AnalysisResult;

/// Default analysis service origin
pub const DEFAULT_API_BASE: &str = "https://legaleaseai-backend-gt37.onrender.com";

/// File name used when pasted text is uploaded
const PASTED_TEXT_FILE: &str = "pasted-text.txt";

/// Get the service origin from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item("legalease_api_url").ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

#[derive(Debug, serde::Deserialize)]
struct AnswerResponse {
    answer: String,
}

#[derive(serde::Serialize)]
struct UrlRequest<'a> {
    url: &'a str,
}

#[derive(serde::Serialize)]
struct QuestionRequest<'a> {
    question: &'a str,
    context: &'a str,
}

/// Upload a selected file
pub async fn analyze_file(file: &web_sys::File) -> Result<AnalysisResult, String> {
    let form = web_sys::FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename("document", file, &file.name())
        .map_err(js_error)?;
    post_document(form).await
}

/// Upload pasted text as a plain-text file
pub async fn analyze_text(text: &str) -> Result<AnalysisResult, String> {
    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/plain");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(js_error)?;

    let form = web_sys::FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename("document", &blob, PASTED_TEXT_FILE)
        .map_err(js_error)?;
    post_document(form).await
}

async fn post_document(form: web_sys::FormData) -> Result<AnalysisResult, String> {
    let response = Request::post(&format!("{}/analyzeDocument", get_api_base()))
        .body(form)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    decode(response).await
}

/// Have the service fetch and analyze a page
pub async fn analyze_url(url: &str) -> Result<AnalysisResult, String> {
    let response = Request::post(&format!("{}/analyzeUrl", get_api_base()))
        .json(&UrlRequest { url })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    decode(response).await
}

/// Ask a question about the document in `context`
pub async fn ask_question(question: &str, context: &str) -> Result<String, String> {
    let response = Request::post(&format!("{}/askQuestion", get_api_base()))
        .json(&QuestionRequest { question, context })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    let answer: AnswerResponse = decode(response).await?;
    Ok(answer.answer)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| format!("Read error: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP {}: {}", status, error_message(&body)));
    }

    parse_body(&body)
}

/// Decode a 2xx body, treating an `error` field as failure
fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, String> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| format!("Parse error: {}", e))?;

    if let Some(error) = value.get("error").and_then(|e| e.as_str()) {
        return Err(error.to_string());
    }

    serde_json::from_value(value).map_err(|e| format!("Parse error: {}", e))
}

/// The body's `error` field, or the raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
