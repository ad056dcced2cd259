//! API Client
//!
//! HTTP calls to the analysis service.

pub mod client;

pub use client::{analyze_file, analyze_text, analyze_url, ask_question, get_api_base};
