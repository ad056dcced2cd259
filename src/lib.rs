//! # LegalEase
//!
//! Plain-English analysis of legal documents. A document (uploaded file,
//! pasted text or URL) is sent to a remote analysis service, and the result
//! is shown as a dashboard with a summary, risk flags and key clauses. A chat
//! loop answers follow-up questions about the same document.
//!
//! ## Modules
//!
//! - [`model`]: Requests, analysis results and chat turns
//! - [`transport`]: Client for the remote analysis service
//! - [`session`]: Hand-off store between the entry page and the dashboard
//! - [`render`]: Escaped view tree for the dashboard
//! - [`orchestrator`]: Page flows for submission and dashboard start-up
//! - [`chat`]: Follow-up question loop
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use legalease::orchestrator::{EntryOrchestrator, Page, Surface};
//! use legalease::render::View;
//! use legalease::session::FileSessionStore;
//! use legalease::transport::{HttpBackend, HttpBackendConfig};
//! use std::sync::Arc;
//!
//! struct Stdout;
//!
//! impl Surface for Stdout {
//!     fn show(&mut self, view: &View) {
//!         println!("{}", view.to_text(Default::default()));
//!     }
//!     fn alert(&mut self, message: &str) {
//!         eprintln!("{}", message);
//!     }
//!     fn navigate(&mut self, _page: Page) {}
//!     fn reload(&mut self) {}
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = Arc::new(HttpBackend::new(HttpBackendConfig::default())?);
//!     let store = Arc::new(FileSessionStore::new("./session"));
//!
//!     let entry = EntryOrchestrator::new(backend, store);
//!     let session = entry
//!         .submit_url("https://example.com/terms", &mut Stdout)
//!         .await?;
//!
//!     println!("{} risk flags", session.result.risk_flags.len());
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod config;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod render;
pub mod session;
pub mod transport;

// Re-export top-level types for convenience
pub use chat::{ChatLoop, Exchange, ExchangeStatus, Transcript};

pub use config::{Config, ConfigError};

pub use error::{Error, Result, ValidationError};

pub use model::{
    AnalysisRequest, AnalysisResult, ChatTurn, KeyClause, RiskFlag, RiskLevel, RiskTier, Role,
};

pub use orchestrator::{DashboardPage, EntryOrchestrator, Page, PageController, Surface};

pub use render::{DashboardState, TextOptions, View};

pub use session::{
    AnalysisSession, FileSessionStore, MemorySessionStore, SessionError, SessionStore,
};

pub use transport::{AnalysisBackend, DocumentUpload, HttpBackend, HttpBackendConfig, TransportError};
