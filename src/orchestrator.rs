//! Page Orchestration
//!
//! Two pages make up the front end:
//!
//! - **Landing**: takes a document and drives
//!   validate → "analyzing" placeholder → backend → session store → navigate
//! - **Dashboard**: reads the session store and renders the result, or the
//!   missing-data page when nothing was stored
//!
//! Pages never hand data to each other in memory. The landing page writes
//! the session store and navigates; the dashboard is built afresh and reads
//! it back.
//!
//! Everything visible goes through a [`Surface`], so the same flow drives
//! the terminal front end and the tests.

use std::sync::Arc;
use tracing::Instrument;

use crate::error::{Error, Result, ValidationError};
use crate::model::{AnalysisRequest, AnalysisResult};
use crate::render::{loading_view, DashboardState, View};
use crate::session::{AnalysisSession, SessionError, SessionStore};
use crate::transport::{AnalysisBackend, DocumentUpload, TransportError};

/// Alert shown when a document or pasted text cannot be analyzed
pub const DOCUMENT_FAILURE_ALERT: &str = "Sorry, something went wrong. Please try again.";

/// Alert shown when a URL cannot be analyzed
pub const URL_FAILURE_ALERT: &str =
    "Failed to analyze URL. The site might be blocking bots or the URL is invalid.";

/// The pages of the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Landing,
    Dashboard,
}

impl Page {
    pub fn href(&self) -> &'static str {
        match self {
            Page::Landing => "index.html",
            Page::Dashboard => "dashboard.html",
        }
    }
}

/// Whatever the user is currently looking at
pub trait Surface {
    /// Replace the visible page content
    fn show(&mut self, view: &View);

    /// Blocking message the user must acknowledge
    fn alert(&mut self, message: &str);

    /// Full navigation to another page
    fn navigate(&mut self, page: Page);

    /// Reload the current page, discarding its state
    fn reload(&mut self);
}

/// Controller for the page that just loaded
pub enum PageController {
    Landing(EntryOrchestrator),
    Dashboard(DashboardPage),
}

/// Pick the initializer for `page`
pub fn initialize(
    page: Page,
    backend: Arc<dyn AnalysisBackend>,
    store: Arc<dyn SessionStore>,
) -> PageController {
    tracing::debug!(?page, "Initializing page");
    match page {
        Page::Landing => PageController::Landing(EntryOrchestrator::new(backend, store)),
        Page::Dashboard => PageController::Dashboard(DashboardPage::new(store)),
    }
}

/// Drives document submission from the landing page
pub struct EntryOrchestrator {
    backend: Arc<dyn AnalysisBackend>,
    store: Arc<dyn SessionStore>,
}

impl EntryOrchestrator {
    pub fn new(backend: Arc<dyn AnalysisBackend>, store: Arc<dyn SessionStore>) -> Self {
        Self { backend, store }
    }

    /// A file was selected
    pub async fn submit_file(
        &self,
        name: &str,
        bytes: Vec<u8>,
        surface: &mut dyn Surface,
    ) -> Result<AnalysisSession> {
        self.submit(AnalysisRequest::file(name, bytes), surface).await
    }

    /// Pasted text was confirmed
    pub async fn submit_text(&self, text: &str, surface: &mut dyn Surface) -> Result<AnalysisSession> {
        let request = validated(AnalysisRequest::pasted_text(text), surface)?;
        self.submit(request, surface).await
    }

    /// A URL was confirmed
    pub async fn submit_url(&self, url: &str, surface: &mut dyn Surface) -> Result<AnalysisSession> {
        let request = validated(AnalysisRequest::url(url), surface)?;
        self.submit(request, surface).await
    }

    /// Send a validated request and hand the result to the dashboard
    ///
    /// The page is replaced by the "analyzing" placeholder until the backend
    /// answers. On success the session store is written and the surface
    /// navigates to the dashboard. On failure an alert is shown, the page is
    /// reloaded, and the session store is left as it was.
    pub async fn submit(
        &self,
        request: AnalysisRequest,
        surface: &mut dyn Surface,
    ) -> Result<AnalysisSession> {
        let request_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!("analysis", %request_id, kind = request.kind());

        surface.show(&loading_view());

        let outcome = self.call_backend(&request).instrument(span.clone()).await;

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(parent: &span, error = %e, "Analysis failed");
                surface.alert(failure_alert(&request));
                surface.reload();
                return Err(e.into());
            }
        };

        let session = AnalysisSession::new(request.document_name(), result);
        if let Err(e) = session.save(self.store.as_ref()) {
            tracing::error!(parent: &span, error = %e, "Failed to store analysis");
            surface.alert(DOCUMENT_FAILURE_ALERT);
            surface.reload();
            return Err(e.into());
        }

        tracing::info!(
            parent: &span,
            document = %session.document_name,
            risk_flags = session.result.risk_flags.len(),
            key_clauses = session.result.key_clauses.len(),
            "Analysis complete"
        );

        surface.navigate(Page::Dashboard);
        Ok(session)
    }

    async fn call_backend(
        &self,
        request: &AnalysisRequest,
    ) -> std::result::Result<AnalysisResult, TransportError> {
        match request {
            AnalysisRequest::File { name, bytes } => {
                let upload = DocumentUpload::file(name.as_str(), bytes.clone());
                self.backend.analyze_document(&upload).await
            }
            AnalysisRequest::PastedText { text } => {
                self.backend.analyze_document(&DocumentUpload::text(text)).await
            }
            AnalysisRequest::Url { url } => self.backend.analyze_url(url).await,
        }
    }
}

fn validated(
    request: std::result::Result<AnalysisRequest, ValidationError>,
    surface: &mut dyn Surface,
) -> Result<AnalysisRequest> {
    request.map_err(|e| {
        tracing::debug!(error = %e, "Submission rejected");
        surface.alert(e.alert_message());
        Error::Validation(e)
    })
}

fn failure_alert(request: &AnalysisRequest) -> &'static str {
    match request {
        AnalysisRequest::Url { .. } => URL_FAILURE_ALERT,
        _ => DOCUMENT_FAILURE_ALERT,
    }
}

/// Renders the stored analysis
pub struct DashboardPage {
    store: Arc<dyn SessionStore>,
}

impl DashboardPage {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Load the session and show the dashboard or the missing-data page
    pub fn initialize(&self, surface: &mut dyn Surface) -> Result<DashboardState> {
        surface.show(&DashboardState::Loading.view());

        let session = match AnalysisSession::load(self.store.as_ref()) {
            Ok(session) => session,
            Err(SessionError::Serialization(e)) => {
                tracing::warn!(error = %e, "Stored analysis is unreadable");
                None
            }
            Err(e) => {
                surface.show(&DashboardState::from_session(None).view());
                return Err(e.into());
            }
        };
        if session.is_none() {
            tracing::warn!("Dashboard opened without analysis data");
        }

        let state = DashboardState::from_session(session.as_ref());
        surface.show(&state.view());
        Ok(state)
    }

    /// The stored session, if any
    pub fn session(&self) -> Result<AnalysisSession> {
        AnalysisSession::load(self.store.as_ref())?.ok_or(Error::MissingSessionData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TextOptions;
    use crate::session::test_support::sample_result;
    use crate::session::{MemorySessionStore, ANALYSIS_RESULT_KEY, DOCUMENT_NAME_KEY};
    use crate::transport::fake::ScriptedBackend;

    /// Records every call made against the surface
    #[derive(Default)]
    struct RecordingSurface {
        shown: Vec<String>,
        alerts: Vec<String>,
        navigations: Vec<Page>,
        reloads: usize,
    }

    impl Surface for RecordingSurface {
        fn show(&mut self, view: &View) {
            self.shown.push(view.to_text(TextOptions::default()));
        }

        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }

        fn navigate(&mut self, page: Page) {
            self.navigations.push(page);
        }

        fn reload(&mut self) {
            self.reloads += 1;
        }
    }

    fn setup(backend: ScriptedBackend) -> (EntryOrchestrator, Arc<ScriptedBackend>, Arc<MemorySessionStore>) {
        let backend = Arc::new(backend);
        let store = Arc::new(MemorySessionStore::new());
        let orchestrator = EntryOrchestrator::new(backend.clone(), store.clone());
        (orchestrator, backend, store)
    }

    #[tokio::test]
    async fn test_file_success_stores_and_navigates() {
        let (orchestrator, backend, store) =
            setup(ScriptedBackend::new().with_analysis(Ok(sample_result())));
        let mut surface = RecordingSurface::default();

        let session = orchestrator
            .submit_file("lease.pdf", b"%PDF-1.7".to_vec(), &mut surface)
            .await
            .unwrap();

        assert_eq!(session.document_name, "lease.pdf");
        assert_eq!(surface.shown.len(), 1);
        assert!(surface.shown[0].contains("Analyzing your document..."));
        assert_eq!(surface.navigations, vec![Page::Dashboard]);
        assert!(surface.alerts.is_empty());

        let uploads = backend.uploads.lock().unwrap().clone();
        assert_eq!(uploads[0].file_name, "lease.pdf");
        assert_eq!(uploads[0].mime_type, "application/pdf");

        let stored = AnalysisSession::load(store.as_ref()).unwrap().unwrap();
        assert_eq!(stored, session);
    }

    #[tokio::test]
    async fn test_pasted_text_uses_fixed_name() {
        let (orchestrator, backend, store) =
            setup(ScriptedBackend::new().with_analysis(Ok(sample_result())));
        let mut surface = RecordingSurface::default();
        let text = "x".repeat(150);

        orchestrator.submit_text(&text, &mut surface).await.unwrap();

        assert_eq!(
            store.get(DOCUMENT_NAME_KEY).unwrap().as_deref(),
            Some("Pasted Text")
        );
        let uploads = backend.uploads.lock().unwrap().clone();
        assert_eq!(uploads[0].mime_type, "text/plain");
        assert_eq!(uploads[0].bytes.len(), 150);
    }

    #[tokio::test]
    async fn test_short_text_rejected_without_network_call() {
        let (orchestrator, backend, store) = setup(ScriptedBackend::new());
        let mut surface = RecordingSurface::default();

        let err = orchestrator
            .submit_text(&"x".repeat(99), &mut surface)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation(ValidationError::TextTooShort { .. })));
        assert_eq!(surface.alerts, vec!["Please paste at least 100 characters."]);
        assert!(surface.shown.is_empty());
        assert_eq!(surface.reloads, 0);
        assert_eq!(backend.calls(), 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_empty_url_rejected_without_network_call() {
        let (orchestrator, backend, _store) = setup(ScriptedBackend::new());
        let mut surface = RecordingSurface::default();

        let err = orchestrator.submit_url("", &mut surface).await.unwrap_err();

        assert!(matches!(err, Error::Validation(ValidationError::EmptyUrl)));
        assert_eq!(surface.alerts, vec!["Please enter a valid URL"]);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_url_application_error_reloads_and_leaves_store_untouched() {
        let (orchestrator, backend, store) = setup(
            ScriptedBackend::new()
                .with_analysis(Err(TransportError::Application("blocked".to_string()))),
        );
        let mut surface = RecordingSurface::default();

        let err = orchestrator
            .submit_url("https://example.com/terms", &mut surface)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(TransportError::Application(_))));
        assert_eq!(surface.alerts, vec![URL_FAILURE_ALERT]);
        assert_eq!(surface.reloads, 1);
        assert!(surface.navigations.is_empty());
        assert!(store.is_empty());
        assert_eq!(backend.urls.lock().unwrap().clone(), vec!["https://example.com/terms"]);
    }

    #[tokio::test]
    async fn test_document_failure_uses_generic_alert() {
        let (orchestrator, _backend, store) = setup(
            ScriptedBackend::new().with_analysis(Err(TransportError::Status {
                status: 500,
                message: "Analysis failed.".to_string(),
            })),
        );
        let mut surface = RecordingSurface::default();

        assert!(orchestrator
            .submit_file("a.txt", b"text".to_vec(), &mut surface)
            .await
            .is_err());
        assert_eq!(surface.alerts, vec![DOCUMENT_FAILURE_ALERT]);
        assert_eq!(surface.reloads, 1);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_hand_off_through_store() {
        let (orchestrator, _backend, store) =
            setup(ScriptedBackend::new().with_analysis(Ok(sample_result())));
        let mut landing = RecordingSurface::default();
        orchestrator
            .submit_url("https://example.com/lease", &mut landing)
            .await
            .unwrap();

        // The dashboard only sees the store
        let dashboard = DashboardPage::new(store);
        let mut surface = RecordingSurface::default();
        let state = dashboard.initialize(&mut surface).unwrap();

        assert!(matches!(state, DashboardState::Rendered(_)));
        assert_eq!(surface.shown.len(), 2);
        assert!(surface.shown[1].contains("https://example.com/lease"));
        assert!(surface.shown[1].contains("[High Risk]"));
        assert!(surface.shown[1].contains("Automatic renewal"));
    }

    #[test]
    fn test_dashboard_without_session_shows_error_view() {
        let dashboard = DashboardPage::new(Arc::new(MemorySessionStore::new()));
        let mut surface = RecordingSurface::default();

        let state = dashboard.initialize(&mut surface).unwrap();

        assert!(matches!(state, DashboardState::ErrorMissingData(_)));
        assert!(surface.shown[1].contains("Error: No analysis data found."));
        assert!(matches!(dashboard.session(), Err(Error::MissingSessionData)));
    }

    #[test]
    fn test_unreadable_result_shows_error_view() {
        let store = Arc::new(MemorySessionStore::new());
        store
            .set_many(&[
                (DOCUMENT_NAME_KEY, "doc".to_string()),
                (ANALYSIS_RESULT_KEY, "{not json".to_string()),
            ])
            .unwrap();

        let mut surface = RecordingSurface::default();
        let state = DashboardPage::new(store).initialize(&mut surface).unwrap();

        assert!(state.is_terminal());
        assert!(matches!(state, DashboardState::ErrorMissingData(_)));
        assert_eq!(surface.shown[0], "Loading your analysis...");
        assert!(surface.shown[1].contains("Error: No analysis data found."));
    }

    #[test]
    fn test_initialize_picks_controller() {
        let backend: Arc<dyn AnalysisBackend> = Arc::new(ScriptedBackend::new());
        let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());

        assert!(matches!(
            initialize(Page::Landing, backend.clone(), store.clone()),
            PageController::Landing(_)
        ));
        assert!(matches!(
            initialize(Page::Dashboard, backend, store),
            PageController::Dashboard(_)
        ));
        assert_eq!(Page::Dashboard.href(), "dashboard.html");
    }
}
