//! Full flow against an in-process analysis service:
//! submit → session store on disk → fresh dashboard → chat.

use axum::{extract::Multipart, routing::post, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use legalease::orchestrator::{DashboardPage, EntryOrchestrator, Page, Surface, URL_FAILURE_ALERT};
use legalease::render::{DashboardState, TextOptions, View};
use legalease::session::{FileSessionStore, SessionStore};
use legalease::transport::{HttpBackend, HttpBackendConfig};
use legalease::{AnalysisSession, ChatLoop, RiskLevel};

#[derive(Default)]
struct Recorder {
    shown: Vec<String>,
    alerts: Vec<String>,
    navigations: Vec<Page>,
    reloads: usize,
}

impl Surface for Recorder {
    fn show(&mut self, view: &View) {
        self.shown.push(view.to_text(TextOptions { expand: true }));
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

fn analysis() -> Value {
    json!({
        "summary": "Residential lease for 12 months.",
        "riskFlags": [
            {"title": "Early termination fee", "explanation": "Two months' rent.", "level": "Red"},
            {"title": "Pet policy", "explanation": "Pets need written approval.", "level": "purple"}
        ],
        "keyClauses": [
            {
                "title": "Security Deposit",
                "originalText": "Tenant shall deposit the sum of $2,000.",
                "simplifiedText": "You pay a $2,000 deposit."
            }
        ],
        "fullDocumentText": "Tenant shall deposit the sum of $2,000. Rent is due on the 1st."
    })
}

async fn spawn_service() -> HttpBackend {
    let router = Router::new()
        .route(
            "/analyzeDocument",
            post(|mut multipart: Multipart| async move {
                let field = multipart.next_field().await.unwrap().unwrap();
                assert_eq!(field.name(), Some("document"));
                Json(analysis())
            }),
        )
        .route(
            "/analyzeUrl",
            post(|Json(body): Json<Value>| async move {
                if body["url"].as_str().unwrap_or_default().contains("blocked") {
                    Json(json!({"error": "blocked"}))
                } else {
                    Json(analysis())
                }
            }),
        )
        .route(
            "/askQuestion",
            post(|Json(body): Json<Value>| async move {
                let context = body["context"].as_str().unwrap_or_default();
                let answer = if context.contains("1st") {
                    "Rent is due on the 1st."
                } else {
                    "I don't know."
                };
                Json(json!({"answer": answer}))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    HttpBackend::new(HttpBackendConfig {
        base_url: format!("http://{}", addr),
        request_timeout: Duration::from_secs(5),
    })
    .unwrap()
}

#[tokio::test]
async fn test_file_analysis_to_dashboard_to_chat() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(spawn_service().await);

    let entry = EntryOrchestrator::new(
        backend.clone(),
        Arc::new(FileSessionStore::new(dir.path())),
    );
    let mut landing = Recorder::default();
    entry
        .submit_file("lease.txt", b"Tenant shall deposit...".to_vec(), &mut landing)
        .await
        .unwrap();
    assert_eq!(landing.navigations, vec![Page::Dashboard]);
    assert!(landing.alerts.is_empty());

    // The dashboard is a new page with its own handle on the store
    let dashboard = DashboardPage::new(Arc::new(FileSessionStore::new(dir.path())));
    let mut page = Recorder::default();
    let state = dashboard.initialize(&mut page).unwrap();
    assert!(matches!(state, DashboardState::Rendered(_)));

    let shown = page.shown.last().unwrap();
    assert!(shown.contains("lease.txt"));
    assert!(shown.contains("Residential lease for 12 months."));
    assert!(shown.contains("[High Risk]"));
    assert!(shown.contains("[Medium Risk]"));
    assert!(shown.contains("You pay a $2,000 deposit."));

    let session = dashboard.session().unwrap();
    assert_eq!(session.result.risk_flags[1].level, RiskLevel::Other("purple".to_string()));

    let store = FileSessionStore::new(dir.path());
    let chat = ChatLoop::from_session(backend, &store).unwrap();
    let answer = chat.ask("When is rent due?").await.unwrap();
    assert_eq!(answer.as_deref(), Some("Rent is due on the 1st."));
    assert_eq!(chat.turns().await.len(), 2);
}

#[tokio::test]
async fn test_blocked_url_leaves_previous_session() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(spawn_service().await);
    let store = Arc::new(FileSessionStore::new(dir.path()));
    let entry = EntryOrchestrator::new(backend, store.clone());

    let mut first = Recorder::default();
    entry
        .submit_url("https://example.com/lease", &mut first)
        .await
        .unwrap();
    let before = AnalysisSession::load(store.as_ref()).unwrap().unwrap();

    let mut second = Recorder::default();
    assert!(entry
        .submit_url("https://blocked.example.com", &mut second)
        .await
        .is_err());
    assert_eq!(second.alerts, vec![URL_FAILURE_ALERT]);
    assert_eq!(second.reloads, 1);
    assert!(second.navigations.is_empty());

    let after = AnalysisSession::load(store.as_ref()).unwrap().unwrap();
    assert_eq!(before, after);
    assert_eq!(after.document_name, "https://example.com/lease");
}

#[tokio::test]
async fn test_cleared_session_shows_missing_data() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(spawn_service().await);
    let store = Arc::new(FileSessionStore::new(dir.path()));

    let entry = EntryOrchestrator::new(backend, store.clone());
    entry
        .submit_text(&"This lease is made between the parties. ".repeat(5), &mut Recorder::default())
        .await
        .unwrap();

    store.clear().unwrap();

    let mut page = Recorder::default();
    let state = DashboardPage::new(store).initialize(&mut page).unwrap();
    assert!(matches!(state, DashboardState::ErrorMissingData(_)));
    assert!(page
        .shown
        .last()
        .unwrap()
        .contains("Error: No analysis data found."));
}

#[tokio::test]
async fn test_corrupt_session_file_recovers_on_next_analysis() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("session.json"), "{\"documentName\": \"lea").unwrap();

    let mut page = Recorder::default();
    let state = DashboardPage::new(Arc::new(FileSessionStore::new(dir.path())))
        .initialize(&mut page)
        .unwrap();
    assert!(matches!(state, DashboardState::ErrorMissingData(_)));

    let backend = Arc::new(spawn_service().await);
    let entry = EntryOrchestrator::new(backend, Arc::new(FileSessionStore::new(dir.path())));
    let mut landing = Recorder::default();
    entry
        .submit_url("https://example.com/lease", &mut landing)
        .await
        .unwrap();
    assert!(landing.alerts.is_empty());
    assert_eq!(landing.navigations, vec![Page::Dashboard]);

    let mut page = Recorder::default();
    let state = DashboardPage::new(Arc::new(FileSessionStore::new(dir.path())))
        .initialize(&mut page)
        .unwrap();
    assert!(matches!(state, DashboardState::Rendered(_)));
    assert!(page.shown.last().unwrap().contains("https://example.com/lease"));
}
