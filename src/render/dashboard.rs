//! Dashboard Views
//!
//! Builds the analysis dashboard, the "analyzing" placeholder, the
//! missing-data error page and the chat transcript.

use super::{el, Element, View};
use crate::model::{AnalysisResult, ChatTurn, KeyClause, RiskFlag, RiskLevel, Role};
use crate::session::AnalysisSession;

/// Shown instead of an empty risk list
pub const NO_RISKS_MESSAGE: &str = "No significant risks were found in this document.";

/// Where the missing-data page links back to
const ENTRY_PAGE_HREF: &str = "index.html";

/// Lifecycle of the dashboard page
///
/// Starts in `Loading` and ends in exactly one of the two terminal states.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Loading,
    Rendered(View),
    ErrorMissingData(View),
}

impl DashboardState {
    /// Resolve the page from whatever the session store held
    pub fn from_session(session: Option<&AnalysisSession>) -> Self {
        match session {
            Some(session) => {
                Self::Rendered(render(&session.result, &session.document_name))
            }
            None => Self::ErrorMissingData(missing_data_view()),
        }
    }

    /// View to display in this state
    pub fn view(&self) -> View {
        match self {
            Self::Loading => dashboard_loading_view(),
            Self::Rendered(view) | Self::ErrorMissingData(view) => view.clone(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// Render an analysis result for `document_name`
pub fn render(result: &AnalysisResult, document_name: &str) -> View {
    el("div")
        .class("dashboard")
        .child(
            el("aside")
                .class("sidebar")
                .child(el("span").class("document-name").text(document_name)),
        )
        .child(
            el("main")
                .class("content")
                .child(summary_section(&result.summary))
                .child(risk_section(&result.risk_flags))
                .child(clause_section(&result.key_clauses)),
        )
        .into()
}

/// Dashboard for a stored session
pub fn dashboard_view(session: &AnalysisSession) -> View {
    render(&session.result, &session.document_name)
}

fn summary_section(summary: &str) -> Element {
    el("section")
        .id("summary")
        .class("content-section")
        .child(el("h2").text("Summary"))
        .child(el("p").id("summary-text").text(summary))
}

fn risk_section(flags: &[RiskFlag]) -> Element {
    let container = el("div").id("risk-flags-container");

    let container = if flags.is_empty() {
        container.child(el("p").class("no-risks").text(NO_RISKS_MESSAGE))
    } else {
        container.children(flags.iter().map(risk_item))
    };

    el("section")
        .id("risks")
        .class("content-section")
        .child(el("h2").text("Risk Flags"))
        .child(container)
}

fn risk_item(flag: &RiskFlag) -> Element {
    if let RiskLevel::Other(label) = &flag.level {
        tracing::debug!(level = %label, title = %flag.title, "Unrecognized risk level, using medium tier");
    }

    let tier = flag.level.tier();
    el("div")
        .class(format!("risk-item risk-{}", flag.level.css_label()))
        .child(
            el("div")
                .class("risk-indicator")
                .attr("data-tooltip", tier.label())
                .child(el("i").attr("data-lucide", tier.icon())),
        )
        .child(
            el("div")
                .class("risk-content")
                .child(el("h4").class("risk-title").text(flag.title.as_str()))
                .child(el("p").class("risk-description").text(flag.explanation.as_str())),
        )
}

fn clause_section(clauses: &[KeyClause]) -> Element {
    el("section")
        .id("clauses")
        .class("content-section")
        .child(el("h2").text("Key Clauses"))
        .child(
            el("div")
                .id("key-clauses-container")
                .children(clauses.iter().map(clause_item)),
        )
}

/// One collapsible clause; closed until the reader opens it
fn clause_item(clause: &KeyClause) -> Element {
    el("details")
        .class("accordion-item")
        .child(
            el("summary")
                .class("accordion-trigger")
                .child(el("span").class("accordion-title").text(clause.title.as_str())),
        )
        .child(
            el("div")
                .class("clause-comparison")
                .child(
                    el("div")
                        .class("clause-original")
                        .child(el("h5").text("Original Legal Text:"))
                        .child(el("p").text(format!("\"{}\"", clause.original_text))),
                )
                .child(
                    el("div")
                        .class("clause-explanation")
                        .child(el("h5").text("Plain English:"))
                        .child(el("p").text(clause.simplified_text.as_str())),
                ),
        )
}

/// Placeholder that replaces the page while an analysis is in flight
pub fn loading_view() -> View {
    el("div")
        .class("analyzing")
        .child(el("h1").text("Analyzing your document..."))
        .child(el("p").text("This might take a moment."))
        .into()
}

/// Shown while the dashboard reads the stored analysis
pub fn dashboard_loading_view() -> View {
    el("div")
        .class("dashboard-loading")
        .child(el("p").text("Loading your analysis..."))
        .into()
}

/// Fixed page shown when the dashboard opens without session data
pub fn missing_data_view() -> View {
    el("div")
        .class("error-view")
        .child(el("h1").text("Error: No analysis data found."))
        .child(
            el("p").child(
                el("a")
                    .attr("href", ENTRY_PAGE_HREF)
                    .text("Please go back and try again."),
            ),
        )
        .into()
}

/// Chat transcript, oldest turn first
pub fn transcript_view(turns: &[ChatTurn]) -> View {
    el("div")
        .id("chatMessages")
        .class("chat-messages")
        .children(turns.iter().map(chat_message))
        .into()
}

fn chat_message(turn: &ChatTurn) -> Element {
    let (class, speaker) = match turn.role {
        Role::User => ("chat-message chat-user", "You"),
        Role::Assistant => ("chat-message chat-ai", "Assistant"),
    };

    el("div").class(class).child(
        el("div")
            .class("message-content")
            .child(el("p").child(el("strong").text(format!("{}: ", speaker))).text(turn.text.as_str())),
    )
}
