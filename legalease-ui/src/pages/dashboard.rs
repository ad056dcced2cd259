//! Dashboard Page
//!
//! Renders the analysis stored by the landing page: summary, risk flags,
//! key clauses and the chat panel. Without stored data it shows a fixed
//! error message linking back to the landing page.

use leptos::*;

use crate::app::navigate;
use crate::components::{ChatPanel, ClauseItem, RiskItem};
use crate::state::analysis::AnalysisResult;
use crate::state::session;

const NO_RISKS_MESSAGE: &str = "No significant risks were found in this document.";

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    match session::load_analysis() {
        Some((name, result)) => view! { <Analysis name=name result=result /> }.into_view(),
        None => {
            web_sys::console::warn_1(&"Dashboard opened without analysis data".into());
            view! { <MissingData /> }.into_view()
        }
    }
}

#[component]
fn Analysis(name: String, result: AnalysisResult) -> impl IntoView {
    let context = session::document_text().unwrap_or_else(|| result.full_document_text.clone());
    let AnalysisResult {
        summary,
        risk_flags,
        key_clauses,
        ..
    } = result;

    let new_analysis = move |_| {
        session::clear();
        navigate("index.html");
    };

    view! {
        <div class="dashboard">
            <aside class="sidebar">
                <span class="document-name" id="documentName">{name}</span>
                <nav>
                    <a href="#summary">"Summary"</a>
                    <a href="#risks">"Risk Flags"</a>
                    <a href="#clauses">"Key Clauses"</a>
                    <a href="#chat">"Ask a Question"</a>
                </nav>
                <button class="btn-secondary" on:click=new_analysis>"New analysis"</button>
            </aside>

            <main class="content">
                <section id="summary" class="content-section">
                    <h2>"Summary"</h2>
                    <p id="summary-text">{summary}</p>
                </section>

                <section id="risks" class="content-section">
                    <h2>"Risk Flags"</h2>
                    <div id="risk-flags-container">
                        {if risk_flags.is_empty() {
                            view! { <p class="no-risks">{NO_RISKS_MESSAGE}</p> }.into_view()
                        } else {
                            risk_flags
                                .into_iter()
                                .map(|flag| view! { <RiskItem flag=flag /> })
                                .collect_view()
                        }}
                    </div>
                </section>

                <section id="clauses" class="content-section">
                    <h2>"Key Clauses"</h2>
                    <div id="key-clauses-container">
                        {key_clauses
                            .into_iter()
                            .map(|clause| view! { <ClauseItem clause=clause /> })
                            .collect_view()}
                    </div>
                </section>

                <ChatPanel context=context />
            </main>
        </div>
    }
}

#[component]
fn MissingData() -> impl IntoView {
    view! {
        <div class="error-view">
            <h1>"Error: No analysis data found."</h1>
            <p><a href="index.html">"Please go back and try again."</a></p>
        </div>
    }
}
