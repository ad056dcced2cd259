//! Landing Page
//!
//! Takes a document three ways: a selected file, pasted text or a URL. While
//! the service works the page is replaced by the analyzing placeholder. On
//! success the result goes to `sessionStorage` and the browser navigates to
//! the dashboard; on failure an alert is shown and the page reloads.

use leptos::*;
use wasm_bindgen::JsCast;

use crate::api;
use crate::app::{alert, navigate, reload};
use crate::components::{Analyzing, Modal};
use crate::state::analysis::{
    validate_pasted_text, validate_url, AnalysisResult, DOCUMENT_FAILURE_ALERT,
    PASTED_TEXT_NAME, URL_FAILURE_ALERT,
};
use crate::state::session;

/// What is being sent for analysis
#[derive(Clone)]
enum Submission {
    File(web_sys::File),
    Text(String),
    Url(String),
}

impl Submission {
    fn document_name(&self) -> String {
        match self {
            Submission::File(file) => file.name(),
            Submission::Text(_) => PASTED_TEXT_NAME.to_string(),
            Submission::Url(url) => url.clone(),
        }
    }

    fn failure_alert(&self) -> &'static str {
        match self {
            Submission::Url(_) => URL_FAILURE_ALERT,
            _ => DOCUMENT_FAILURE_ALERT,
        }
    }

    async fn send(&self) -> Result<AnalysisResult, String> {
        match self {
            Submission::File(file) => api::analyze_file(file).await,
            Submission::Text(text) => api::analyze_text(text).await,
            Submission::Url(url) => api::analyze_url(url).await,
        }
    }
}

/// Landing page component
#[component]
pub fn Landing() -> impl IntoView {
    let (analyzing, set_analyzing) = create_signal(false);
    let (text_open, set_text_open) = create_signal(false);
    let (url_open, set_url_open) = create_signal(false);
    let (pasted, set_pasted) = create_signal(String::new());
    let (url, set_url) = create_signal(String::new());

    let submit = move |submission: Submission| {
        set_text_open.set(false);
        set_url_open.set(false);
        set_analyzing.set(true);

        spawn_local(async move {
            match submission.send().await {
                Ok(result) => match session::save_analysis(&submission.document_name(), &result) {
                    Ok(()) => navigate("dashboard.html"),
                    Err(e) => {
                        web_sys::console::error_1(&e.into());
                        alert(DOCUMENT_FAILURE_ALERT);
                        reload();
                    }
                },
                Err(e) => {
                    web_sys::console::error_1(&format!("Analysis failed: {}", e).into());
                    alert(submission.failure_alert());
                    reload();
                }
            }
        });
    };

    let on_file = move |ev: ev::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));

        if let Some(file) = file {
            submit(Submission::File(file));
        }
    };

    let confirm_text = move |_: ()| match validate_pasted_text(&pasted.get_untracked()) {
        Ok(text) => submit(Submission::Text(text.to_string())),
        Err(message) => alert(message),
    };

    let confirm_url = move |_: ()| match validate_url(&url.get_untracked()) {
        Ok(url) => submit(Submission::Url(url.to_string())),
        Err(message) => alert(message),
    };

    view! {
        <Show
            when=move || !analyzing.get()
            fallback=|| view! { <Analyzing /> }
        >
            <div class="landing">
                <header class="hero">
                    <h1>"Understand any legal document in plain English"</h1>
                    <p>"Upload a contract, lease or terms of service to get a summary, risk flags and key clauses."</p>
                </header>

                <div class="upload-options">
                    <label class="upload-card" for="fileInput">
                        <i data-lucide="upload" />
                        <span>"Upload a file"</span>
                        <small>"PDF or text"</small>
                    </label>
                    <input
                        id="fileInput"
                        type="file"
                        accept=".pdf,.txt"
                        class="hidden"
                        on:change=on_file
                    />

                    <button class="upload-card" on:click=move |_| set_text_open.set(true)>
                        <i data-lucide="clipboard" />
                        <span>"Paste text"</span>
                    </button>

                    <button class="upload-card" on:click=move |_| set_url_open.set(true)>
                        <i data-lucide="link" />
                        <span>"Analyze a URL"</span>
                    </button>
                </div>
            </div>

            <Modal
                title="Paste your document"
                open=text_open
                on_close=move |_: ()| set_text_open.set(false)
                on_confirm=confirm_text
            >
                <textarea
                    id="textInput"
                    rows="12"
                    placeholder="Paste at least 100 characters..."
                    prop:value=move || pasted.get()
                    on:input=move |ev| set_pasted.set(event_target_value(&ev))
                />
            </Modal>

            <Modal
                title="Analyze a web page"
                open=url_open
                on_close=move |_: ()| set_url_open.set(false)
                on_confirm=confirm_url
            >
                <input
                    id="urlInput"
                    type="url"
                    placeholder="https://example.com/terms"
                    prop:value=move || url.get()
                    on:input=move |ev| set_url.set(event_target_value(&ev))
                />
            </Modal>
        </Show>
    }
}
