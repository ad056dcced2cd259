//! Analyzing Placeholder
//!
//! Replaces the landing page while an analysis is in flight.

use leptos::*;

#[component]
pub fn Analyzing() -> impl IntoView {
    view! {
        <div class="analyzing">
            <div class="loading-spinner" />
            <h1>"Analyzing your document..."</h1>
            <p>"This might take a moment."</p>
        </div>
    }
}
