//! Key Clause Component
//!
//! Collapsible comparison of the legal text and its plain-English version.

use leptos::*;

use crate::state::analysis::KeyClause;

/// Starts collapsed; each item toggles on its own
#[component]
pub fn ClauseItem(clause: KeyClause) -> impl IntoView {
    let (open, set_open) = create_signal(false);
    let KeyClause {
        title,
        original_text,
        simplified_text,
    } = clause;
    let original = format!("\"{}\"", original_text);

    view! {
        <div class="accordion-item" class:active=move || open.get()>
            <button class="accordion-trigger" on:click=move |_| set_open.update(|o| *o = !*o)>
                <span class="accordion-title">{title}</span>
                <i data-lucide=move || if open.get() { "chevron-up" } else { "chevron-down" } />
            </button>
            <Show when=move || open.get()>
                <div class="accordion-content">
                    <div class="clause-comparison">
                        <div class="clause-original">
                            <h5>"Original Legal Text:"</h5>
                            <p>{original.clone()}</p>
                        </div>
                        <div class="clause-explanation">
                            <h5>"Plain English:"</h5>
                            <p>{simplified_text.clone()}</p>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
