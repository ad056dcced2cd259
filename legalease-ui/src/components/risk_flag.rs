//! Risk Flag Component

use leptos::*;

use crate::state::analysis::RiskFlag;

/// One risk flag; its tier comes from the level alone
#[component]
pub fn RiskItem(flag: RiskFlag) -> impl IntoView {
    let tier = flag.tier();

    view! {
        <div class=flag.css_class()>
            <div class="risk-indicator" data-tooltip=tier.label()>
                <i data-lucide=tier.icon() />
            </div>
            <div class="risk-content">
                <h4 class="risk-title">{flag.title}</h4>
                <p class="risk-description">{flag.explanation}</p>
            </div>
        </div>
    }
}
