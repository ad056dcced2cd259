//! App Root Component
//!
//! Routes each page path to its initializer.

use leptos::*;
use leptos_router::*;

use crate::pages::{Dashboard, Landing};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <div class="app">
                <Routes>
                    <Route path="/" view=Landing />
                    <Route path="/index.html" view=Landing />
                    <Route path="/dashboard.html" view=Dashboard />
                    <Route path="/*any" view=Landing />
                </Routes>
            </div>
        </Router>
    }
}

/// Full page navigation; nothing survives except `sessionStorage`
pub fn navigate(href: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(href);
    }
}

/// Reload the current page, dropping all in-memory state
pub fn reload() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}

/// Blocking alert
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
