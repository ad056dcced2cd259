//! LegalEase Front End
//!
//! Plain-English legal document analysis, built with Leptos (WASM).
//!
//! # Pages
//!
//! - Landing: upload a file, paste text or enter a URL
//! - Dashboard: summary, risk flags, key clauses and a chat about the document
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the analysis service over HTTP. The two pages are
//! separate loads: the landing page stores the result in `sessionStorage` and
//! navigates, and the dashboard reads it back.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
