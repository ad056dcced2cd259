//! UI Components
//!
//! Reusable Leptos components for the two pages.

pub mod analyzing;
pub mod chat;
pub mod clause;
pub mod modal;
pub mod risk_flag;

pub use analyzing::Analyzing;
pub use chat::ChatPanel;
pub use clause::ClauseItem;
pub use modal::Modal;
pub use risk_flag::RiskItem;
