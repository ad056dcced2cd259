//! State Management
//!
//! Analysis types, the `sessionStorage` hand-off and the chat transcript.

pub mod analysis;
pub mod chat;
pub mod session;

pub use analysis::{AnalysisResult, KeyClause, RiskFlag, RiskTier};
pub use chat::{ChatTranscript, Turn};
