//! Error types
//!
//! Defines the error taxonomy shared by the library and the CLI.

use thiserror::Error;

use crate::config::ConfigError;
use crate::session::SessionError;
use crate::transport::TransportError;

/// Input rejected before any network call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Pasted text below the minimum length
    #[error("Pasted text has {len} characters, at least {min} required")]
    TextTooShort { len: usize, min: usize },

    /// URL missing or blank
    #[error("URL must not be empty")]
    EmptyUrl,

    /// Chat question missing or blank
    #[error("Question must not be empty")]
    EmptyQuestion,
}

impl ValidationError {
    /// Text shown to the user in the blocking alert
    pub fn alert_message(&self) -> &'static str {
        match self {
            Self::TextTooShort { .. } => "Please paste at least 100 characters.",
            Self::EmptyUrl => "Please enter a valid URL",
            Self::EmptyQuestion => "Please enter a question",
        }
    }
}

/// Top-level error type
#[derive(Error, Debug)]
pub enum Error {
    /// Request to the analysis backend failed
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Input failed client-side checks
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Dashboard opened without a prior analysis
    #[error("No analysis data found in session")]
    MissingSessionData,

    /// Session store could not be read or written
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, Error>;
