//! Error types shared by the token cache, the catalog client and the
//! playlist generator.
//!
//! Every error is `Clone`: a coalesced token refresh hands one outcome to all
//! of its waiters, so the failure has to be duplicable. Transport errors from
//! `reqwest` are therefore captured as their rendered message.

use thiserror::Error;

use crate::types::ValidationResult;

/// Result alias used by the library.
pub type Result<T> = std::result::Result<T, GroovifyError>;

#[derive(Debug, Clone, Error)]
pub enum GroovifyError {
    /// The filters broke one or more domain rules.
    #[error("Invalid playlist filters: {}", .0.summary())]
    Validation(ValidationResult),

    /// Credentials are missing or the token cache was used outside the server.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The upstream answered successfully but the body was not what we expect.
    #[error("Spotify protocol error: {0}")]
    UpstreamProtocol(String),

    #[error("Spotify token request failed ({status} {reason}){}", body_suffix(.body))]
    TokenRequest {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("Spotify API error ({status}) on {path}: {message}")]
    Api {
        status: u16,
        path: String,
        message: String,
    },

    #[error("At least one recommendation seed is required")]
    SeedRequirement,

    #[error("Failed to send http request: {0}")]
    Transport(String),
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

impl GroovifyError {
    /// HTTP status reported by the upstream, if this error came from one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            GroovifyError::TokenRequest { status, .. } | GroovifyError::Api { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GroovifyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GroovifyError::UpstreamProtocol(err.to_string())
        } else {
            GroovifyError::Transport(err.to_string())
        }
    }
}
