//! Configuration management for Groovify.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the local data directory. Environment variables that are already
//! set take priority over the file; everything except the Spotify credentials
//! has a usable default.

use std::{env, path::PathBuf};

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Loads environment variables from `groovify/.env` in the local data directory.
///
/// The directory is created when missing so the user has an obvious place to
/// drop the file. A missing `.env` is fine, the process environment is used
/// as it is. A file that exists but cannot be parsed is reported.
///
/// The file is looked up in:
/// - Linux: `~/.local/share/groovify/.env`
/// - macOS: `~/Library/Application Support/groovify/.env`
/// - Windows: `%LOCALAPPDATA%/groovify/.env`
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("groovify/.env");
    path
}

/// Where a credential-bearing component is being used from.
///
/// Only [`ExecutionContext::Server`] may hold the client secret; the token
/// cache refuses to hand out tokens in any other context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    Server,
    Client,
}

/// Settings for talking to Spotify.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub api_url: String,
    pub token_url: String,
    pub context: ExecutionContext,
}

impl SpotifyConfig {
    /// Reads `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET`, `SPOTIFY_API_URL`
    /// and `SPOTIFY_API_TOKEN_URL`.
    ///
    /// Never fails: missing credentials are only an error once a token is
    /// actually requested.
    pub fn from_env() -> Self {
        Self {
            client_id: non_empty_var("SPOTIFY_CLIENT_ID"),
            client_secret: non_empty_var("SPOTIFY_CLIENT_SECRET"),
            api_url: non_empty_var("SPOTIFY_API_URL")
                .unwrap_or_else(|| DEFAULT_SPOTIFY_API_URL.to_string()),
            token_url: non_empty_var("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_SPOTIFY_TOKEN_URL.to_string()),
            context: ExecutionContext::Server,
        }
    }

    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            api_url: DEFAULT_SPOTIFY_API_URL.to_string(),
            token_url: DEFAULT_SPOTIFY_TOKEN_URL.to_string(),
            context: ExecutionContext::Server,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    pub fn with_context(mut self, context: ExecutionContext) -> Self {
        self.context = context;
        self
    }
}

/// Address for the HTTP front end, `SERVER_ADDRESS`.
pub fn server_addr() -> String {
    non_empty_var("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Tracing filter directive, `GROOVIFY_LOG`.
pub fn log_filter() -> String {
    non_empty_var("GROOVIFY_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
