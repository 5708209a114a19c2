use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, TimeDelta, Utc};
use futures::future::{BoxFuture, FutureExt, Shared};
use reqwest::{Client, header::AUTHORIZATION};
use serde_json::Number;
use tracing::{debug, info, warn};

use crate::{
    config::{ExecutionContext, SpotifyConfig},
    error::{GroovifyError, Result},
    types::TokenResponse,
    utils,
};

/// Tokens are treated as expired this many seconds before Spotify says they are.
pub const EXPIRY_SKEW_SECS: i64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct CachedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at - Duration::seconds(EXPIRY_SKEW_SECS)
    }
}

type PendingRefresh = Shared<BoxFuture<'static, Result<CachedToken>>>;

#[derive(Default)]
struct CacheState {
    token: Option<CachedToken>,
    in_flight: Option<PendingRefresh>,
}

/// Client-credentials bearer token cache.
///
/// A fresh token is returned without I/O. Once the token is within
/// [`EXPIRY_SKEW_SECS`] of expiry it is refreshed, and every caller that
/// arrives while that refresh is running awaits the same pending request, so
/// at most one call to the token endpoint is in flight at any time. The
/// pending handle is dropped when the refresh settles, successful or not, and
/// the next caller starts a new one. Failures are handed back, never retried.
///
/// Clones share the same cache.
#[derive(Clone)]
pub struct AccessTokenCache {
    http: Client,
    config: SpotifyConfig,
    state: Arc<Mutex<CacheState>>,
}

impl AccessTokenCache {
    pub fn new(config: SpotifyConfig) -> Self {
        Self::with_http_client(config, Client::new())
    }

    pub fn with_http_client(config: SpotifyConfig, http: Client) -> Self {
        Self {
            http,
            config,
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    /// Returns a bearer token valid for at least [`EXPIRY_SKEW_SECS`] more seconds.
    pub async fn access_token(&self) -> Result<String> {
        if self.config.context != ExecutionContext::Server {
            return Err(GroovifyError::Configuration(
                "access tokens must only be requested from a server context".to_string(),
            ));
        }

        let pending = {
            let mut state = lock(&self.state);

            if let Some(token) = state.token.as_ref().filter(|t| t.is_fresh(Utc::now())) {
                debug!(expires_at = %token.expires_at, "using cached spotify token");
                return Ok(token.access_token.clone());
            }

            match state.in_flight.clone() {
                Some(pending) => {
                    debug!("joining in-flight spotify token refresh");
                    pending
                }
                None => {
                    let pending = self.start_refresh();
                    state.in_flight = Some(pending.clone());
                    pending
                }
            }
        };

        pending.await.map(|token| token.access_token)
    }

    /// The currently cached token, regardless of freshness.
    pub fn cached_token(&self) -> Option<CachedToken> {
        lock(&self.state).token.clone()
    }

    fn start_refresh(&self) -> PendingRefresh {
        let http = self.http.clone();
        let config = self.config.clone();
        let state = Arc::clone(&self.state);

        async move {
            let result = fetch_client_credentials_token(&http, &config).await;

            let mut guard = lock(&state);
            if let Ok(token) = &result {
                guard.token = Some(token.clone());
            }
            guard.in_flight = None;

            result
        }
        .boxed()
        .shared()
    }
}

fn lock(state: &Mutex<CacheState>) -> MutexGuard<'_, CacheState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value.as_deref().ok_or_else(|| {
        GroovifyError::Configuration(format!("Missing required environment variable: {name}"))
    })
}

/// Exchanges the configured client id and secret for a new access token.
pub async fn fetch_client_credentials_token(
    http: &Client,
    config: &SpotifyConfig,
) -> Result<CachedToken> {
    let client_id = required(&config.client_id, "SPOTIFY_CLIENT_ID")?;
    let client_secret = required(&config.client_secret, "SPOTIFY_CLIENT_SECRET")?;

    info!(token_url = %config.token_url, "requesting spotify access token");

    let response = http
        .post(&config.token_url)
        .header(
            AUTHORIZATION,
            utils::basic_credentials(client_id, client_secret),
        )
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "spotify token request failed");
        return Err(GroovifyError::TokenRequest {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        });
    }

    let body: TokenResponse = response.json().await.map_err(|e| {
        GroovifyError::UpstreamProtocol(format!("Spotify token response is not valid JSON: {e}"))
    })?;

    let (Some(access_token), Some(expires_in)) = (
        body.access_token.filter(|t| !t.is_empty()),
        body.expires_in,
    ) else {
        return Err(GroovifyError::UpstreamProtocol(
            "Spotify token response missing expected fields".to_string(),
        ));
    };

    Ok(CachedToken {
        access_token,
        expires_at: expiry_after(Utc::now(), &expires_in)?,
    })
}

/// Expiry instant for a token issued at `now` that lives `expires_in` seconds.
fn expiry_after(now: DateTime<Utc>, expires_in: &Number) -> Result<DateTime<Utc>> {
    let invalid = || {
        GroovifyError::UpstreamProtocol(format!(
            "Spotify token response has an invalid expires_in: {expires_in}"
        ))
    };

    let seconds = expires_in
        .as_f64()
        .filter(|secs| secs.is_finite() && *secs > 0.0)
        .ok_or_else(invalid)?;

    // Float to int casts saturate, so oversized values fail the range checks below.
    let lifetime = TimeDelta::try_milliseconds((seconds * 1000.0) as i64).ok_or_else(invalid)?;
    now.checked_add_signed(lifetime).ok_or_else(invalid)
}
