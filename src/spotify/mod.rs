//! # Spotify Integration Module
//!
//! Everything that talks to Spotify lives here:
//!
//! ```text
//! Playlist generator / CLI / HTTP front end
//!          ↓
//! CatalogClient (search, track lookup, recommendations)
//!          ↓
//! AccessTokenCache (client-credentials, single-flight refresh)
//!          ↓
//! Spotify Web API + Accounts service (reqwest)
//! ```
//!
//! ## Authentication
//!
//! [`auth`] implements the OAuth 2.0 client-credentials flow. No user is
//! involved: the configured client id and secret are exchanged for a bearer
//! token which is cached until 30 seconds before it expires. Concurrent
//! callers that find the cache stale share one refresh request.
//!
//! ## Catalog
//!
//! [`tracks`] implements [`CatalogClient`] on top of the Web API:
//! - `GET /search?type=track` - keyword search
//! - `GET /tracks/{id}` - single track lookup
//! - `GET /recommendations` - seeded recommendations (up to five seeds per kind)
//!
//! Non-success responses become [`GroovifyError::Api`] carrying the status, the
//! request path and Spotify's own error message when it sent one. Nothing is
//! retried.
//!
//! [`GroovifyError::Api`]: crate::error::GroovifyError::Api

pub mod auth;
pub mod tracks;

use async_trait::async_trait;

use crate::{
    error::Result,
    types::{RecommendationParams, Track},
};

pub use auth::AccessTokenCache;
pub use tracks::SpotifyClient;

/// The catalog operations the playlist generator depends on.
///
/// [`SpotifyClient`] is the production implementation; tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>>;
    async fn get_track(&self, id: &str) -> Result<Track>;
    async fn get_recommendations(&self, params: RecommendationParams) -> Result<Vec<Track>>;
}
