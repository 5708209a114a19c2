use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    config::SpotifyConfig,
    error::{GroovifyError, Result},
    spotify::{CatalogClient, auth::AccessTokenCache},
    types::{
        ApiErrorBody, RecommendationParams, RecommendationsResponse, SearchTracksResponse, Track,
    },
};

/// Spotify accepts at most five seeds of each kind.
pub const MAX_SEEDS_PER_KIND: usize = 5;

/// Catalog client backed by the Spotify Web API.
///
/// Every request carries a bearer token from the shared [`AccessTokenCache`].
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: AccessTokenCache,
}

impl SpotifyClient {
    pub fn new(config: SpotifyConfig) -> Self {
        let http = Client::new();
        let tokens = AccessTokenCache::with_http_client(config.clone(), http.clone());
        Self {
            http,
            api_url: config.api_url,
            tokens,
        }
    }

    /// Builds a client that shares an existing token cache.
    pub fn with_token_cache(api_url: impl Into<String>, tokens: AccessTokenCache) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into(),
            tokens,
        }
    }

    pub fn token_cache(&self) -> &AccessTokenCache {
        &self.tokens
    }

    /// Joins `segments` onto the API base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let invalid = || {
            GroovifyError::Configuration(format!("Invalid Spotify API url: {}", self.api_url))
        };

        let mut url = Url::parse(&self.api_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        let path = format!("/{}", segments.join("/"));
        let token = self.tokens.access_token().await?;

        debug!(%path, "spotify GET");
        let response = self
            .http
            .get(url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let upstream_message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .and_then(|detail| detail.message);
            let message = upstream_message
                .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string());

            warn!(status = status.as_u16(), %path, %message, "spotify request failed");
            return Err(GroovifyError::Api {
                status: status.as_u16(),
                path,
                message,
            });
        }

        response.json::<T>().await.map_err(|e| {
            GroovifyError::UpstreamProtocol(format!("Unexpected response body on {path}: {e}"))
        })
    }
}

fn capped_seeds(seeds: &[String]) -> Option<String> {
    if seeds.is_empty() {
        return None;
    }
    Some(
        seeds
            .iter()
            .take(MAX_SEEDS_PER_KIND)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(","),
    )
}

#[async_trait]
impl CatalogClient for SpotifyClient {
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>> {
        let params = [
            ("q", query.to_string()),
            ("type", "track".to_string()),
            ("limit", limit.to_string()),
        ];

        let response: SearchTracksResponse = self.get_json(&["search"], &params).await?;
        Ok(response.tracks.items)
    }

    async fn get_track(&self, id: &str) -> Result<Track> {
        self.get_json(&["tracks", id], &[]).await
    }

    async fn get_recommendations(&self, params: RecommendationParams) -> Result<Vec<Track>> {
        if !params.has_seeds() {
            return Err(GroovifyError::SeedRequirement);
        }

        let mut query = vec![("limit", params.limit.to_string())];
        if let Some(seeds) = capped_seeds(&params.seed_tracks) {
            query.push(("seed_tracks", seeds));
        }
        if let Some(seeds) = capped_seeds(&params.seed_artists) {
            query.push(("seed_artists", seeds));
        }
        if let Some(seeds) = capped_seeds(&params.seed_genres) {
            query.push(("seed_genres", seeds));
        }

        let response: RecommendationsResponse =
            self.get_json(&["recommendations"], &query).await?;
        Ok(response.tracks)
    }
}
