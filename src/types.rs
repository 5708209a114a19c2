use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::utils;

/// Default number of tracks returned by catalog calls and generated playlists.
pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub duration_ms: u64,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub explicit: bool,
    pub artists: Vec<ArtistRef>,
    pub album: AlbumRef,
}

impl Track {
    /// Year of the album release, if the release date carries one.
    pub fn release_year(&self) -> Option<i32> {
        self.album
            .release_date
            .as_deref()
            .and_then(utils::parse_release_year)
    }

    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTracksResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPage {
    pub items: Vec<Track>,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSeed {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub initial_pool_size: u32,
    pub after_filtering_size: u32,
    pub after_relinking_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub seeds: Vec<RecommendationSeed>,
    pub tracks: Vec<Track>,
}

/// Seeds and size of a recommendations request.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationParams {
    pub seed_tracks: Vec<String>,
    pub seed_artists: Vec<String>,
    pub seed_genres: Vec<String>,
    pub limit: u32,
}

impl Default for RecommendationParams {
    fn default() -> Self {
        Self {
            seed_tracks: Vec::new(),
            seed_artists: Vec::new(),
            seed_genres: Vec::new(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl RecommendationParams {
    pub fn has_seeds(&self) -> bool {
        !self.seed_tracks.is_empty()
            || !self.seed_artists.is_empty()
            || !self.seed_genres.is_empty()
    }
}

/// Body of a client-credentials token response. Fields are optional so that a
/// response missing them is reported as a protocol error, not a decode panic.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<serde_json::Number>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub status: Option<u16>,
    pub message: Option<String>,
}

/// A single genre or a list of genres; both spellings are accepted on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenreFilter {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<GenreFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_start: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_end: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_count: Option<i32>,
}

impl PlaylistFilters {
    /// Genre terms with surrounding whitespace removed and blanks dropped.
    pub fn genres(&self) -> Vec<String> {
        let raw: Vec<&str> = match &self.genre {
            Some(GenreFilter::One(g)) => vec![g.as_str()],
            Some(GenreFilter::Many(gs)) => gs.iter().map(String::as_str).collect(),
            None => Vec::new(),
        };

        raw.into_iter()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// True when the caller supplied no filter at all.
    pub fn is_empty(&self) -> bool {
        self.genre.is_none()
            && self.year_start.is_none()
            && self.year_end.is_none()
            && self.track_count.is_none()
    }

    pub fn year_range(&self) -> Option<(i32, i32)> {
        match (self.year_start, self.year_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterField {
    Genre,
    YearStart,
    YearEnd,
    TrackCount,
}

impl FilterField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Genre => "genre",
            FilterField::YearStart => "yearStart",
            FilterField::YearEnd => "yearEnd",
            FilterField::TrackCount => "trackCount",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of checking a set of filters: at most one message per field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: BTreeMap<FilterField, String>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self {
            valid: true,
            errors: BTreeMap::new(),
        }
    }
}

impl ValidationResult {
    /// Records an error for `field`, replacing any earlier one.
    pub fn reject(&mut self, field: FilterField, message: impl Into<String>) {
        self.valid = false;
        self.errors.insert(field, message.into());
    }

    pub fn error(&self, field: FilterField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistMetadata {
    pub requested_track_count: u32,
    pub actual_track_count: u32,
    pub filters_relaxed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub filters: PlaylistFilters,
    pub tracks: Vec<Track>,
    pub metadata: PlaylistMetadata,
    pub created_at: DateTime<Utc>,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub artists: String,
    pub track: String,
    pub album: String,
    pub year: String,
}

impl TrackTableRow {
    pub fn from_track(position: usize, track: &Track) -> Self {
        Self {
            position,
            artists: track.artist_names(),
            track: track.name.clone(),
            album: track.album.name.clone(),
            year: track
                .release_year()
                .map(|y| y.to_string())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_accept_single_genre_and_list() {
        let one: PlaylistFilters = serde_json::from_str(r#"{"genre":"rock"}"#).unwrap();
        assert_eq!(one.genres(), vec!["rock".to_string()]);

        let many: PlaylistFilters =
            serde_json::from_str(r#"{"genre":["rock"," jazz ",""],"trackCount":5}"#).unwrap();
        assert_eq!(many.genres(), vec!["rock".to_string(), "jazz".to_string()]);
        assert_eq!(many.track_count, Some(5));
    }

    #[test]
    fn empty_filters_are_detected() {
        assert!(PlaylistFilters::default().is_empty());
        let filters = PlaylistFilters {
            year_start: Some(1990),
            ..Default::default()
        };
        assert!(!filters.is_empty());
        assert_eq!(filters.year_range(), None);
    }

    #[test]
    fn track_decodes_from_spotify_json() {
        let json = r#"{
            "id": "1",
            "name": "Test Track",
            "uri": "spotify:track:1",
            "duration_ms": 200000,
            "preview_url": null,
            "explicit": false,
            "artists": [{"id": "artist-1", "name": "Artist", "uri": "spotify:artist:1"}],
            "album": {
                "id": "album-1",
                "name": "Album",
                "uri": "spotify:album:1",
                "release_date": "1999-07-01",
                "images": [{"url": "https://i.scdn.co/a.jpg", "width": 640, "height": 640}]
            }
        }"#;

        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.release_year(), Some(1999));
        assert_eq!(track.artist_names(), "Artist");
        assert_eq!(track.album.images.len(), 1);
    }

    #[test]
    fn validation_result_serializes_field_names() {
        let mut result = ValidationResult::default();
        result.reject(FilterField::YearEnd, "bad");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"]["yearEnd"], "bad");
    }
}
