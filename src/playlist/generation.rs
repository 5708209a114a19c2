use chrono::Utc;
use tracing::debug;

use crate::{
    error::{GroovifyError, Result},
    playlist::validate_filters,
    spotify::CatalogClient,
    types::{
        DEFAULT_LIMIT, Playlist, PlaylistFilters, PlaylistMetadata, RecommendationParams, Track,
    },
    utils,
};

pub const DEFAULT_TRACK_COUNT: u32 = DEFAULT_LIMIT;
/// Largest page the search endpoint will return.
pub const MAX_SEARCH_LIMIT: u32 = 50;
pub const PLAYLIST_NAME: &str = "Groovify Mix";
pub const PLACEHOLDER_QUERY: &str = "music";

/// Generates a playlist for `filters` from the tracks `catalog` offers.
///
/// The filters are validated first; nothing is fetched for invalid input.
/// Search and recommendations are requested together, merged, deduplicated,
/// trimmed to the requested year range, shuffled deterministically and cut to
/// the requested track count. Catalog errors are returned as they are.
///
/// An empty recommendation result yields an empty playlist rather than one
/// made only of search hits.
pub async fn generate_playlist<C>(filters: &PlaylistFilters, catalog: &C) -> Result<Playlist>
where
    C: CatalogClient + ?Sized,
{
    let validation = validate_filters(filters);
    if !validation.valid {
        return Err(GroovifyError::Validation(validation));
    }

    let requested = requested_track_count(filters);
    let mut tracks = candidate_pool(filters, requested, catalog).await?;
    tracks.truncate(requested as usize);

    let actual = tracks.len() as u32;
    let filters_relaxed = actual < requested;
    let notes = filters_relaxed.then(|| {
        format!("Only {actual} of {requested} requested tracks matched the filters")
    });

    debug!(requested, actual, filters_relaxed, "playlist generated");

    Ok(Playlist {
        id: utils::generate_playlist_id(),
        name: PLAYLIST_NAME.to_string(),
        filters: filters.clone(),
        tracks,
        metadata: PlaylistMetadata {
            requested_track_count: requested,
            actual_track_count: actual,
            filters_relaxed,
            notes,
        },
        created_at: Utc::now(),
    })
}

pub fn requested_track_count(filters: &PlaylistFilters) -> u32 {
    filters
        .track_count
        .and_then(|count| u32::try_from(count).ok())
        .unwrap_or(DEFAULT_TRACK_COUNT)
}

/// Search limit for a requested count: twice the request, at least the default,
/// at most what the search endpoint allows.
pub fn search_limit(requested: u32) -> u32 {
    requested
        .saturating_mul(2)
        .max(DEFAULT_LIMIT)
        .min(MAX_SEARCH_LIMIT)
}

pub fn build_search_query(filters: &PlaylistFilters) -> String {
    let mut terms: Vec<String> = filters
        .genres()
        .iter()
        .map(|genre| format!("genre:\"{genre}\""))
        .collect();

    if let Some((start, end)) = filters.year_range() {
        terms.push(format!("year:{start}-{end}"));
    }

    if terms.is_empty() {
        PLACEHOLDER_QUERY.to_string()
    } else {
        terms.join(" ")
    }
}

/// Recommendation request seeded from the genre filter, `None` when there is
/// nothing to seed with.
pub fn recommendation_params(
    filters: &PlaylistFilters,
    requested: u32,
) -> Option<RecommendationParams> {
    let seed_genres = filters.genres();
    if seed_genres.is_empty() {
        return None;
    }

    Some(RecommendationParams {
        seed_genres,
        limit: requested,
        ..Default::default()
    })
}

async fn candidate_pool<C>(
    filters: &PlaylistFilters,
    requested: u32,
    catalog: &C,
) -> Result<Vec<Track>>
where
    C: CatalogClient + ?Sized,
{
    let query = build_search_query(filters);
    let limit = search_limit(requested);

    let (searched, recommended) = match recommendation_params(filters, requested) {
        Some(params) => {
            let (searched, recommended) = tokio::try_join!(
                catalog.search_tracks(&query, limit),
                catalog.get_recommendations(params)
            )?;
            (searched, Some(recommended))
        }
        None => (catalog.search_tracks(&query, limit).await?, None),
    };

    if recommended.as_ref().is_some_and(Vec::is_empty) {
        debug!(%query, "no recommendations, returning an empty pool");
        return Ok(Vec::new());
    }

    let mut pool = searched;
    pool.extend(recommended.unwrap_or_default());
    utils::remove_duplicate_tracks(&mut pool);

    if let Some((start, end)) = filters.year_range() {
        pool.retain(|track| {
            track
                .release_year()
                .is_none_or(|year| (start..=end).contains(&year))
        });
    }

    utils::deterministic_shuffle(&mut pool);
    debug!(%query, candidates = pool.len(), "candidate pool assembled");

    Ok(pool)
}
