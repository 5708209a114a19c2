//! Playlist generation: filter validation and the generation pipeline that
//! turns validated filters into a [`Playlist`](crate::types::Playlist).

mod generation;
mod validation;

pub use generation::{
    DEFAULT_TRACK_COUNT, MAX_SEARCH_LIMIT, PLACEHOLDER_QUERY, PLAYLIST_NAME, build_search_query,
    generate_playlist, recommendation_params, requested_track_count, search_limit,
};
pub use validation::{MAX_TRACK_COUNT, MAX_YEAR, MIN_YEAR, validate_filters};
