use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::STANDARD};
use rand::{Rng, distr::Alphanumeric};

use crate::types::Track;

pub fn generate_playlist_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(22)
        .map(char::from)
        .collect()
}

/// Value of a `Basic` authorization header for a client id/secret pair.
pub fn basic_credentials(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{client_id}:{client_secret}"))
    )
}

/// Extracts the year from a Spotify release date (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`).
pub fn parse_release_year(release_date: &str) -> Option<i32> {
    release_date
        .split('-')
        .next()
        .filter(|y| y.len() == 4)
        .and_then(|y| y.parse::<i32>().ok())
}

/// Keeps the first occurrence of every track id, preserving order.
pub fn remove_duplicate_tracks(tracks: &mut Vec<Track>) {
    let mut seen_ids = HashSet::new();
    tracks.retain(|track| seen_ids.insert(track.id.clone()));
}

/// Swap partner used by [`deterministic_shuffle`] for position `i`.
pub fn shuffle_swap_index(i: usize) -> usize {
    (i.wrapping_mul(31).wrapping_add(17)) % (i + 1)
}

/// Fisher-Yates pass whose swap index is derived from the position instead of
/// a random source: the same input order always yields the same output order.
pub fn deterministic_shuffle<T>(items: &mut [T]) {
    for i in (1..items.len()).rev() {
        items.swap(i, shuffle_swap_index(i));
    }
}

/// Splits a comma separated genre argument. Returns `None` when nothing usable remains.
pub fn parse_genres(value: &str) -> Option<Vec<String>> {
    let genres: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect();

    if genres.is_empty() { None } else { Some(genres) }
}
