use tabled::Table;

use crate::{
    config::SpotifyConfig,
    error, info,
    spotify::{CatalogClient, SpotifyClient},
    types::TrackTableRow,
};

pub async fn search(query: String, limit: u32) {
    let client = SpotifyClient::new(SpotifyConfig::from_env());

    let pb = super::spinner(&format!("Searching for \"{}\"...", query));
    let result = client.search_tracks(&query, limit).await;
    pb.finish_and_clear();

    let tracks = match result {
        Ok(tracks) => tracks,
        Err(e) => error!("Search failed: {}", e),
    };

    if tracks.is_empty() {
        info!("No tracks found for \"{}\"", query);
        return;
    }

    let rows: Vec<TrackTableRow> = tracks
        .iter()
        .enumerate()
        .map(|(i, track)| TrackTableRow::from_track(i + 1, track))
        .collect();
    println!("{}", Table::new(rows));
}
