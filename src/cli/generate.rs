use tabled::Table;

use crate::{
    config::SpotifyConfig,
    error, info,
    error::GroovifyError,
    playlist,
    spotify::SpotifyClient,
    success,
    types::{Playlist, PlaylistFilters, TrackTableRow},
    warning,
};

pub async fn generate(filters: PlaylistFilters, as_json: bool) {
    let client = SpotifyClient::new(SpotifyConfig::from_env());

    let pb = super::spinner("Generating playlist...");
    let result = playlist::generate_playlist(&filters, &client).await;
    pb.finish_and_clear();

    let playlist = match result {
        Ok(playlist) => playlist,
        Err(GroovifyError::Validation(validation)) => {
            for (field, message) in &validation.errors {
                warning!("{}: {}", field, message);
            }
            error!("Invalid playlist filters");
        }
        Err(e) => error!("Failed to generate playlist: {}", e),
    };

    if as_json {
        match serde_json::to_string_pretty(&playlist) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to serialize playlist: {}", e),
        }
        return;
    }

    print_playlist(&playlist);
}

fn print_playlist(playlist: &Playlist) {
    let meta = &playlist.metadata;

    success!("Playlist: {} ({})", playlist.name, playlist.id);
    info!(
        "Tracks: {} / {} requested",
        meta.actual_track_count, meta.requested_track_count
    );
    info!("Filters relaxed: {}", meta.filters_relaxed);
    if let Some(notes) = &meta.notes {
        warning!("{}", notes);
    }

    if playlist.tracks.is_empty() {
        return;
    }

    let rows: Vec<TrackTableRow> = playlist
        .tracks
        .iter()
        .enumerate()
        .map(|(i, track)| TrackTableRow::from_track(i + 1, track))
        .collect();
    println!("{}", Table::new(rows));
}
