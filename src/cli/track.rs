use crate::{
    config::SpotifyConfig,
    error, info,
    spotify::{CatalogClient, SpotifyClient},
    success,
};

pub async fn track(id: String) {
    let client = SpotifyClient::new(SpotifyConfig::from_env());

    let track = match client.get_track(&id).await {
        Ok(track) => track,
        Err(e) => error!("Failed to load track {}: {}", id, e),
    };

    success!("{} - {}", track.artist_names(), track.name);
    info!(
        "Album: {} ({})",
        track.album.name,
        track.album.release_date.as_deref().unwrap_or("unknown")
    );
    info!(
        "Duration: {}:{:02}",
        track.duration_ms / 60_000,
        (track.duration_ms / 1000) % 60
    );
    info!("Explicit: {}", track.explicit);
    info!("URI: {}", track.uri);
    if let Some(preview) = &track.preview_url {
        info!("Preview: {}", preview);
    }
}
