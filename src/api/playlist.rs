use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{info, warn};

use crate::{
    error::GroovifyError,
    playlist::generate_playlist,
    spotify::CatalogClient,
    types::PlaylistFilters,
};

pub const NO_FILTERS_MESSAGE: &str =
    "Provide at least one playlist filter before generating a playlist";

pub async fn create_playlist(
    State(catalog): State<Arc<dyn CatalogClient>>,
    Json(filters): Json<PlaylistFilters>,
) -> Response {
    if filters.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": NO_FILTERS_MESSAGE })),
        )
            .into_response();
    }

    info!(?filters, "generate playlist request");

    match generate_playlist(&filters, catalog.as_ref()).await {
        Ok(playlist) => {
            info!(
                id = %playlist.id,
                tracks = playlist.metadata.actual_track_count,
                "playlist generated"
            );
            (StatusCode::OK, Json(playlist)).into_response()
        }
        Err(e) => error_response(e),
    }
}

fn error_response(err: GroovifyError) -> Response {
    let status = match &err {
        GroovifyError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        GroovifyError::SeedRequirement => StatusCode::BAD_REQUEST,
        GroovifyError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        GroovifyError::UpstreamProtocol(_)
        | GroovifyError::TokenRequest { .. }
        | GroovifyError::Api { .. }
        | GroovifyError::Transport(_) => StatusCode::BAD_GATEWAY,
    };

    warn!(status = status.as_u16(), error = %err, "playlist generation failed");

    let body = match &err {
        GroovifyError::Validation(validation) => json!({
            "error": "Invalid playlist filters",
            "fields": validation.errors,
        }),
        other => json!({ "error": other.to_string() }),
    };

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{spotify::MockCatalogClient, types::GenreFilter};

    fn state(catalog: MockCatalogClient) -> State<Arc<dyn CatalogClient>> {
        let catalog: Arc<dyn CatalogClient> = Arc::new(catalog);
        State(catalog)
    }

    #[tokio::test]
    async fn empty_request_is_rejected() {
        let mut catalog = MockCatalogClient::new();
        catalog.expect_search_tracks().never();

        let response = create_playlist(state(catalog), Json(PlaylistFilters::default())).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_filters_map_to_unprocessable_entity() {
        let catalog = MockCatalogClient::new();
        let filters = PlaylistFilters {
            track_count: Some(0),
            ..Default::default()
        };

        let response = create_playlist(state(catalog), Json(filters)).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn upstream_failure_maps_to_bad_gateway() {
        let mut catalog = MockCatalogClient::new();
        catalog.expect_search_tracks().returning(|_, _| {
            Err(GroovifyError::Api {
                status: 503,
                path: "/search".to_string(),
                message: "Service Unavailable".to_string(),
            })
        });
        catalog
            .expect_get_recommendations()
            .returning(|_| Ok(Vec::new()));

        let filters = PlaylistFilters {
            genre: Some(GenreFilter::One("rock".to_string())),
            ..Default::default()
        };

        let response = create_playlist(state(catalog), Json(filters)).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn generated_playlist_is_returned() {
        let mut catalog = MockCatalogClient::new();
        catalog
            .expect_search_tracks()
            .returning(|_, _| Ok(Vec::new()));

        let filters = PlaylistFilters {
            track_count: Some(3),
            ..Default::default()
        };

        let response = create_playlist(state(catalog), Json(filters)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
