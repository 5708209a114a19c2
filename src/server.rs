use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};

use crate::{Res, api, spotify::CatalogClient};

pub fn router(catalog: Arc<dyn CatalogClient>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/playlists", post(api::create_playlist))
        .with_state(catalog)
}

pub async fn start_api_server<C>(addr: &str, catalog: C) -> Res<()>
where
    C: CatalogClient + 'static,
{
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| format!("Failed to parse server address {}: {}", addr, e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "http server listening");
    axum::serve(listener, router(Arc::new(catalog))).await?;
    Ok(())
}
