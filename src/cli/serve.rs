use crate::{config::SpotifyConfig, error, info, server, spotify::SpotifyClient};

pub async fn serve() {
    let client = SpotifyClient::new(SpotifyConfig::from_env());
    let addr = crate::config::server_addr();

    info!("Listening on http://{}", addr);
    if let Err(e) = server::start_api_server(&addr, client).await {
        error!("Server stopped: {}", e);
    }
}
