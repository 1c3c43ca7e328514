use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};

use crate::{
    Res,
    api::{self, RelayState},
    config::Config,
};

pub fn relay_router(state: RelayState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route(
            "/refresh_token",
            get(api::refresh_token).layer(Extension(Arc::new(state))),
        )
}

/// Binds the refresh relay on `SERVER_ADDRESS` and serves until the process ends.
pub async fn start_relay_server(config: &Config) -> Res<()> {
    let Some((client_id, client_secret)) = config.client_credentials() else {
        return Err(
            "SPOTIFY_API_AUTH_CLIENT_ID and SPOTIFY_API_AUTH_CLIENT_SECRET must be set".into(),
        );
    };

    let addr = SocketAddr::from_str(&config.server_address)
        .map_err(|e| format!("Failed to parse server address: {}", e))?;

    let app = relay_router(RelayState::new(
        config.token_url.clone(),
        client_id,
        client_secret,
    ));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "refresh relay listening");
    axum::serve(listener, app).await?;
    Ok(())
}
