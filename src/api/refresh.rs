use std::sync::Arc;

use axum::{
    Extension,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::spotify;

/// Upstream settings of the refresh relay.
#[derive(Debug, Clone)]
pub struct RelayState {
    pub http: Client,
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
}

impl RelayState {
    pub fn new(
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RefreshQuery {
    pub refresh_token: Option<String>,
}

pub async fn refresh_token(
    Query(params): Query<RefreshQuery>,
    Extension(state): Extension<Arc<RelayState>>,
) -> Response {
    let Some(refresh_token) = params.refresh_token.filter(|t| !t.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "missing refresh_token" })),
        )
            .into_response();
    };

    match spotify::auth::refresh_grant(
        &state.http,
        &state.token_url,
        &state.client_id,
        &state.client_secret,
        &refresh_token,
    )
    .await
    {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            warn!(error = %e, "refresh grant failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
