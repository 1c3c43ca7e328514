//! # Spotify Integration Module
//!
//! HTTP client for the parts of the Spotify Web API that moodtunes consumes,
//! plus the OAuth refresh grant used by the local refresh relay.
//!
//! ## Architecture
//!
//! ```text
//! Chat session / CLI
//!          ↓
//! Management Layer (TokenManager, Recommender)
//!          ↓
//! SpotifyApi
//!     ├── search   GET {api}/search?type=playlist
//!     ├── player   GET {api}/me/player/currently-playing
//!     └── auth     GET {relay}/refresh_token, POST {accounts}/api/token
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Error Mapping
//!
//! Every call maps the response status the same way:
//! - `401 Unauthorized` becomes [`Error::Unauthorized`]
//! - `429 Too Many Requests` becomes [`Error::Provider`] carrying the
//!   `Retry-After` value
//! - any other non-success status becomes [`Error::Provider`]
//! - transport failures surface as [`Error::Http`]
//!
//! The client holds no credential of its own. Callers pass the bearer token
//! for each request, usually obtained from
//! [`TokenManager`](crate::management::TokenManager).

pub mod auth;
pub mod player;
pub mod search;

use reqwest::{Client, Response, StatusCode};

use crate::{
    config::Config,
    error::{Error, Result},
};

#[derive(Debug, Clone)]
pub struct SpotifyApi {
    http: Client,
    api_url: String,
    refresh_url: String,
}

impl SpotifyApi {
    pub fn new(api_url: impl Into<String>, refresh_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            refresh_url: refresh_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_url.clone(), config.refresh_url.clone())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{uri}{path}", uri = self.api_url, path = path)
    }
}

/// Maps non-success statuses onto the error taxonomy.
pub(crate) fn check_status(response: Response) -> Result<Response> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::Unauthorized);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);
        return Err(Error::Provider(format!(
            "rate limited by Spotify, retry after {} seconds",
            retry_after
        )));
    }

    if !status.is_success() {
        return Err(Error::Provider(format!(
            "{url} answered with status {status}",
            url = response.url().path(),
            status = status
        )));
    }

    Ok(response)
}
