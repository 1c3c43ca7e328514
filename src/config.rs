//! Configuration management for moodtunes.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory:
//! - Linux: `~/.local/share/moodtunes/.env`
//! - macOS: `~/Library/Application Support/moodtunes/.env`
//! - Windows: `%LOCALAPPDATA%/moodtunes/.env`
//!
//! Process environment variables take precedence over the file. Every value
//! has a default except the client credentials used by the refresh relay.

use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_REFRESH_URL: &str = "http://localhost:8888/refresh_token";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";

/// Number of playlists requested per search.
pub const SEARCH_LIMIT: u32 = 10;
/// Market filter sent with every search.
pub const SEARCH_MARKET: &str = "US";
/// Interval of the now-playing poll.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);
/// Access tokens older than this are refreshed before use. Spotify issues
/// tokens valid for 3600 seconds.
pub const TOKEN_TTL_MILLIS: i64 = 3_540_000;

/// Loads environment variables from `moodtunes/.env` in the local data
/// directory. A missing file is not an error.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Platform specific directory holding the `.env` file and the credential store.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodtunes");
    path
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Spotify Web API base URL (`SPOTIFY_API_URL`).
    pub api_url: String,
    /// Token-refresh relay endpoint (`MOODTUNES_REFRESH_URL`).
    pub refresh_url: String,
    /// Spotify accounts token endpoint used by the relay (`SPOTIFY_API_TOKEN_URL`).
    pub token_url: String,
    /// Bind address of the relay (`SERVER_ADDRESS`).
    pub server_address: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Credential file (`MOODTUNES_STORE`).
    pub store_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            refresh_url: DEFAULT_REFRESH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            client_id: None,
            client_secret: None,
            store_path: data_dir().join("credentials.json"),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: var_or("SPOTIFY_API_URL", defaults.api_url),
            refresh_url: var_or("MOODTUNES_REFRESH_URL", defaults.refresh_url),
            token_url: var_or("SPOTIFY_API_TOKEN_URL", defaults.token_url),
            server_address: var_or("SERVER_ADDRESS", defaults.server_address),
            client_id: var("SPOTIFY_API_AUTH_CLIENT_ID"),
            client_secret: var("SPOTIFY_API_AUTH_CLIENT_SECRET"),
            store_path: var("MOODTUNES_STORE")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
        }
    }

    /// Client id and secret, both required to run the refresh relay.
    pub fn client_credentials(&self) -> Option<(String, String)> {
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => Some((id.clone(), secret.clone())),
            _ => None,
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn var_or(key: &str, default: String) -> String {
    var(key).unwrap_or(default)
}
