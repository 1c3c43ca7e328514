//! Mood driven playlist recommendations for Spotify
//!
//! This library detects a mood from free chat text and turns it into Spotify
//! playlist recommendations. It owns the Spotify credential of a session,
//! refreshing it through a local relay and dropping it when Spotify rejects
//! it, and keeps a "now playing" status fresh in the background.
//!
//! # Modules
//!
//! - `api` - HTTP handlers of the local token-refresh relay
//! - `chat` - Conversation orchestration and the now-playing poller
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy of the recommendation core
//! - `management` - Credential storage, token lifecycle, recommendations
//! - `mood` - Keyword based mood detection
//! - `server` - Router and listener of the refresh relay
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use moodtunes::{chat::ChatSession, management::*, spotify::SpotifyApi};
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = SpotifyApi::new("https://api.spotify.com/v1", "http://localhost:8888/refresh_token");
//!     let tokens = TokenManager::new(Arc::new(MemoryCredentialStore::new()), api.clone());
//!     let mut session = ChatSession::new(Recommender::new(api, tokens));
//!     session.send_message("I feel great today").await;
//! }
//! ```

pub mod api;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod mood;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// Boxed error alias for command and server glue.
///
/// The recommendation core reports [`Error`]; everything around it that only
/// needs to print a failure and stop uses this alias.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational line with a blue `o` marker.
///
/// ```
/// info!("Detected mood: {}", mood);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success line with a green check mark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error line with a red `!` marker and exits with status 1.
///
/// Only for command level failures; library code returns [`Error`] instead.
///
/// ```
/// error!("Failed to store credential: {}", e);
/// // not reached
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning line with a yellow `!` marker.
///
/// ```
/// warning!("No playlists found for {}. Try another mood!", mood);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
