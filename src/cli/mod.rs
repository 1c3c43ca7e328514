//! # CLI Module
//!
//! Terminal front end for moodtunes. Every command builds the same
//! [`Context`] from the environment: a [`SpotifyApi`] client, a
//! [`TokenManager`] over the credential file, and a [`Recommender`].
//!
//! ## Commands
//!
//! - [`chat`] - interactive conversation; free text is classified, `/mood`
//!   picks a mood explicitly, the now-playing poll runs in the background
//! - [`recommend`] - one-shot recommendation for a mood or a sentence
//! - [`detect`] - prints the mood detected for a sentence, no network
//! - [`now_playing`] - prints the track currently playing
//! - [`token_set`], [`token_show`], [`token_clear`] - hand over, inspect and
//!   drop the stored Spotify credential
//! - [`serve`] - runs the local token-refresh relay
//!
//! ## Sign-in Handling
//!
//! The interactive authorization handshake with Spotify happens elsewhere;
//! its result is handed over with `moodtunes token set`. Whenever a command
//! ends up without a usable credential it prints [`SIGN_IN_HINT`] and exits.

mod chat;
mod now_playing;
mod recommend;
mod serve;
mod token;

use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::Config,
    management::{CredentialStore, FileCredentialStore, Recommender, TokenManager},
    spotify::SpotifyApi,
    types::PlaylistRecord,
    utils,
};

pub use chat::chat;
pub use now_playing::now_playing;
pub use recommend::detect;
pub use recommend::recommend;
pub use serve::serve;
pub use token::token_clear;
pub use token::token_set;
pub use token::token_show;

pub const SIGN_IN_HINT: &str =
    "Not signed in to Spotify. Sign in again and run `moodtunes token set`.";

pub(crate) struct Context {
    pub config: Config,
    pub api: SpotifyApi,
    pub tokens: TokenManager,
    pub recommender: Recommender,
}

impl Context {
    pub fn from_env() -> Self {
        let config = Config::from_env();
        let api = SpotifyApi::from_config(&config);
        let store: Arc<dyn CredentialStore> =
            Arc::new(FileCredentialStore::new(config.store_path.clone()));
        let tokens = TokenManager::new(store, api.clone());
        let recommender = Recommender::new(api.clone(), tokens.clone());

        Self {
            config,
            api,
            tokens,
            recommender,
        }
    }
}

pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

pub(crate) fn print_playlists(playlists: &[PlaylistRecord]) {
    if playlists.is_empty() {
        return;
    }

    let table = Table::new(utils::playlist_table_rows(playlists));
    println!("{}", table);
}
