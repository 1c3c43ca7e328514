use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    management::TokenManager,
    mood,
    spotify::SpotifyApi,
    types::{Mood, PlaylistRecord},
};

/// Turns a mood into playlist recommendations from the Spotify search API.
#[derive(Clone)]
pub struct Recommender {
    api: SpotifyApi,
    tokens: TokenManager,
}

impl Recommender {
    pub fn new(api: SpotifyApi, tokens: TokenManager) -> Self {
        Self { api, tokens }
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    pub fn api(&self) -> &SpotifyApi {
        &self.api
    }

    /// Searches playlists for the mood. An empty list means the provider had
    /// no match. A 401 from the provider clears the stored credential before
    /// `Unauthorized` is returned.
    pub async fn fetch_playlists(&self, mood: Mood) -> Result<Vec<PlaylistRecord>> {
        let token = self.tokens.get_valid_access_token().await?;

        match self.api.search_playlists(&token, mood).await {
            Ok(playlists) => {
                debug!(%mood, count = playlists.len(), "playlists fetched");
                Ok(playlists)
            }
            Err(Error::Unauthorized) => {
                warn!(%mood, "search rejected the access token, clearing credential");
                if let Err(e) = self.tokens.evict().await {
                    warn!(error = %e, "failed to clear stored credential");
                }
                Err(Error::Unauthorized)
            }
            Err(e) => Err(e),
        }
    }

    /// Detects the mood of the text and fetches playlists for it.
    pub async fn process_message(&self, text: &str) -> Result<(Mood, Vec<PlaylistRecord>)> {
        let mood = mood::classify(text);
        let playlists = self.fetch_playlists(mood).await?;
        Ok((mood, playlists))
    }
}
