use reqwest::StatusCode;
use tracing::debug;

use crate::{
    error::{Error, Result},
    spotify::{SpotifyApi, check_status},
    types::{CurrentTrack, CurrentlyPlayingResponse, DEFAULT_TRACK_IMAGE, UNKNOWN_ARTIST},
    utils,
};

impl SpotifyApi {
    /// Fetches the track currently playing on the user's active device.
    ///
    /// Returns `Ok(None)` when nothing is playing: Spotify answers `204 No
    /// Content` in that case, or a body without an `item`.
    pub async fn currently_playing(&self, token: &str) -> Result<Option<CurrentTrack>> {
        let api_url = self.endpoint("/me/player/currently-playing");
        debug!(url = %api_url, "polling currently playing");

        let response = self.http.get(&api_url).bearer_auth(token).send().await?;
        let response = check_status(response)?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(None);
        }

        let body: CurrentlyPlayingResponse = serde_json::from_slice(&bytes)
            .map_err(|e| Error::Provider(format!("malformed player response: {}", e)))?;

        Ok(track_from_response(body))
    }
}

pub fn track_from_response(body: CurrentlyPlayingResponse) -> Option<CurrentTrack> {
    let item = body.item?;

    let artist = item
        .artists
        .into_iter()
        .next()
        .and_then(|a| utils::non_empty(a.name))
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

    let image = item
        .album
        .and_then(|album| album.images)
        .and_then(|images| images.into_iter().next())
        .and_then(|image| utils::non_empty(image.url))
        .unwrap_or_else(|| DEFAULT_TRACK_IMAGE.to_string());

    Some(CurrentTrack {
        id: item.id.unwrap_or_default(),
        name: item.name.unwrap_or_default(),
        artist,
        image,
        is_playing: body.is_playing,
    })
}
