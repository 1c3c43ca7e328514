use tracing::debug;

use crate::{
    config::{SEARCH_LIMIT, SEARCH_MARKET},
    error::{Error, Result},
    spotify::{SpotifyApi, check_status},
    types::{
        DEFAULT_PLAYLIST_IMAGE, Mood, PLACEHOLDER_URL, PlaylistItem, PlaylistRecord,
        SearchResponse, UNKNOWN_ARTIST,
    },
    utils,
};

impl SpotifyApi {
    /// Searches playlists using the mood label as the query term.
    ///
    /// Sends `q={mood}&type=playlist&limit=10&market=US` with the bearer token.
    /// A response without a playlist list yields an empty result.
    ///
    /// # Errors
    ///
    /// - [`Error::Unauthorized`] on 401
    /// - [`Error::Provider`] on any other non-success status or a body that
    ///   is not JSON
    /// - [`Error::Http`] when the request cannot be sent
    pub async fn search_playlists(&self, token: &str, mood: Mood) -> Result<Vec<PlaylistRecord>> {
        let limit = SEARCH_LIMIT.to_string();
        let api_url = self.endpoint("/search");
        debug!(%mood, url = %api_url, "searching playlists");

        let response = self
            .http
            .get(&api_url)
            .query(&[
                ("q", mood.as_str()),
                ("type", "playlist"),
                ("limit", limit.as_str()),
                ("market", SEARCH_MARKET),
            ])
            .bearer_auth(token)
            .send()
            .await?;
        let response = check_status(response)?;

        let body = response
            .json::<SearchResponse>()
            .await
            .map_err(|e| Error::Provider(format!("malformed search response: {}", e)))?;

        Ok(playlists_from_response(body))
    }
}

/// Normalizes a search response: null entries and entries without an id are
/// dropped, duplicate ids keep their first occurrence.
pub fn playlists_from_response(body: SearchResponse) -> Vec<PlaylistRecord> {
    let items = body
        .playlists
        .and_then(|page| page.items)
        .unwrap_or_default();

    let mut playlists: Vec<PlaylistRecord> = items
        .into_iter()
        .flatten()
        .filter_map(to_record)
        .collect();

    utils::remove_duplicate_playlists(&mut playlists);
    playlists
}

fn to_record(item: PlaylistItem) -> Option<PlaylistRecord> {
    let id = utils::non_empty(item.id)?;

    let image_url = item
        .images
        .and_then(|images| images.into_iter().next())
        .and_then(|image| utils::non_empty(image.url))
        .unwrap_or_else(|| DEFAULT_PLAYLIST_IMAGE.to_string());

    let external_url = item
        .external_urls
        .and_then(|urls| utils::non_empty(urls.spotify))
        .unwrap_or_else(|| PLACEHOLDER_URL.to_string());

    let owner = item
        .owner
        .and_then(|owner| utils::non_empty(owner.display_name))
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

    Some(PlaylistRecord {
        id,
        name: item.name.unwrap_or_default(),
        description: item.description.unwrap_or_default(),
        image_url,
        external_url,
        track_count: item.tracks.and_then(|t| t.total).unwrap_or(0),
        owner,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Vec<PlaylistRecord> {
        playlists_from_response(serde_json::from_str(body).unwrap())
    }

    #[test]
    fn test_full_item_is_mapped() {
        let playlists = parse(
            r#"{"playlists":{"items":[{
                "id":"p1","name":"Chill Vibes","description":"slow",
                "images":[{"url":"https://img/1"},{"url":"https://img/2"}],
                "external_urls":{"spotify":"https://open.spotify.com/playlist/p1"},
                "tracks":{"total":42},
                "owner":{"display_name":"Spotify"}
            }]}}"#,
        );

        assert_eq!(
            playlists,
            vec![PlaylistRecord {
                id: "p1".to_string(),
                name: "Chill Vibes".to_string(),
                description: "slow".to_string(),
                image_url: "https://img/1".to_string(),
                external_url: "https://open.spotify.com/playlist/p1".to_string(),
                track_count: 42,
                owner: "Spotify".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let playlists = parse(r#"{"playlists":{"items":[{"id":"p1","name":"Bare"}]}}"#);

        let playlist = &playlists[0];
        assert_eq!(playlist.image_url, DEFAULT_PLAYLIST_IMAGE);
        assert_eq!(playlist.external_url, PLACEHOLDER_URL);
        assert_eq!(playlist.track_count, 0);
        assert_eq!(playlist.owner, UNKNOWN_ARTIST);
        assert_eq!(playlist.description, "");
    }

    #[test]
    fn test_empty_images_use_default() {
        let playlists = parse(r#"{"playlists":{"items":[{"id":"p1","images":[]}]}}"#);
        assert_eq!(playlists[0].image_url, DEFAULT_PLAYLIST_IMAGE);
    }

    #[test]
    fn test_items_without_id_are_dropped() {
        let playlists = parse(
            r#"{"playlists":{"items":[null,{"name":"no id"},{"id":"","name":"blank"},{"id":"p2","name":"kept"}]}}"#,
        );
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].id, "p2");
    }

    #[test]
    fn test_missing_list_is_empty() {
        assert!(parse(r#"{}"#).is_empty());
        assert!(parse(r#"{"playlists":{}}"#).is_empty());
        assert!(parse(r#"{"playlists":{"items":[]}}"#).is_empty());
        assert!(parse(r#"{"playlists":null}"#).is_empty());
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let playlists = parse(
            r#"{"playlists":{"items":[{"id":"p1","name":"first"},{"id":"p1","name":"second"}]}}"#,
        );
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].name, "first");
    }
}
