use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tabled::Tabled;
use uuid::Uuid;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const DEFAULT_PLAYLIST_IMAGE: &str = "/default-playlist.png";
pub const DEFAULT_TRACK_IMAGE: &str = "/default-track.png";
pub const PLACEHOLDER_URL: &str = "#";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Energetic,
    Calm,
    Focus,
}

impl Mood {
    /// Every mood in classification priority order.
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Energetic,
        Mood::Calm,
        Mood::Focus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Energetic => "energetic",
            Mood::Calm => "calm",
            Mood::Focus => "focus",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown mood '{}', expected one of: happy, sad, energetic, calm, focus",
                    s
                )
            })
    }
}

/// Access/refresh token pair plus the moment the access token was issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: String,
    pub issued_at_millis: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub external_url: String,
    pub track_count: u64,
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: Uuid,
    pub text: String,
    pub is_from_user: bool,
    pub mood: Option<Mood>,
}

impl ConversationMessage {
    pub fn from_user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            is_from_user: true,
            mood: None,
        }
    }

    pub fn from_bot(text: impl Into<String>, mood: Option<Mood>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            is_from_user: false,
            mood,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentTrack {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub image: String,
    pub is_playing: bool,
}

// Provider response shapes. Every field is optional because the search API
// is known to return null placeholders and partially populated entries.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    pub playlists: Option<PlaylistPage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistPage {
    pub items: Option<Vec<Option<PlaylistItem>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistItem {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub images: Option<Vec<Image>>,
    pub external_urls: Option<ExternalUrls>,
    pub tracks: Option<TracksRef>,
    pub owner: Option<Owner>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Image {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TracksRef {
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Owner {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentlyPlayingResponse {
    pub item: Option<PlayingItem>,
    #[serde(default)]
    pub is_playing: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayingItem {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    pub album: Option<AlbumRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistRef {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlbumRef {
    pub images: Option<Vec<Image>>,
}

/// Body returned by the token-refresh relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub owner: String,
    pub tracks: u64,
    pub url: String,
}
