use std::fmt;

use serde::{Deserialize, Serialize};

/// Access token obtained from an implicit grant.
///
/// Never persisted and never refreshed; it lives until the process exits.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    access_token: String,
}

impl Credential {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// What the redirect carried back to the callback listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    Token {
        access_token: String,
        state: Option<String>,
    },
    Error {
        error: String,
        state: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    /// Artist names in the order the provider lists them.
    pub artists: Vec<String>,
}

impl Track {
    /// The first listed artist, or an empty name when the provider sent none.
    pub fn primary_artist(&self) -> &str {
        self.artists.first().map(String::as_str).unwrap_or_default()
    }
}

pub fn track_uri(id: &str) -> String {
    format!("spotify:track:{id}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackStatus {
    pub is_playing: bool,
    pub progress_ms: Option<u64>,
    pub item: Option<Track>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub is_active: bool,
    pub volume_percent: Option<u32>,
}

// Wire shapes of the Spotify Web API. Only the fields in use are declared.

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<TrackPage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<TrackObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackObject {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistObject {
    pub name: String,
}

impl TrackObject {
    /// Local files have no id and cannot be played by uri.
    pub fn into_track(self) -> Option<Track> {
        Some(Track {
            id: self.id?,
            name: self.name,
            artists: self.artists.into_iter().map(|a| a.name).collect(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentlyPlayingResponse {
    #[serde(default)]
    pub is_playing: bool,
    pub progress_ms: Option<u64>,
    pub item: Option<TrackObject>,
}

impl From<CurrentlyPlayingResponse> for PlaybackStatus {
    fn from(res: CurrentlyPlayingResponse) -> Self {
        Self {
            is_playing: res.is_playing,
            progress_ms: res.progress_ms,
            item: res.item.and_then(TrackObject::into_track),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DevicesResponse {
    #[serde(default)]
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartPlaybackRequest {
    pub uris: Vec<String>,
}
