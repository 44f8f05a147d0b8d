use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// One page of a playlist's tracks as returned by the Spotify Web API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemsResponse {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

/// A track entry within a playlist. Local files carry no id, hence `Option`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserPlaylistsResponse {
    pub items: Vec<Playlist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
    pub snapshot_id: String,
}

/// Track payload returned by the SoundStat track endpoint.
///
/// Every field consumed by the feature schema is mandatory here: a payload
/// that lacks one fails deserialization and the track is dropped from the
/// batch rather than imputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<String>,
    #[serde(default)]
    pub genre: Option<String>,
    pub popularity: f64,
    pub duration_ms: f64,
    pub features: AudioFeatures,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub tempo: f64,
    pub key: i64,
    pub mode: i64,
    pub key_confidence: f64,
    pub energy: f64,
    pub danceability: f64,
    pub valence: f64,
    pub instrumentalness: f64,
    pub acousticness: f64,
    pub loudness: f64,
    pub segments: SegmentStats,
    pub beats: BeatStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentStats {
    pub count: f64,
    pub average_duration: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeatStats {
    pub count: f64,
    pub regularity: f64,
}

/// One entry of a mood-transition recommendation: a 1-based rank, the
/// Spotify track id and the 0-100 transition score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub rank: usize,
    pub track_id: String,
    pub transition_score: f64,
}

#[derive(Tabled)]
pub struct RecommendationTableRow {
    pub rank: usize,
    pub track_id: String,
    pub score: String,
}

#[derive(Tabled)]
pub struct MoodTableRow {
    pub code: usize,
    pub mood: String,
    pub model: String,
}
