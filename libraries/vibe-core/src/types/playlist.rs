/// Playlist domain type and export/import wire format
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Current playlist export format version
pub const PLAYLIST_EXPORT_VERSION: u32 = 1;

/// User-created playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: String,

    /// Playlist name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Ordered track ids (references into the library)
    pub track_ids: Vec<String>,

    /// Creation time (epoch ms)
    pub created_at: i64,

    /// Last modification time (epoch ms)
    pub updated_at: i64,

    /// Artwork image locator (optional)
    pub artwork: Option<String>,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now().timestamp_millis();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            track_ids: Vec::new(),
            created_at: now,
            updated_at: now,
            artwork: None,
        }
    }
}

/// Playlist export/import wire format
///
/// Serialized with camelCase keys so exported files interoperate with the
/// mobile app's JSON (`{ name, description?, trackIds, exportedAt, version }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistExport {
    /// Playlist name
    pub name: String,

    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ordered track ids
    pub track_ids: Vec<String>,

    /// Export timestamp (epoch ms)
    pub exported_at: i64,

    /// Format version
    pub version: u32,
}

impl PlaylistExport {
    /// Export a playlist, stamping the current fields
    pub fn from_playlist(playlist: &Playlist) -> Self {
        Self::from_playlist_at(playlist, Utc::now().timestamp_millis())
    }

    /// Export a playlist with an explicit timestamp
    pub fn from_playlist_at(playlist: &Playlist, exported_at: i64) -> Self {
        Self {
            name: playlist.name.clone(),
            description: playlist.description.clone(),
            track_ids: playlist.track_ids.clone(),
            exported_at,
            version: PLAYLIST_EXPORT_VERSION,
        }
    }

    /// Serialize to the wire format
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Parse an imported playlist file.
    ///
    /// Validation is deliberately minimal: `name` must be a non-empty string
    /// and `trackIds` must be an array. Anything else returns `None`, which
    /// callers surface as "Invalid playlist file". Non-string array elements
    /// are skipped; unknown fields are ignored.
    pub fn import(json: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(json).ok()?;

        let name = value.get("name")?.as_str()?;
        if name.is_empty() {
            return None;
        }

        let track_ids = value
            .get("trackIds")?
            .as_array()?
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect();

        Some(Self {
            name: name.to_string(),
            description: value
                .get("description")
                .and_then(Value::as_str)
                .map(String::from),
            track_ids,
            exported_at: value
                .get("exportedAt")
                .and_then(Value::as_i64)
                .unwrap_or(0),
            version: value
                .get("version")
                .and_then(Value::as_u64)
                .unwrap_or(u64::from(PLAYLIST_EXPORT_VERSION)) as u32,
        })
    }

    /// Materialize the export as a new playlist
    pub fn into_playlist(self) -> Playlist {
        let mut playlist = Playlist::new(self.name);
        playlist.description = self.description;
        playlist.track_ids = self.track_ids;
        playlist
    }
}
