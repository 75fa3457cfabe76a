/// Track domain type
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single playable audio item with metadata.
///
/// Tracks are immutable values once scanned: the playback controller only
/// ever holds copies and never mutates them. `duration_ms` is the nominal
/// length from the library scan; the audio engine may report a different
/// decoded length once a track is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Stable unique identifier
    pub id: String,

    /// Playable locator (file path or URI)
    pub uri: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Nominal track length in milliseconds
    pub duration_ms: u64,

    /// Artwork image locator (optional)
    pub artwork: Option<String>,

    /// Original filename
    pub filename: String,

    /// File creation time (epoch ms)
    pub created_at: i64,

    /// File modification time (epoch ms)
    pub modified_at: i64,
}

impl Track {
    /// Create a track with minimal metadata
    pub fn new(
        id: impl Into<String>,
        uri: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
    ) -> Self {
        let uri = uri.into();
        let filename = uri.rsplit('/').next().unwrap_or(&uri).to_string();
        Self {
            id: id.into(),
            uri,
            title: title.into(),
            artist: artist.into(),
            album: String::new(),
            duration_ms: 0,
            artwork: None,
            filename,
            created_at: 0,
            modified_at: 0,
        }
    }

    /// Get the nominal track length as a `Duration`
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Set the nominal track length from a `Duration`
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_ms = duration.as_millis() as u64;
    }
}
