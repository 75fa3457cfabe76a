//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The engine could not open or decode a track
    #[error("Failed to load track {track_id}: {reason}")]
    Load {
        /// Id of the track that failed to load
        track_id: String,
        /// Engine-reported failure reason
        reason: String,
    },

    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Audio engine command failed
    #[error("Engine error: {0}")]
    Engine(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
