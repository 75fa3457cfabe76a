//! Session errors

use thiserror::Error;

/// Errors surfaced while running a session
#[derive(Debug, Error)]
pub enum SessionError {
    /// Playback controller or engine failure
    #[error(transparent)]
    Playback(#[from] vibe_playback::PlaybackError),

    /// Core storage or validation failure
    #[error(transparent)]
    Core(#[from] vibe_core::VibeError),
}

/// Result alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
