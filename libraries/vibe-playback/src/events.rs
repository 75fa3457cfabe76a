//! Playback events
//!
//! Event-based communication for UI synchronization. The controller pushes
//! events onto an internal queue as it mutates state; any number of observers
//! on the dispatch thread compose by draining the queue after each operation.

use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Transport state changed (playing/paused/loading)
    StateChanged {
        /// Whether audio is playing
        is_playing: bool,
        /// Whether a load is in flight
        is_loading: bool,
    },

    /// The current track changed
    TrackChanged {
        /// Id of the new current track
        track_id: String,
        /// Id of the previous track (if any)
        previous_track_id: Option<String>,
    },

    /// A track reached its natural end
    TrackFinished {
        /// Id of the finished track
        track_id: String,
    },

    /// Queue contents changed (tracks added/removed/replaced/shuffled)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Volume or mute state changed
    VolumeChanged {
        /// Volume level (0.0 - 1.0)
        volume: f32,
        /// Whether output is muted
        is_muted: bool,
    },

    /// A playback error occurred
    Error {
        /// Human-readable error message
        message: String,
    },
}
