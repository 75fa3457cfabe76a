//! Core types for playback management

use serde::{Deserialize, Serialize};

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the queue ends
    Off,

    /// Loop the entire queue
    All,

    /// Loop the current track only
    One,
}

impl RepeatMode {
    /// Cycle `off -> all -> one -> off`
    pub fn next(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// A/B loop point selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPoint {
    /// Loop region start
    A,
    /// Loop region end
    B,
}

/// Preset playback rates stepped through by `cycle_playback_rate`
pub const RATE_PRESETS: [f32; 5] = [0.75, 1.0, 1.25, 1.5, 2.0];

/// Minimum playback rate
pub const MIN_RATE: f32 = 0.5;

/// Maximum playback rate
pub const MAX_RATE: f32 = 2.0;

/// "Previous" restarts the current track beyond this position
pub const PREVIOUS_RESTART_THRESHOLD_MS: u64 = 3000;

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Initial volume (0.0 - 1.0, default: 1.0)
    pub volume: f32,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Initial shuffle state (default: off)
    pub shuffled: bool,

    /// Initial playback rate (default: 1.0)
    pub playback_rate: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            repeat: RepeatMode::Off,
            shuffled: false,
            playback_rate: 1.0,
        }
    }
}
