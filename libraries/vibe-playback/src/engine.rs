//! Audio engine adapter contract
//!
//! The controller is platform-agnostic: decoding and output live behind this
//! trait, implemented by the host platform (desktop, mobile bridge, tests).
//! Commands are one-shot async calls; playback progress flows back as
//! [`EngineStatus`] ticks which the platform feeds into
//! [`PlayerController::ingest_status`](crate::PlayerController::ingest_status).
//!
//! Ticks are delivered at a platform-determined cadence, at minimum on
//! play/pause/seek/completion. Every tick carries the generation of the load
//! it belongs to so a delayed tick from a superseded load can never overwrite
//! newer state.

use crate::error::Result;
use async_trait::async_trait;
use vibe_core::Track;

/// Asynchronous status tick from the audio engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineStatus {
    /// Generation of the `load` call this tick belongs to
    pub generation: u64,

    /// Whether a track is loaded and the fields below are meaningful
    pub is_loaded: bool,

    /// Current playback position in milliseconds
    pub position_ms: u64,

    /// Decoded track length, once known
    pub duration_ms: Option<u64>,

    /// Whether the engine is actively producing audio
    pub is_playing: bool,

    /// Set on the tick where the track reached its natural end
    pub did_just_finish: bool,

    /// Set when a load failed (with `is_loaded: false`)
    pub load_error: Option<String>,
}

impl EngineStatus {
    /// A loaded, mid-playback tick for the given generation
    pub fn playing(generation: u64, position_ms: u64) -> Self {
        Self {
            generation,
            is_loaded: true,
            position_ms,
            duration_ms: None,
            is_playing: true,
            did_just_finish: false,
            load_error: None,
        }
    }

    /// A completion tick for the given generation
    pub fn finished(generation: u64, position_ms: u64) -> Self {
        Self {
            is_playing: false,
            did_just_finish: true,
            ..Self::playing(generation, position_ms)
        }
    }
}

/// Boundary interface to the platform's audio decode/output engine
///
/// All commands are single-stream: loading a new track replaces whatever was
/// loaded before. Implementations must finish or reject a superseded load
/// without corrupting state; the controller discards its stale ticks by
/// generation.
#[async_trait]
pub trait AudioEngine: Send {
    /// Load a track for playback.
    ///
    /// `generation` must be echoed on every status tick produced for this
    /// load. Fails if the URI is unreadable or the format is unsupported.
    async fn load(&mut self, track: &Track, generation: u64) -> Result<()>;

    /// Start or resume playback of the loaded track
    async fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping the loaded track and position
    async fn pause(&mut self) -> Result<()>;

    /// Stop playback and rewind to the start
    async fn stop(&mut self) -> Result<()>;

    /// Seek to a position in the loaded track
    async fn seek(&mut self, position_ms: u64) -> Result<()>;

    /// Set output volume (0.0 - 1.0)
    async fn set_volume(&mut self, volume: f32) -> Result<()>;

    /// Mute or unmute output without changing the volume setting
    async fn set_muted(&mut self, muted: bool) -> Result<()>;

    /// Set playback rate (0.5 - 2.0)
    async fn set_rate(&mut self, rate: f32) -> Result<()>;
}
