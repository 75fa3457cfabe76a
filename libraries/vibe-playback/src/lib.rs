//! Vibe Player - Playback Control
//!
//! Platform-agnostic playback control for Vibe Player.
//!
//! This crate provides:
//! - Transport control (play/pause/resume/stop/seek)
//! - Queue management with current-position tracking
//! - Shuffle (Fisher-Yates, current track preserved)
//! - Repeat modes (Off, All, One)
//! - Playback rate presets (0.75x - 2.0x)
//! - A/B loop regions
//! - Sleep timer with volume fade
//! - Listening-time reporting to the statistics layer
//!
//! # Architecture
//!
//! `vibe-playback` never touches an audio device. The platform provides an
//! [`AudioEngine`] implementation; the [`PlayerController`] drives it and
//! ingests its asynchronous status ticks. Each load carries a generation
//! number echoed back in every status so a tick from a superseded load can
//! be recognized and dropped.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use vibe_playback::{FakeEngine, PlayerConfig, PlayerController};
//! use vibe_core::Track;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> vibe_playback::Result<()> {
//! let (engine, _log) = FakeEngine::new();
//! let mut player = PlayerController::new(Box::new(engine), PlayerConfig::default());
//!
//! let tracks = vec![
//!     Track::new("1", "/music/one.mp3", "One", "Artist"),
//!     Track::new("2", "/music/two.mp3", "Two", "Artist"),
//! ];
//! player.set_queue(tracks, 0).await;
//!
//! let first = player.queue()[0].clone();
//! player.play(Some(first)).await?;
//! assert!(player.is_playing());
//!
//! player.next().await?;
//! assert_eq!(player.current_track().unwrap().id, "2");
//! # Ok(())
//! # }
//! ```

mod controller;
mod engine;
mod error;
mod events;
mod fake;
mod queue;
mod shuffle;
mod sleep_timer;
pub mod types;

// Public exports
pub use controller::PlayerController;
pub use engine::{AudioEngine, EngineStatus};
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use fake::{CallLog, EngineCall, FakeEngine};
pub use queue::Queue;
pub use shuffle::shuffle_tracks;
pub use sleep_timer::{format_remaining, SleepTick, SleepTimer, FADE_WINDOW};
pub use types::{LoopPoint, PlayerConfig, RepeatMode};
