//! Vibe Player - Listening Statistics
//!
//! Play counts, listening time and history for Vibe Player.
//!
//! [`StatsRecorder`] holds the pure aggregates and queries; [`StatsStore`]
//! persists them through a [`vibe_core::BlobStore`] and plugs into the
//! playback controller as its [`vibe_core::PlayReporter`].
//!
//! Plays shorter than 30 seconds are treated as skips and never recorded.

mod recorder;
mod store;

pub use recorder::{
    DayListening, PlayRecord, StatsRecorder, TopArtist, TopTrack, MAX_HISTORY_SIZE,
    MINIMUM_PLAY_DURATION_MS,
};
pub use store::{SharedStatsReporter, StatsStore};
