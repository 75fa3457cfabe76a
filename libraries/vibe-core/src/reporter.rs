//! Listening-time reporting seam
//!
//! The playback controller reports (track, listened duration) spans through
//! this trait so it never depends on the statistics crate directly. The
//! contract is infallible by signature: implementations own their failure
//! handling (log and swallow) because playback must never be blocked by a
//! stats-write failure.

use crate::types::Track;
use async_trait::async_trait;

/// Receiver for listened-time spans emitted by the playback controller
#[async_trait]
pub trait PlayReporter: Send {
    /// Report that `listened_ms` of `track` was actually listened to.
    ///
    /// Called whenever the current track changes or finishes. Spans are
    /// never reported twice and never exceed wall-clock playback time.
    async fn report_play(&mut self, track: &Track, listened_ms: u64);
}

/// Reporter that drops every span (useful for tests and headless tools)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

#[async_trait]
impl PlayReporter for NullReporter {
    async fn report_play(&mut self, _track: &Track, _listened_ms: u64) {}
}
