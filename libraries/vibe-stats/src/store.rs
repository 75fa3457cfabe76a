//! Persistent statistics store
//!
//! Wraps a [`StatsRecorder`] with a [`BlobStore`] so every mutation is
//! flushed to disk. Statistics are best-effort data: persistence failures
//! are logged and swallowed so they can never interrupt playback.

use crate::recorder::StatsRecorder;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::sync::Arc;
use tokio::sync::Mutex;
use vibe_core::{BlobStore, PlayReporter, Track};

const STATS_KEY: &str = "stats";

/// A [`StatsRecorder`] persisted through a [`BlobStore`]
pub struct StatsStore {
    recorder: StatsRecorder,
    blobs: Arc<dyn BlobStore>,
}

impl StatsStore {
    /// Restore statistics from `blobs`, starting fresh when nothing is
    /// persisted or the persisted blob does not parse.
    pub async fn load(blobs: Arc<dyn BlobStore>) -> Self {
        let recorder = match blobs.load(STATS_KEY).await {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(recorder) => recorder,
                Err(err) => {
                    tracing::warn!(error = %err, "persisted stats did not parse, starting fresh");
                    StatsRecorder::new()
                }
            },
            Ok(None) => StatsRecorder::new(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read persisted stats, starting fresh");
                StatsRecorder::new()
            }
        };

        Self { recorder, blobs }
    }

    /// Read access to the aggregates and queries
    pub fn recorder(&self) -> &StatsRecorder {
        &self.recorder
    }

    /// Record a play and flush
    pub async fn record_play(&mut self, track: &Track, duration_ms: u64) {
        self.recorder.record_play(track, duration_ms);
        self.flush().await;
    }

    /// Record a play stamped at `now` and flush
    pub async fn record_play_at(&mut self, track: &Track, duration_ms: u64, now: DateTime<Local>) {
        self.recorder.record_play_at(track, duration_ms, now);
        self.flush().await;
    }

    /// Discard all statistics and flush the empty state
    pub async fn reset(&mut self) {
        self.recorder.reset();
        self.flush().await;
    }

    /// Write the current aggregates to the blob store
    pub async fn flush(&self) {
        let value = match serde_json::to_value(&self.recorder) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize stats");
                return;
            }
        };
        if let Err(err) = self.blobs.save(STATS_KEY, &value).await {
            tracing::warn!(error = %err, "failed to persist stats");
        }
    }
}

/// Lets the playback controller report listened spans straight into a
/// shared stats store.
pub struct SharedStatsReporter(pub Arc<Mutex<StatsStore>>);

#[async_trait]
impl PlayReporter for SharedStatsReporter {
    async fn report_play(&mut self, track: &Track, listened_ms: u64) {
        self.0.lock().await.record_play(track, listened_ms).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::MINIMUM_PLAY_DURATION_MS;
    use tempfile::TempDir;
    use vibe_core::JsonFileStore;

    fn track(id: &str) -> Track {
        Track::new(id, format!("/music/{id}.mp3"), "Song", "Artist")
    }

    async fn file_store(dir: &TempDir) -> Arc<dyn BlobStore> {
        Arc::new(JsonFileStore::open(dir.path()).await.unwrap())
    }

    #[tokio::test]
    async fn persists_across_reload() {
        let dir = TempDir::new().unwrap();
        let blobs = file_store(&dir).await;

        let mut store = StatsStore::load(Arc::clone(&blobs)).await;
        store.record_play(&track("1"), 60_000).await;
        store.record_play(&track("1"), 90_000).await;
        drop(store);

        let restored = StatsStore::load(blobs).await;
        assert_eq!(restored.recorder().play_count.get("1"), Some(&2));
        assert_eq!(restored.recorder().total_listening_time_ms, 150_000);
    }

    #[tokio::test]
    async fn corrupt_blob_starts_fresh() {
        let dir = TempDir::new().unwrap();
        let blobs = file_store(&dir).await;
        blobs
            .save(STATS_KEY, &serde_json::json!("not a stats object"))
            .await
            .unwrap();

        let store = StatsStore::load(blobs).await;
        assert!(store.recorder().play_count.is_empty());
    }

    #[tokio::test]
    async fn reset_persists_empty_state() {
        let dir = TempDir::new().unwrap();
        let blobs = file_store(&dir).await;

        let mut store = StatsStore::load(Arc::clone(&blobs)).await;
        store.record_play(&track("1"), 60_000).await;
        store.reset().await;
        drop(store);

        let restored = StatsStore::load(blobs).await;
        assert!(restored.recorder().play_count.is_empty());
        assert_eq!(restored.recorder().total_listening_time_ms, 0);
    }

    #[tokio::test]
    async fn reporter_respects_minimum_duration() {
        let dir = TempDir::new().unwrap();
        let blobs = file_store(&dir).await;

        let shared = Arc::new(Mutex::new(StatsStore::load(blobs).await));
        let mut reporter = SharedStatsReporter(Arc::clone(&shared));
        reporter
            .report_play(&track("1"), MINIMUM_PLAY_DURATION_MS - 1)
            .await;
        reporter
            .report_play(&track("1"), MINIMUM_PLAY_DURATION_MS)
            .await;

        let store = shared.lock().await;
        assert_eq!(store.recorder().play_count.get("1"), Some(&1));
        assert_eq!(
            store.recorder().total_listening_time_ms,
            MINIMUM_PLAY_DURATION_MS
        );
    }
}
