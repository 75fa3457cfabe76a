//! Persistent equalizer settings
//!
//! Same persistence shape as the stats store: settings are best-effort,
//! failures are logged and swallowed.

use crate::equalizer::Equalizer;
use std::sync::Arc;
use vibe_core::BlobStore;

const EQ_KEY: &str = "equalizer";

/// An [`Equalizer`] persisted through a [`BlobStore`]
pub struct EqStore {
    equalizer: Equalizer,
    blobs: Arc<dyn BlobStore>,
}

impl EqStore {
    /// Restore settings from `blobs`, falling back to the flat default
    pub async fn load(blobs: Arc<dyn BlobStore>) -> Self {
        let equalizer = match blobs.load(EQ_KEY).await {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(eq) => eq,
                Err(err) => {
                    tracing::warn!(error = %err, "persisted equalizer did not parse, using defaults");
                    Equalizer::new()
                }
            },
            Ok(None) => Equalizer::new(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read persisted equalizer, using defaults");
                Equalizer::new()
            }
        };

        Self { equalizer, blobs }
    }

    /// The settings themselves
    pub fn equalizer(&self) -> &Equalizer {
        &self.equalizer
    }

    /// Mutate the settings, then flush them.
    ///
    /// Mutations go through a closure so a batch of band edits costs one
    /// write.
    pub async fn update(&mut self, apply: impl FnOnce(&mut Equalizer)) {
        apply(&mut self.equalizer);
        self.flush().await;
    }

    /// Write the current settings to the blob store
    pub async fn flush(&self) {
        let value = match serde_json::to_value(&self.equalizer) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize equalizer");
                return;
            }
        };
        if let Err(err) = self.blobs.save(EQ_KEY, &value).await {
            tracing::warn!(error = %err, "failed to persist equalizer");
        }
    }
}
