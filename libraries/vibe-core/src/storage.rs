//! Flat key-value JSON blob persistence
//!
//! Every store persists its state as one JSON blob per key. This trait
//! abstracts where the blobs live so the playback and stats layers can be
//! tested against a directory-backed store (or any other implementation)
//! without knowing about the filesystem.

use crate::error::{Result, VibeError};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Key-value store for JSON blobs
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Load the blob for `key`, or `None` if it has never been saved
    async fn load(&self, key: &str) -> Result<Option<Value>>;

    /// Save the blob for `key`, replacing any previous value
    async fn save(&self, key: &str, value: &Value) -> Result<()>;

    /// Remove the blob for `key` (missing keys are not an error)
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Directory-backed blob store: one `<key>.json` file per key
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `root`, creating the directory if needed
    pub async fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        // Keys are plain identifiers; reject anything that could escape root
        if key.is_empty() || key.contains(['/', '\\', '.']) {
            return Err(VibeError::storage(format!("invalid blob key: {key:?}")));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

#[async_trait]
impl BlobStore for JsonFileStore {
    async fn load(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, key: &str, value: &Value) -> Result<()> {
        let path = self.path_for(key)?;
        let bytes = serde_json::to_vec(value)?;
        tokio::fs::write(&path, bytes).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
