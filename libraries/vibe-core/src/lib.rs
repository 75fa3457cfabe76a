//! Vibe Player Core
//!
//! Platform-agnostic domain types, traits, and error handling for Vibe Player.
//!
//! This crate provides the foundational building blocks used by the playback
//! controller, the statistics recorder, and the persistence layer:
//! - **Domain Types**: [`Track`], [`Playlist`] and the playlist export format
//! - **Persistence**: the [`BlobStore`] trait (flat key-value JSON blobs) and
//!   a file-backed implementation
//! - **Seams**: [`PlayReporter`], the boundary through which playback reports
//!   listened time to the statistics layer
//! - **Error Handling**: unified [`VibeError`] and [`Result`] types
//!
//! # Example
//!
//! ```rust
//! use vibe_core::types::Track;
//!
//! let track = Track::new("track-1", "file:///music/song.mp3", "My Song", "Some Artist");
//! assert_eq!(track.title, "My Song");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod reporter;
pub mod storage;
pub mod types;

pub use error::{Result, VibeError};
pub use reporter::{NullReporter, PlayReporter};
pub use storage::{BlobStore, JsonFileStore};
pub use types::{Playlist, PlaylistExport, Track};
