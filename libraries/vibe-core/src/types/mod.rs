//! Domain types for Vibe Player

mod playlist;
mod track;

pub use playlist::{Playlist, PlaylistExport, PLAYLIST_EXPORT_VERSION};
pub use track::Track;
