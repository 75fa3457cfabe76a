//! Vibe Player - Session
//!
//! Wires the player together: one [`Session`] owns the playback controller,
//! the statistics store (plugged in as the controller's play reporter),
//! equalizer settings and the sleep timer, all persisting through a single
//! [`vibe_core::BlobStore`].

mod error;
mod session;

pub use error::{Result, SessionError};
pub use session::Session;
