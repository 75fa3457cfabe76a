//! Vibe Player - Equalizer
//!
//! Ten-band equalizer settings for Vibe Player: band gains within ±12 dB,
//! built-in presets, a saved custom curve, and persistence through
//! [`vibe_core::BlobStore`]. Actual filtering happens in the platform audio
//! graph; this crate only decides what the gains are.

mod equalizer;
mod presets;
mod store;

pub use equalizer::{EqBand, Equalizer};
pub use presets::{
    find_preset, EqPreset, BAND_COUNT, CUSTOM_PRESET_ID, EQ_PRESETS, FREQUENCIES,
    FREQUENCY_LABELS, MAX_GAIN_DB, MIN_GAIN_DB,
};
pub use store::EqStore;
