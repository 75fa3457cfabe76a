//! Built-in equalizer presets
//!
//! Ten fixed bands from 32 Hz to 16 kHz. Preset gains are in dB and stay
//! within the ±12 dB range the band sliders allow.

/// Number of equalizer bands
pub const BAND_COUNT: usize = 10;

/// Band center frequencies in Hz
pub const FREQUENCIES: [u32; BAND_COUNT] =
    [32, 64, 125, 250, 500, 1_000, 2_000, 4_000, 8_000, 16_000];

/// Display labels for the bands
pub const FREQUENCY_LABELS: [&str; BAND_COUNT] =
    ["32", "64", "125", "250", "500", "1K", "2K", "4K", "8K", "16K"];

/// Band gain limits in dB
pub const MIN_GAIN_DB: f32 = -12.0;
/// Band gain limits in dB
pub const MAX_GAIN_DB: f32 = 12.0;

/// Preset id reserved for user-defined gains
pub const CUSTOM_PRESET_ID: &str = "custom";

/// A named set of band gains
#[derive(Debug, Clone, PartialEq)]
pub struct EqPreset {
    /// Stable identifier (`flat`, `bass-boost`, ...)
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Gain per band in dB
    pub gains: [f32; BAND_COUNT],
}

/// All built-in presets, `custom` last
pub const EQ_PRESETS: [EqPreset; 10] = [
    EqPreset {
        id: "flat",
        name: "Flat",
        gains: [0.0; BAND_COUNT],
    },
    EqPreset {
        id: "bass-boost",
        name: "Bass Boost",
        gains: [8.0, 6.0, 4.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    },
    EqPreset {
        id: "treble-boost",
        name: "Treble",
        gains: [0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 4.0, 6.0, 8.0, 8.0],
    },
    EqPreset {
        id: "vocal",
        name: "Vocal",
        gains: [-2.0, -2.0, 0.0, 4.0, 6.0, 6.0, 4.0, 2.0, 0.0, -2.0],
    },
    EqPreset {
        id: "rock",
        name: "Rock",
        gains: [6.0, 4.0, 2.0, 0.0, -2.0, -2.0, 0.0, 4.0, 6.0, 6.0],
    },
    EqPreset {
        id: "pop",
        name: "Pop",
        gains: [-2.0, 0.0, 4.0, 6.0, 6.0, 4.0, 2.0, 0.0, -2.0, -2.0],
    },
    EqPreset {
        id: "jazz",
        name: "Jazz",
        gains: [4.0, 2.0, 0.0, 2.0, -2.0, -2.0, 0.0, 2.0, 4.0, 4.0],
    },
    EqPreset {
        id: "classical",
        name: "Classical",
        gains: [0.0, 0.0, 0.0, 0.0, 0.0, -2.0, -4.0, -4.0, -2.0, 0.0],
    },
    EqPreset {
        id: "electronic",
        name: "Electronic",
        gains: [6.0, 4.0, 0.0, -2.0, -2.0, 0.0, 4.0, 6.0, 6.0, 4.0],
    },
    EqPreset {
        id: CUSTOM_PRESET_ID,
        name: "Custom",
        gains: [0.0; BAND_COUNT],
    },
];

/// Look up a built-in preset by id
pub fn find_preset(id: &str) -> Option<&'static EqPreset> {
    EQ_PRESETS.iter().find(|p| p.id == id)
}
