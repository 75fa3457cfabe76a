//! Equalizer state
//!
//! Band gains, preset selection and the user's saved custom curve. The
//! equalizer holds settings only; applying the gains to an audio graph is
//! the platform's job, driven from [`Equalizer::gains`].

use crate::presets::{
    find_preset, CUSTOM_PRESET_ID, BAND_COUNT, FREQUENCIES, FREQUENCY_LABELS, MAX_GAIN_DB,
    MIN_GAIN_DB,
};
use serde::{Deserialize, Serialize};

/// One adjustable band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EqBand {
    /// Center frequency in Hz
    pub frequency: u32,
    /// Display label
    pub label: String,
    /// Gain in dB, within ±12
    pub gain: f32,
}

fn flat_bands() -> Vec<EqBand> {
    FREQUENCIES
        .iter()
        .zip(FREQUENCY_LABELS)
        .map(|(&frequency, label)| EqBand {
            frequency,
            label: label.to_string(),
            gain: 0.0,
        })
        .collect()
}

/// Equalizer settings, serde round-trippable for persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equalizer {
    /// Whether the equalizer is applied at all
    pub enabled: bool,
    /// Current gain per band
    pub bands: Vec<EqBand>,
    /// Id of the selected preset (`custom` once any band is touched)
    pub current_preset_id: String,
    /// The user's saved custom curve
    pub custom_gains: [f32; BAND_COUNT],
}

impl Default for Equalizer {
    fn default() -> Self {
        Self {
            enabled: true,
            bands: flat_bands(),
            current_preset_id: "flat".to_string(),
            custom_gains: [0.0; BAND_COUNT],
        }
    }
}

impl Equalizer {
    /// Create an enabled, flat equalizer
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the equalizer
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Set one band's gain, clamped to ±12 dB.
    ///
    /// Any manual adjustment flips the selection to the `custom` preset.
    /// Out-of-range band indices are ignored.
    pub fn set_band_gain(&mut self, index: usize, gain: f32) {
        let Some(band) = self.bands.get_mut(index) else {
            return;
        };
        band.gain = gain.clamp(MIN_GAIN_DB, MAX_GAIN_DB);
        self.current_preset_id = CUSTOM_PRESET_ID.to_string();
    }

    /// Apply a built-in preset by id.
    ///
    /// Selecting `custom` restores the user's saved custom curve. Unknown
    /// ids are ignored.
    pub fn select_preset(&mut self, preset_id: &str) {
        let Some(preset) = find_preset(preset_id) else {
            return;
        };

        let gains = if preset_id == CUSTOM_PRESET_ID {
            self.custom_gains
        } else {
            preset.gains
        };

        for (band, gain) in self.bands.iter_mut().zip(gains) {
            band.gain = gain;
        }
        self.current_preset_id = preset_id.to_string();
    }

    /// Zero all bands and select the flat preset
    pub fn reset_to_flat(&mut self) {
        self.bands = flat_bands();
        self.current_preset_id = "flat".to_string();
    }

    /// Save the current band gains as the custom curve.
    ///
    /// Does not change the selected preset.
    pub fn save_as_custom(&mut self) {
        for (slot, band) in self.custom_gains.iter_mut().zip(&self.bands) {
            *slot = band.gain;
        }
    }

    /// Current gain per band, in band order
    pub fn gains(&self) -> [f32; BAND_COUNT] {
        let mut gains = [0.0; BAND_COUNT];
        for (slot, band) in gains.iter_mut().zip(&self.bands) {
            *slot = band.gain;
        }
        gains
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_flat_and_enabled() {
        let eq = Equalizer::new();
        assert!(eq.enabled);
        assert_eq!(eq.current_preset_id, "flat");
        assert_eq!(eq.gains(), [0.0; BAND_COUNT]);
        assert_eq!(eq.bands.len(), BAND_COUNT);
        assert_eq!(eq.bands[5].label, "1K");
    }

    #[test]
    fn band_gain_clamps_and_flips_to_custom() {
        let mut eq = Equalizer::new();
        eq.select_preset("rock");

        eq.set_band_gain(0, 20.0);
        assert!((eq.bands[0].gain - MAX_GAIN_DB).abs() < f32::EPSILON);
        assert_eq!(eq.current_preset_id, "custom");

        eq.set_band_gain(1, -20.0);
        assert!((eq.bands[1].gain - MIN_GAIN_DB).abs() < f32::EPSILON);
    }

    #[test]
    fn out_of_range_band_is_ignored() {
        let mut eq = Equalizer::new();
        eq.set_band_gain(BAND_COUNT, 6.0);
        assert_eq!(eq.current_preset_id, "flat");
    }

    #[test]
    fn select_preset_applies_its_gains() {
        let mut eq = Equalizer::new();
        eq.select_preset("bass-boost");

        assert_eq!(eq.current_preset_id, "bass-boost");
        assert!((eq.bands[0].gain - 8.0).abs() < f32::EPSILON);
        assert!((eq.bands[9].gain).abs() < f32::EPSILON);
    }

    #[test]
    fn unknown_preset_is_ignored() {
        let mut eq = Equalizer::new();
        eq.select_preset("rock");
        eq.select_preset("does-not-exist");
        assert_eq!(eq.current_preset_id, "rock");
    }

    #[test]
    fn custom_preset_restores_saved_curve() {
        let mut eq = Equalizer::new();
        eq.set_band_gain(3, 5.0);
        eq.set_band_gain(7, -3.0);
        eq.save_as_custom();

        eq.select_preset("jazz");
        eq.select_preset("custom");

        assert_eq!(eq.current_preset_id, "custom");
        assert!((eq.bands[3].gain - 5.0).abs() < f32::EPSILON);
        assert!((eq.bands[7].gain - -3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn reset_returns_to_flat() {
        let mut eq = Equalizer::new();
        eq.select_preset("electronic");
        eq.reset_to_flat();

        assert_eq!(eq.current_preset_id, "flat");
        assert_eq!(eq.gains(), [0.0; BAND_COUNT]);
    }

    #[test]
    fn serde_round_trip() {
        let mut eq = Equalizer::new();
        eq.set_band_gain(2, 4.5);
        eq.save_as_custom();
        eq.set_enabled(false);

        let json = serde_json::to_string(&eq).unwrap();
        let restored: Equalizer = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, eq);
    }
}
