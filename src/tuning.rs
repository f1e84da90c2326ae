//! Tuning model: pitch-per-string/fret arithmetic.
//!
//! Strings are numbered from 0 (lowest-pitched) to 5 (highest-pitched), in the
//! same order as the open-string pitches.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ProjectionError;

/// Number of strings on the instrument.
pub const STRING_COUNT: usize = 6;

/// Standard guitar tuning (E2 A2 D3 G3 B3 E4), low to high.
pub const STANDARD_TUNING: [u8; STRING_COUNT] = [40, 45, 50, 55, 59, 64];

/// Open-string pitches of a six-string fretted instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tuning {
    open: [u8; STRING_COUNT],
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning::standard()
    }
}

impl Tuning {
    pub fn new(open: [u8; STRING_COUNT]) -> Self {
        Tuning { open }
    }

    pub fn standard() -> Self {
        Tuning::new(STANDARD_TUNING)
    }

    /// Look up a named tuning preset (case-insensitive).
    ///
    /// ```
    /// use fretboard::Tuning;
    ///
    /// let drop_d = Tuning::preset("Drop-D").unwrap();
    /// assert_eq!(drop_d.open_pitch(0), 38);
    /// assert!(Tuning::preset("banjo").is_none());
    /// ```
    pub fn preset(name: &str) -> Option<Self> {
        let open = match name.trim().to_ascii_lowercase().as_str() {
            "standard" | "eadgbe" => STANDARD_TUNING,
            "drop-d" | "dropd" => [38, 45, 50, 55, 59, 64],
            "dadgad" => [38, 45, 50, 55, 57, 62],
            "open-g" => [38, 43, 50, 55, 59, 62],
            "open-d" => [38, 45, 50, 54, 57, 62],
            "half-step-down" | "eb" => [39, 44, 49, 54, 58, 63],
            _ => return None,
        };
        Some(Tuning::new(open))
    }

    /// Names accepted by [`Tuning::preset`].
    pub fn preset_names() -> &'static [&'static str] {
        &["standard", "drop-d", "dadgad", "open-g", "open-d", "half-step-down"]
    }

    /// Parse either a preset name or six comma-separated MIDI numbers, low string first.
    pub fn parse(s: &str) -> Result<Self, ProjectionError> {
        if let Some(tuning) = Tuning::preset(s) {
            return Ok(tuning);
        }

        let pitches = s
            .split(',')
            .map(|p| p.trim().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ProjectionError::ConfigError(format!("Unknown tuning: {}", s)))?;

        let open: [u8; STRING_COUNT] = pitches.try_into().map_err(|p: Vec<u8>| {
            ProjectionError::ConfigError(format!(
                "Tuning needs {} open-string pitches, got {}",
                STRING_COUNT,
                p.len()
            ))
        })?;
        Ok(Tuning::new(open))
    }

    pub fn open_pitches(&self) -> [u8; STRING_COUNT] {
        self.open
    }

    pub fn open_pitch(&self, string: usize) -> u8 {
        self.open[string]
    }

    /// Sounding pitch of `string` stopped at `fret`.
    pub fn pitch(&self, string: usize, fret: u8) -> u8 {
        self.open[string].saturating_add(fret)
    }

    /// Frets in `[lo, hi]` on `string` that sound the given pitch class.
    pub fn frets_for_pitch_class(&self, string: usize, pitch_class: u8, lo: u8, hi: u8) -> Vec<u8> {
        (lo..=hi)
            .filter(|&fret| pitch_class_of(self.pitch(string, fret)) == pitch_class)
            .collect()
    }
}

impl fmt::Display for Tuning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.open.iter().map(|&p| note_name(p)).collect();
        write!(f, "{}", names.join(" "))
    }
}

pub fn pitch_class_of(pitch: u8) -> u8 {
    pitch % 12
}

/// Scientific pitch name for a MIDI number (60 = C4), sharps only.
pub fn note_name(pitch: u8) -> String {
    const NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
    let octave = (pitch / 12) as i16 - 1;
    format!("{}{}", NAMES[pitch_class_of(pitch) as usize], octave)
}
