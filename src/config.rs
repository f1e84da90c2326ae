//! Engine construction settings.
//!
//! Every field has a default, so a config block in a progression document only
//! needs the keys it changes:
//!
//! ```yaml
//! tuning: [38, 45, 50, 55, 59, 64]
//! maxFretSpan: 4
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;
use crate::tuning::Tuning;

pub const DEFAULT_MAX_FRET: u8 = 20;
pub const DEFAULT_MAX_FRET_SPAN: u8 = 5;
pub const DEFAULT_HISTORY_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ProjectionConfig {
    /// Open-string pitches, low string first
    pub tuning: Tuning,
    /// Highest usable fret
    pub max_fret: u8,
    /// Widest stretch between the lowest and highest fret of one chord
    pub max_fret_span: u8,
    /// Number of recent anchor frets kept for drift correction
    pub history_size: usize,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        ProjectionConfig {
            tuning: Tuning::standard(),
            max_fret: DEFAULT_MAX_FRET,
            max_fret_span: DEFAULT_MAX_FRET_SPAN,
            history_size: DEFAULT_HISTORY_SIZE,
        }
    }
}

impl ProjectionConfig {
    /// Parse a standalone YAML config file.
    pub fn from_yaml_str(content: &str) -> Result<Self, ProjectionError> {
        let config: ProjectionConfig = serde_yaml::from_str(content)
            .map_err(|e| ProjectionError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ProjectionError> {
        if self.max_fret_span == 0 {
            return Err(ProjectionError::ConfigError(
                "maxFretSpan must be at least 1".to_string(),
            ));
        }
        if self.max_fret_span > self.max_fret {
            return Err(ProjectionError::ConfigError(format!(
                "maxFretSpan ({}) cannot exceed maxFret ({})",
                self.max_fret_span, self.max_fret
            )));
        }
        if self.history_size == 0 {
            return Err(ProjectionError::ConfigError(
                "historySize must be at least 1".to_string(),
            ));
        }
        if let Some(&highest) = self.tuning.open_pitches().iter().max() {
            if highest as u16 + self.max_fret as u16 > 127 {
                return Err(ProjectionError::ConfigError(format!(
                    "tuning {} with maxFret {} goes past MIDI 127",
                    self.tuning, self.max_fret
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProjectionConfig::default();
        assert_eq!(config.tuning.open_pitches(), [40, 45, 50, 55, 59, 64]);
        assert_eq!(config.max_fret, 20);
        assert_eq!(config.max_fret_span, 5);
        assert_eq!(config.history_size, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ProjectionConfig::from_yaml_str("maxFretSpan: 4\n").unwrap();
        assert_eq!(config.max_fret_span, 4);
        assert_eq!(config.max_fret, 20);
        assert_eq!(config.tuning, Tuning::standard());
    }

    #[test]
    fn test_yaml_tuning_list() {
        let config = ProjectionConfig::from_yaml_str("tuning: [38, 45, 50, 55, 59, 64]\n").unwrap();
        assert_eq!(config.tuning.open_pitch(0), 38);
    }

    #[test]
    fn test_rejects_zero_span() {
        let result = ProjectionConfig::from_yaml_str("maxFretSpan: 0\n");
        assert!(matches!(result, Err(ProjectionError::ConfigError(_))));
    }

    #[test]
    fn test_rejects_span_wider_than_neck() {
        let config = ProjectionConfig {
            max_fret: 4,
            ..ProjectionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_history() {
        let config = ProjectionConfig {
            history_size: 0,
            ..ProjectionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_keys_and_short_tunings() {
        assert!(ProjectionConfig::from_yaml_str("maxFrets: 22\n").is_err());
        assert!(ProjectionConfig::from_yaml_str("tuning: [40, 45, 50]\n").is_err());
    }
}
