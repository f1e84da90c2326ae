//! # Progression Documents
//!
//! A progression is a YAML document holding an optional title, an optional
//! engine config block and the list of events to project, in musical order.
//! JSON is accepted too, since it is valid YAML.
//!
//! ```yaml
//! title: ii-V-I in C
//! config:
//!   maxFretSpan: 4
//! events:
//!   - voicing: [50, 57, 62, 65]
//!     shapeId: root
//!     registerBand: mid
//!   - voicing: [55, 59, 62, 67]
//!   - voicing: [48, 52, 55, 59]
//!     hold: false
//!     reasonCodes:
//!       - code: REGISTER_RESET
//! ```
//!
//! Events follow the harmony engine's output shape; see
//! [`ProjectionEvent`](crate::ProjectionEvent) for defaults and aliases.

use serde::{Deserialize, Serialize};

use crate::config::ProjectionConfig;
use crate::error::ProjectionError;
use crate::types::ProjectionEvent;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progression {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ProjectionConfig>,
    #[serde(default)]
    pub events: Vec<ProjectionEvent>,
}

impl Progression {
    /// Parse and check a progression document.
    ///
    /// ```
    /// use fretboard::Progression;
    ///
    /// let progression = Progression::parse("events:\n  - voicing: [48, 52, 55]\n").unwrap();
    /// assert_eq!(progression.events.len(), 1);
    /// assert!(progression.config.is_none());
    /// ```
    pub fn parse(source: &str) -> Result<Self, ProjectionError> {
        let progression: Progression = serde_yaml::from_str(source)
            .map_err(|e| ProjectionError::ProgressionError(e.to_string()))?;
        progression.validate()?;
        Ok(progression)
    }

    /// The config block, or the defaults when there is none.
    pub fn effective_config(&self) -> ProjectionConfig {
        self.config.unwrap_or_default()
    }

    fn validate(&self) -> Result<(), ProjectionError> {
        if let Some(config) = &self.config {
            config.validate()?;
        }
        if let Some(index) = self.events.iter().position(|e| e.voicing.is_empty()) {
            return Err(ProjectionError::ProgressionError(format!(
                "event {} has an empty voicing",
                index + 1
            )));
        }
        Ok(())
    }
}
