//! # Public API
//!
//! Whole-sequence entry points. Each call builds one
//! [`FretboardProjection`] and feeds it every event in order, so continuity
//! carries from chord to chord exactly as it would for a live caller.
//!
//! ## Functions
//!
//! - [`project_progression()`] - Parse a progression document and project it
//! - [`project_events()`] - Project events already in memory with a given config
//!
//! ## Typical Usage
//!
//! ```rust
//! use fretboard::{project_progression, MovementType};
//!
//! let source = r#"
//! title: ii-V-I
//! events:
//!   - voicing: [50, 57, 62, 65]
//!   - voicing: [55, 59, 62, 67]
//!   - voicing: [48, 52, 55, 59]
//! "#;
//!
//! let projected = project_progression(source)?;
//! assert_eq!(projected.mappings.len(), 3);
//! assert_eq!(projected.mappings[0].movement_type, MovementType::Reset);
//! # Ok::<(), fretboard::ProjectionError>(())
//! ```

use serde::Serialize;
use tracing::debug;

use crate::{FretboardProjection, Mapping, ProjectionConfig, ProjectionError, Progression, ProjectionEvent};

/// A projected progression, ready for display or serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedProgression {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub config: ProjectionConfig,
    pub mappings: Vec<Mapping>,
}

/// Parse a progression document and project every event.
///
/// The document's `config` block is used when present, otherwise the defaults.
///
/// # Errors
/// Returns [`ProjectionError::ProgressionError`] or [`ProjectionError::ConfigError`]
/// for a bad document, and the first projection error otherwise.
pub fn project_progression(source: &str) -> Result<ProjectedProgression, ProjectionError> {
    let progression = Progression::parse(source)?;
    let config = progression.effective_config();
    let mappings = project_events(config, &progression.events)?;
    Ok(ProjectedProgression {
        title: progression.title,
        config,
        mappings,
    })
}

/// Project a sequence of events through a fresh engine.
///
/// # Example
/// ```rust
/// use fretboard::{project_events, ProjectionConfig, ProjectionEvent, MovementType};
///
/// let chord = ProjectionEvent::new(vec![48, 52, 55, 59]);
/// let events = vec![chord.clone(), chord.with_hold(true)];
///
/// let mappings = project_events(ProjectionConfig::default(), &events)?;
/// assert_eq!(mappings[1].movement_type, MovementType::Hold);
/// assert_eq!(mappings[1].frets, mappings[0].frets);
/// # Ok::<(), fretboard::ProjectionError>(())
/// ```
///
/// # Errors
/// Stops at the first event that fails and returns its error.
pub fn project_events(
    config: ProjectionConfig,
    events: &[ProjectionEvent],
) -> Result<Vec<Mapping>, ProjectionError> {
    let mut engine = FretboardProjection::new(config)?;
    let mut mappings = Vec::with_capacity(events.len());
    for (index, event) in events.iter().enumerate() {
        let mapping = engine.project(event).map_err(|e| {
            debug!(event = index + 1, error = %e, "projection failed");
            e
        })?;
        mappings.push(mapping);
    }
    Ok(mappings)
}
