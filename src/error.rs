//! # Error Types
//!
//! This module defines all error types for the fretboard projection engine.
//!
//! Only two errors can come out of [`FretboardProjection::project`](crate::FretboardProjection::project);
//! everything narrower (a preferred string set that does not fit, an anchor window that is
//! too tight) is resolved internally by widening the search and never surfaces here.
//!
//! ## Error Types
//! - `InvalidVoicing` - Empty voicing, or more voices than the instrument has strings
//! - `Unmappable` - No candidate string set produced a playable placement
//! - `ConfigError` - Invalid tuning, fret limits or history size
//! - `ProgressionError` - Malformed progression document
//!
//! A failed `project()` call never mutates the engine, so the caller can log the
//! error and carry on with the next chord.
//!
//! ## Usage
//! ```rust
//! use fretboard::{FretboardProjection, ProjectionError, ProjectionEvent};
//!
//! let mut engine = FretboardProjection::default();
//! match engine.project(&ProjectionEvent::new(vec![])) {
//!     Ok(mapping) => println!("anchor at fret {}", mapping.anchor_fret),
//!     Err(ProjectionError::InvalidVoicing(message)) => eprintln!("bad input: {}", message),
//!     Err(ProjectionError::Unmappable { voicing, .. }) => {
//!         eprintln!("no fingering for {:?}", voicing);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    /// The voicing cannot be projected at all.
    ///
    /// Raised before any state is touched, when the voicing is empty or has more
    /// voices than the instrument has strings.
    ///
    /// # Example
    /// ```
    /// # use fretboard::ProjectionError;
    /// let err = ProjectionError::InvalidVoicing("voicing cannot be empty".to_string());
    /// assert_eq!(err.to_string(), "Invalid voicing: voicing cannot be empty");
    /// ```
    #[error("Invalid voicing: {0}")]
    InvalidVoicing(String),

    /// Every candidate string set, including the exhaustive fallback, failed.
    ///
    /// Carries the offending voicing and the string sets that were attempted,
    /// in the order they were tried.
    ///
    /// # Example
    /// ```
    /// # use fretboard::ProjectionError;
    /// let err = ProjectionError::Unmappable {
    ///     voicing: vec![40, 41, 42],
    ///     attempted: vec![vec![0, 1, 2]],
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Cannot map voicing [40, 41, 42] to fretboard (tried string sets [[0, 1, 2]])"
    /// );
    /// ```
    #[error("Cannot map voicing {voicing:?} to fretboard (tried string sets {attempted:?})")]
    Unmappable {
        voicing: Vec<u8>,
        attempted: Vec<Vec<usize>>,
    },

    /// Invalid engine configuration.
    ///
    /// # Example
    /// ```
    /// # use fretboard::ProjectionError;
    /// let err = ProjectionError::ConfigError("maxFretSpan must be at least 1".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: maxFretSpan must be at least 1");
    /// ```
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Malformed progression document.
    #[error("Invalid progression: {0}")]
    ProgressionError(String),
}
