//! # Projection Module
//!
//! Places voicings on the fretboard one chord at a time while keeping hand
//! movement smooth across a whole progression.
//!
//! ## Purpose
//! The harmony engine decides *which* pitches sound; this module only decides
//! *where* they are played. For each chord it produces a [`Mapping`](crate::Mapping):
//! which strings, which frets, where the hand sits and how far it moved.
//!
//! ## Sub-modules
//! - `engine` - [`FretboardProjection`], the stateful controller
//! - `solver` - [`PositionSolver`], fret assignment under a stretch limit
//! - `register` - Register reset triggers
//! - `movement` - RESET / STEP / HOLD classification rules
//! - `continuity` - [`ContinuityState`]: previous mapping, window, anchor history
//! - `string_sets` - Priority-ordered candidate string sets
//!
//! ## Per-chord flow
//! ```text
//! event ──▶ validate ──▶ hold? ──yes──▶ previous mapping tagged HOLD
//!                          │
//!                          no
//!                          ▼
//!              register reset detector
//!                          ▼
//!            candidate string sets (in order)
//!                          ▼
//!   position solver: exact near target, else exact further
//!   along the neck, else a relocation within the stretch
//!                          ▼
//!          movement classification + window update
//!                          ▼
//!            continuity state commit ──▶ Mapping
//! ```
//!
//! ## Movement Types
//!
//! ### RESET
//! - First chord, or after [`FretboardProjection::reset`]
//! - Register reset requested, low↔high band jump, or the hand far from its window
//! - Any change too large for a STEP
//! - The position window recentres on the new anchor
//!
//! ### STEP
//! - Same strings, at most two frets change, anchor moves at most three frets
//! - The position window only widens
//!
//! ### HOLD
//! - Caller asked for it (the previous mapping is repeated verbatim), or
//! - The solver landed on exactly the previous fingering
//!
//! ## Example
//! ```rust
//! use fretboard::{FretboardProjection, MovementType, ProjectionEvent, RegisterBand};
//!
//! let mut engine = FretboardProjection::default();
//! let low = ProjectionEvent::new(vec![48, 52, 55, 59]).with_register(RegisterBand::Low);
//! let high = ProjectionEvent::new(vec![60, 64, 67, 71]).with_register(RegisterBand::High);
//!
//! assert_eq!(engine.project(&low)?.movement_type, MovementType::Reset);
//! assert_eq!(engine.project(&high)?.movement_type, MovementType::Reset);
//! assert_eq!(engine.project(&low)?.movement_type, MovementType::Reset);
//! # Ok::<(), fretboard::ProjectionError>(())
//! ```

pub mod continuity;
mod engine;
pub mod movement;
pub mod register;
pub mod solver;
pub mod string_sets;

#[cfg(test)]
mod tests;

pub use continuity::ContinuityState;
pub use engine::{register_home_fret, FretboardProjection};
pub use solver::{Placement, PlacementKind, PositionSolver, VoicePosition};
