//! Projection controller
//!
//! [`FretboardProjection`] is the stateful entry point: it validates the event,
//! short-circuits caller-requested holds, asks the register reset detector
//! whether the hand must move, walks the candidate string sets through the
//! position solver, classifies the movement and commits the result to the
//! continuity state.

use tracing::{debug, trace};

use super::continuity::ContinuityState;
use super::movement::classify_movement;
use super::register::detect_register_reset;
use super::solver::{Placement, PositionSolver};
use super::string_sets::{candidate_sets, Candidate, CandidateContext};
use crate::config::ProjectionConfig;
use crate::error::ProjectionError;
use crate::tuning::STRING_COUNT;
use crate::types::{Mapping, MovementType, ProjectionEvent, RegisterBand, Voicing};

/// Target fret used when there is no position window to follow.
pub fn register_home_fret(band: RegisterBand) -> u8 {
    match band {
        RegisterBand::Low => 3,
        RegisterBand::Mid => 5,
        RegisterBand::High => 8,
    }
}

/// Stateful voicing-to-fretboard projector.
///
/// One instance per part: every call depends on the one before it, so calls must
/// arrive in musical order and an instance must not be shared across tracks.
///
/// # Example
/// ```rust
/// use fretboard::{FretboardProjection, MovementType, ProjectionEvent};
///
/// let mut engine = FretboardProjection::default();
///
/// let dm7 = ProjectionEvent::new(vec![50, 57, 62, 65]);
/// let first = engine.project(&dm7)?;
/// assert_eq!(first.movement_type, MovementType::Reset);
/// assert!(first.fret_span() <= 5);
///
/// let held = engine.project(&dm7.clone().with_hold(true))?;
/// assert_eq!(held.movement_type, MovementType::Hold);
/// assert_eq!(held.frets, first.frets);
/// # Ok::<(), fretboard::ProjectionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FretboardProjection {
    config: ProjectionConfig,
    solver: PositionSolver,
    state: ContinuityState,
}

impl Default for FretboardProjection {
    fn default() -> Self {
        let config = ProjectionConfig::default();
        FretboardProjection {
            solver: PositionSolver::new(&config),
            config,
            state: ContinuityState::new(),
        }
    }
}

impl FretboardProjection {
    pub fn new(config: ProjectionConfig) -> Result<Self, ProjectionError> {
        config.validate()?;
        Ok(FretboardProjection {
            solver: PositionSolver::new(&config),
            config,
            state: ContinuityState::new(),
        })
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    pub fn solver(&self) -> &PositionSolver {
        &self.solver
    }

    pub fn state(&self) -> &ContinuityState {
        &self.state
    }

    /// False until the first successful projection, and again after [`reset`](Self::reset).
    pub fn is_tracking(&self) -> bool {
        !self.state.is_empty()
    }

    /// Project one chord onto the fretboard.
    ///
    /// # Errors
    /// - [`ProjectionError::InvalidVoicing`] for an empty voicing or more voices than strings
    /// - [`ProjectionError::Unmappable`] when no candidate string set yields a playable placement
    ///
    /// The engine state is untouched when an error is returned.
    pub fn project(&mut self, event: &ProjectionEvent) -> Result<Mapping, ProjectionError> {
        let voicing = &event.voicing;
        if voicing.is_empty() {
            return Err(ProjectionError::InvalidVoicing(
                "voicing cannot be empty".to_string(),
            ));
        }
        if voicing.len() > STRING_COUNT {
            return Err(ProjectionError::InvalidVoicing(format!(
                "{} voices cannot fit on {} strings",
                voicing.len(),
                STRING_COUNT
            )));
        }

        if event.hold {
            if let Some(previous) = self.state.previous() {
                let mut held = previous.clone();
                held.movement_type = MovementType::Hold;
                self.state.commit_hold(&held, self.config.history_size);
                trace!(anchor = held.anchor_fret, "caller-requested hold");
                return Ok(held);
            }
        }

        let previous = self.state.previous();
        let trigger = detect_register_reset(
            event,
            previous,
            self.state.window(),
            self.config.max_fret_span,
        );
        let reset_forced = trigger.is_some();
        if let Some(trigger) = trigger {
            debug!(?trigger, voicing = ?voicing.pitches(), "register reset");
        }

        let current_strings = self.state.string_set();
        let context = CandidateContext {
            voice_count: voicing.len(),
            register_band: event.register_band,
            reset_forced,
            first_projection: previous.is_none(),
            current_strings,
            same_shape: self.state.shape_id() == Some(&event.shape_id),
            current_fits: current_strings.is_some_and(|s| self.solver.fits(voicing, s)),
        };
        let target = self.target_fret(event.register_band, reset_forced);

        let candidates = candidate_sets(&context);
        let Some(placement) = self.place(voicing, &candidates, target, previous)? else {
            return Err(ProjectionError::Unmappable {
                voicing: voicing.pitches().to_vec(),
                attempted: candidates.into_iter().map(|c| c.strings).collect(),
            });
        };

        let string_set = placement.string_set();
        let frets = placement.frets();
        let anchor_fret = placement.anchor_fret();
        let movement_type = classify_movement(previous, &string_set, &frets, anchor_fret, reset_forced);

        let (max_fret_span, max_fret) = (self.config.max_fret_span, self.config.max_fret);
        let window = self.state.next_window(movement_type, anchor_fret, max_fret_span, max_fret);
        let position_window = self.state.correct_drift(window, anchor_fret, max_fret_span, max_fret);

        let mapping = Mapping {
            string_set,
            frets,
            anchor_fret,
            position_window,
            movement_type,
            shape_id: event.shape_id.clone(),
            register_band: event.register_band,
        };
        self.state.commit(&mapping, self.config.history_size);
        Ok(mapping)
    }

    /// Forget all continuity so the next call behaves like the first.
    pub fn reset(&mut self) {
        self.state.clear();
    }

    /// Pick a placement for `voicing` from the ordered candidates.
    ///
    /// An exact placement near `target` wins. Failing that, the first exact
    /// placement at the nearest other anchor along the neck, and last the first
    /// playable relocation found near `target`.
    fn place(
        &self,
        voicing: &Voicing,
        candidates: &[Candidate],
        target: u8,
        previous: Option<&Mapping>,
    ) -> Result<Option<Placement>, ProjectionError> {
        let mut relocated: Option<Placement> = None;
        for candidate in candidates {
            let placement = self.solver.solve(voicing, &candidate.strings, target, previous)?;
            if placement.is_exact() {
                trace!(source = ?candidate.source, strings = ?candidate.strings, "candidate accepted");
                return Ok(Some(placement));
            }
            debug!(source = ?candidate.source, strings = ?candidate.strings, kind = ?placement.kind, "candidate rejected");
            if relocated.is_none() && placement.is_playable(self.config.max_fret_span) {
                relocated = Some(placement);
            }
        }

        for anchor in sweep_anchors(target, self.config.max_fret) {
            for candidate in candidates {
                if let Some(placement) =
                    self.solver.solve_exact(voicing, &candidate.strings, anchor, previous)?
                {
                    debug!(anchor, target, strings = ?candidate.strings, "exact placement away from target");
                    return Ok(Some(placement));
                }
            }
        }

        if let Some(placement) = &relocated {
            debug!(strings = ?placement.string_set(), "accepting relocated placement");
        }
        Ok(relocated)
    }

    /// Centre of the position window while tracking, otherwise the register home fret.
    fn target_fret(&self, band: RegisterBand, reset_forced: bool) -> u8 {
        match self.state.window() {
            Some(window) if !reset_forced => window.lo + (window.hi - window.lo) / 2,
            _ => register_home_fret(band),
        }
    }
}

/// Every other fret on the neck, nearest to `target` first.
fn sweep_anchors(target: u8, max_fret: u8) -> Vec<u8> {
    let mut anchors: Vec<u8> = (0..=max_fret).filter(|&fret| fret != target).collect();
    anchors.sort_by_key(|&fret| (fret.abs_diff(target), fret));
    anchors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_anchors_nearest_first() {
        assert_eq!(sweep_anchors(5, 8), vec![4, 6, 3, 7, 2, 8, 1, 0]);
        assert_eq!(sweep_anchors(0, 3), vec![1, 2, 3]);
    }
}
