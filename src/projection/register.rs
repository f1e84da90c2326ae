//! Register reset detection
//!
//! Decides whether the incoming chord forces the hand to reposition no matter
//! how close a continuity-preserving fingering would be. Each trigger is its own
//! predicate so callers and tests can see which rule fired.

use crate::types::{Mapping, PositionWindow, ProjectionEvent, RegisterBand};

/// Which rule forced a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetTrigger {
    /// Upstream sent a `REGISTER_RESET` reason code
    ExplicitRequest,
    /// Register band jumped between low and high
    BandJump,
    /// Previous anchor sits too far from the centre of the position window
    AnchorFarFromWindow,
}

pub fn explicit_reset_requested(event: &ProjectionEvent) -> bool {
    event.requests_register_reset()
}

pub fn register_band_jump(previous: RegisterBand, current: RegisterBand) -> bool {
    previous.is_opposite_extreme(current)
}

/// `|anchor - centre| > 2 * max_fret_span`
pub fn anchor_far_from_window(anchor: u8, window: PositionWindow, max_fret_span: u8) -> bool {
    (anchor as f64 - window.center()).abs() > 2.0 * max_fret_span as f64
}

/// Run every trigger in order and report the first that fires.
pub fn detect_register_reset(
    event: &ProjectionEvent,
    previous: Option<&Mapping>,
    window: Option<PositionWindow>,
    max_fret_span: u8,
) -> Option<ResetTrigger> {
    if explicit_reset_requested(event) {
        return Some(ResetTrigger::ExplicitRequest);
    }

    let previous = previous?;
    if register_band_jump(previous.register_band, event.register_band) {
        return Some(ResetTrigger::BandJump);
    }

    match window {
        Some(window) if anchor_far_from_window(previous.anchor_fret, window, max_fret_span) => {
            Some(ResetTrigger::AnchorFarFromWindow)
        }
        _ => None,
    }
}
