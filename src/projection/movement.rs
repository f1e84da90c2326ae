//! Movement classification
//!
//! Compares a freshly solved fingering with the previous mapping and names the
//! transition. Caller-requested holds never reach this module; a HOLD produced
//! here is a natural hold where the solver landed on the same fingering.

use crate::tuning::STRING_COUNT;
use crate::types::{Mapping, MovementType};

/// Most strings that may change within a STEP.
pub const STEP_MAX_CHANGES: usize = 2;

/// Furthest the anchor may move within a STEP.
pub const STEP_MAX_ANCHOR_MOVE: u8 = 3;

/// Strings whose fret entry differs; a string going from used to unused counts.
pub fn count_fret_changes(
    previous: &[Option<u8>; STRING_COUNT],
    current: &[Option<u8>; STRING_COUNT],
) -> usize {
    previous.iter().zip(current).filter(|(p, c)| p != c).count()
}

pub fn string_set_changed(previous: &[usize], current: &[usize]) -> bool {
    previous != current
}

pub fn is_natural_hold(changes: usize, set_changed: bool) -> bool {
    changes == 0 && !set_changed
}

pub fn is_step(changes: usize, set_changed: bool, anchor_move: u8) -> bool {
    changes <= STEP_MAX_CHANGES && !set_changed && anchor_move <= STEP_MAX_ANCHOR_MOVE
}

/// Classify the move from `previous` to the new fingering.
///
/// A forced reset or a missing previous mapping always yields RESET.
pub fn classify_movement(
    previous: Option<&Mapping>,
    string_set: &[usize],
    frets: &[Option<u8>; STRING_COUNT],
    anchor_fret: u8,
    reset_forced: bool,
) -> MovementType {
    let Some(previous) = previous else {
        return MovementType::Reset;
    };
    if reset_forced {
        return MovementType::Reset;
    }

    let changes = count_fret_changes(&previous.frets, frets);
    let set_changed = string_set_changed(&previous.string_set, string_set);
    let anchor_move = anchor_fret.abs_diff(previous.anchor_fret);

    if is_natural_hold(changes, set_changed) {
        MovementType::Hold
    } else if is_step(changes, set_changed, anchor_move) {
        MovementType::Step
    } else {
        MovementType::Reset
    }
}
