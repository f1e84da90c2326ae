//! # Projection Types
//!
//! Value types that flow in and out of the projection engine.
//!
//! ## Input
//! - [`ProjectionEvent`] - One chord from the upstream harmony engine
//! - [`Voicing`] - Pitches to sound together, kept sorted ascending
//! - [`RegisterBand`] - Coarse low/mid/high hint used to pick string sets
//! - [`ReasonCode`] - Advisory upstream signal; only `REGISTER_RESET` is read
//!
//! ## Output
//! - [`Mapping`] - Strings, frets, anchor and window for one chord
//! - [`MovementType`] - How the mapping relates to the previous one
//! - [`PositionWindow`] - Fret range the hand is considered to be working in
//!
//! Serialized field names are camelCase so the JSON matches what the harmony
//! engine emits and what the tablature serializer expects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::tuning::{pitch_class_of, STRING_COUNT};

/// Reason code that forces a register reset.
pub const REGISTER_RESET_CODE: &str = "REGISTER_RESET";

/// A set of pitches to sound together, sorted ascending.
///
/// Input order does not matter:
/// ```
/// use fretboard::Voicing;
///
/// let voicing = Voicing::new(vec![62, 50, 65, 57]);
/// assert_eq!(voicing.pitches(), &[50, 57, 62, 65]);
/// assert_eq!(voicing.pitch_classes(), vec![2, 9, 2, 5]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<u8>", into = "Vec<u8>")]
pub struct Voicing(Vec<u8>);

impl Voicing {
    pub fn new(mut pitches: Vec<u8>) -> Self {
        pitches.sort_unstable();
        Voicing(pitches)
    }

    pub fn pitches(&self) -> &[u8] {
        &self.0
    }

    pub fn pitch_classes(&self) -> Vec<u8> {
        self.0.iter().map(|&p| pitch_class_of(p)).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Voicing {
    fn from(pitches: Vec<u8>) -> Self {
        Voicing::new(pitches)
    }
}

impl From<Voicing> for Vec<u8> {
    fn from(voicing: Voicing) -> Self {
        voicing.0
    }
}

/// Opaque label naming an inversion or pattern. Only used to bias continuity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(String);

impl ShapeId {
    pub fn new(id: impl Into<String>) -> Self {
        ShapeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        ShapeId::new("root")
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegisterBand {
    Low,
    #[default]
    Mid,
    High,
}

impl RegisterBand {
    /// True for the low/high pair, which are not adjacent bands.
    pub fn is_opposite_extreme(self, other: RegisterBand) -> bool {
        matches!(
            (self, other),
            (RegisterBand::Low, RegisterBand::High) | (RegisterBand::High, RegisterBand::Low)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RegisterBand::Low => "low",
            RegisterBand::Mid => "mid",
            RegisterBand::High => "high",
        }
    }
}

impl fmt::Display for RegisterBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReasonCode {
    pub code: String,
}

impl ReasonCode {
    pub fn new(code: impl Into<String>) -> Self {
        ReasonCode { code: code.into() }
    }

    pub fn register_reset() -> Self {
        ReasonCode::new(REGISTER_RESET_CODE)
    }

    pub fn is_register_reset(&self) -> bool {
        self.code == REGISTER_RESET_CODE
    }
}

/// One chord handed to [`FretboardProjection::project`](crate::FretboardProjection::project).
///
/// `inversion` and `registerPosition` are accepted as aliases for `shapeId`
/// and `registerBand`, which is what older harmony engine output uses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionEvent {
    pub voicing: Voicing,
    #[serde(default, alias = "inversion")]
    pub shape_id: ShapeId,
    #[serde(default, alias = "registerPosition")]
    pub register_band: RegisterBand,
    #[serde(default)]
    pub hold: bool,
    #[serde(default)]
    pub reason_codes: Vec<ReasonCode>,
}

impl ProjectionEvent {
    pub fn new(pitches: Vec<u8>) -> Self {
        ProjectionEvent {
            voicing: Voicing::new(pitches),
            ..ProjectionEvent::default()
        }
    }

    pub fn with_shape(mut self, shape_id: impl Into<String>) -> Self {
        self.shape_id = ShapeId::new(shape_id);
        self
    }

    pub fn with_register(mut self, register_band: RegisterBand) -> Self {
        self.register_band = register_band;
        self
    }

    pub fn with_hold(mut self, hold: bool) -> Self {
        self.hold = hold;
        self
    }

    pub fn with_reason(mut self, code: ReasonCode) -> Self {
        self.reason_codes.push(code);
        self
    }

    pub fn requests_register_reset(&self) -> bool {
        self.reason_codes.iter().any(ReasonCode::is_register_reset)
    }
}

/// Classification of the transition from the previous mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementType {
    /// Hand repositions
    Reset,
    /// Small change within the current position
    Step,
    /// Nothing moves
    Hold,
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MovementType::Reset => "RESET",
            MovementType::Step => "STEP",
            MovementType::Hold => "HOLD",
        };
        f.pad(s)
    }
}

/// Closed fret interval `[lo, hi]` where the hand is considered to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 2]", into = "[u8; 2]")]
pub struct PositionWindow {
    pub lo: u8,
    pub hi: u8,
}

impl PositionWindow {
    pub fn new(lo: u8, hi: u8) -> Self {
        PositionWindow {
            lo: lo.min(hi),
            hi: lo.max(hi),
        }
    }

    /// Tight window around `anchor`: two frets below, two past the widest stretch.
    pub fn around(anchor: u8, max_fret_span: u8, max_fret: u8) -> Self {
        let lo = anchor.saturating_sub(2);
        let hi = anchor.saturating_add(max_fret_span).saturating_add(2).min(max_fret);
        PositionWindow::new(lo, hi)
    }

    pub fn contains(&self, fret: u8) -> bool {
        self.lo <= fret && fret <= self.hi
    }

    pub fn center(&self) -> f64 {
        (self.lo as f64 + self.hi as f64) / 2.0
    }

    /// Grow (never shrink) so that `fret` is inside.
    pub fn widened_to(&self, fret: u8) -> Self {
        PositionWindow::new(self.lo.min(fret), self.hi.max(fret))
    }
}

impl From<[u8; 2]> for PositionWindow {
    fn from(bounds: [u8; 2]) -> Self {
        PositionWindow::new(bounds[0], bounds[1])
    }
}

impl From<PositionWindow> for [u8; 2] {
    fn from(window: PositionWindow) -> Self {
        [window.lo, window.hi]
    }
}

impl fmt::Display for PositionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

/// Fingering for one chord.
///
/// # Fields
/// - `string_set`: Strings used, one per voice, low voice first
/// - `frets`: Fret per string (index 0 = lowest string), `None` when unused
/// - `anchor_fret`: Lowest fret in use
/// - `position_window`: Current hand window, always contains `anchor_fret`
/// - `movement_type`: RESET / STEP / HOLD relative to the previous mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    pub string_set: Vec<usize>,
    pub frets: [Option<u8>; STRING_COUNT],
    pub anchor_fret: u8,
    pub position_window: PositionWindow,
    pub movement_type: MovementType,
    pub shape_id: ShapeId,
    pub register_band: RegisterBand,
}

impl Mapping {
    /// Frets of the used strings, in string order.
    pub fn used_frets(&self) -> Vec<u8> {
        self.frets.iter().flatten().copied().collect()
    }

    pub fn fret_span(&self) -> u8 {
        let used = self.used_frets();
        match (used.iter().min(), used.iter().max()) {
            (Some(lo), Some(hi)) => hi - lo,
            _ => 0,
        }
    }

    /// Fret played by voice `index` (low voice first).
    pub fn voice_fret(&self, index: usize) -> Option<u8> {
        self.string_set.get(index).and_then(|&s| self.frets[s])
    }
}
