//! Position solver
//!
//! Assigns one fret to each voice of a voicing on a given ordered string set,
//! keeping the hand stretch within `max_fret_span` and staying close to a target
//! fret. When a previous mapping is supplied, voice-leading terms reward staying
//! on the same string, repeating common tones and moving by small distances.
//!
//! The search is plain enumeration: at most six voices with a handful of fret
//! candidates each, pruned as soon as a partial combination is too wide.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ProjectionConfig;
use crate::error::ProjectionError;
use crate::tuning::{pitch_class_of, Tuning, STRING_COUNT};
use crate::types::{Mapping, Voicing};

/// Half-width of the first search window around the target fret.
const NARROW_RADIUS: u8 = 2;

/// Fret distance above which a voice movement counts as a large leap.
const LARGE_LEAP_FRETS: u8 = 5;

const SPAN_WEIGHT: f64 = 100.0;
const SAME_STRING_BONUS: f64 = -5.0;
const COMMON_TONE_BONUS: f64 = -20.0;
const LARGE_LEAP_WEIGHT: f64 = 10.0;
const LARGE_LEAP_FLAG_PENALTY: f64 = 50.0;
const SMALL_MOVE_WEIGHT: f64 = 0.5;

/// How a placement was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementKind {
    /// Every voice on its requested string, pitch class matched, span in bounds
    Exact,
    /// At least one voice moved to its nearest match on any string
    Relocated,
    /// At least one voice had no pitch-class match and sits on the target fret
    Forced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoicePosition {
    pub string: usize,
    pub fret: u8,
}

/// Solver output: exactly one position per voice, low voice first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub positions: Vec<VoicePosition>,
    pub kind: PlacementKind,
    /// Cost of the winning combination; `None` for fallback placements
    pub score: Option<f64>,
    /// Voices that moved more than five frets from the previous mapping
    pub large_leaps: usize,
}

impl Placement {
    pub fn is_exact(&self) -> bool {
        self.kind == PlacementKind::Exact
    }

    pub fn string_set(&self) -> Vec<usize> {
        self.positions.iter().map(|p| p.string).collect()
    }

    pub fn frets(&self) -> [Option<u8>; STRING_COUNT] {
        let mut frets = [None; STRING_COUNT];
        for position in &self.positions {
            frets[position.string] = Some(position.fret);
        }
        frets
    }

    /// Lowest fret in use.
    pub fn anchor_fret(&self) -> u8 {
        self.positions.iter().map(|p| p.fret).min().unwrap_or(0)
    }

    pub fn span(&self) -> u8 {
        let lo = self.positions.iter().map(|p| p.fret).min().unwrap_or(0);
        let hi = self.positions.iter().map(|p| p.fret).max().unwrap_or(0);
        hi - lo
    }

    /// Usable as a mapping: not forced, one string per voice, stretch within bounds.
    ///
    /// Exact and relocated voices always sound their pitch class.
    pub fn is_playable(&self, max_fret_span: u8) -> bool {
        let mut strings = self.string_set();
        strings.sort_unstable();
        strings.dedup();
        self.kind != PlacementKind::Forced
            && strings.len() == self.positions.len()
            && self.span() <= max_fret_span
    }
}

/// Best combination found so far during enumeration.
struct Best {
    frets: Vec<u8>,
    score: f64,
    large_leaps: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct PositionSolver {
    tuning: Tuning,
    max_fret: u8,
    max_fret_span: u8,
}

impl PositionSolver {
    pub fn new(config: &ProjectionConfig) -> Self {
        PositionSolver {
            tuning: config.tuning,
            max_fret: config.max_fret,
            max_fret_span: config.max_fret_span,
        }
    }

    /// Place `voicing` on `strings` (one string per voice, low voice first) near `anchor`.
    ///
    /// Always returns one position per voice. Only an empty voicing or an
    /// unusable string set is an error; when no in-bounds combination exists the
    /// result is a best-effort [`PlacementKind::Relocated`] or
    /// [`PlacementKind::Forced`] placement. Callers check it with
    /// [`Placement::is_playable`].
    pub fn solve(
        &self,
        voicing: &Voicing,
        strings: &[usize],
        anchor: u8,
        previous: Option<&Mapping>,
    ) -> Result<Placement, ProjectionError> {
        if let Some(placement) = self.solve_exact(voicing, strings, anchor, previous)? {
            return Ok(placement);
        }

        let anchor = anchor.min(self.max_fret);
        let strings = &strings[..voicing.len()];
        debug!(
            voicing = ?voicing.pitches(),
            strings = ?strings,
            anchor,
            "no in-bounds combination, relocating voices"
        );
        Ok(self.fallback(&voicing.pitch_classes(), strings, anchor))
    }

    /// The exact search alone: `None` when no combination on `strings` fits
    /// within `max_fret_span` of `anchor`.
    pub fn solve_exact(
        &self,
        voicing: &Voicing,
        strings: &[usize],
        anchor: u8,
        previous: Option<&Mapping>,
    ) -> Result<Option<Placement>, ProjectionError> {
        self.check_inputs(voicing, strings)?;
        let anchor = anchor.min(self.max_fret);
        let pitch_classes = voicing.pitch_classes();
        let strings = &strings[..voicing.len()];

        // Narrow window first; a voice with nothing nearby searches the full stretch.
        let narrow: Vec<Vec<u8>> = pitch_classes
            .iter()
            .zip(strings)
            .map(|(&pc, &string)| {
                let nearby = self.frets_near(string, pc, anchor, NARROW_RADIUS);
                if nearby.is_empty() {
                    self.frets_near(string, pc, anchor, self.max_fret_span)
                } else {
                    nearby
                }
            })
            .collect();

        if let Some(best) = self.best_combination(&narrow, strings, anchor, previous) {
            return Ok(Some(exact_placement(best, strings)));
        }

        let wide: Vec<Vec<u8>> = pitch_classes
            .iter()
            .zip(strings)
            .map(|(&pc, &string)| self.frets_near(string, pc, anchor, self.max_fret_span))
            .collect();

        Ok(self
            .best_combination(&wide, strings, anchor, previous)
            .map(|best| exact_placement(best, strings)))
    }

    /// True when every voice has some matching fret on its string, anywhere on the neck.
    pub fn fits(&self, voicing: &Voicing, strings: &[usize]) -> bool {
        strings.len() >= voicing.len()
            && voicing.pitch_classes().iter().zip(strings).all(|(&pc, &string)| {
                string < STRING_COUNT
                    && !self
                        .tuning
                        .frets_for_pitch_class(string, pc, 0, self.max_fret)
                        .is_empty()
            })
    }

    fn check_inputs(&self, voicing: &Voicing, strings: &[usize]) -> Result<(), ProjectionError> {
        if voicing.is_empty() {
            return Err(ProjectionError::InvalidVoicing(
                "voicing cannot be empty".to_string(),
            ));
        }
        if strings.len() < voicing.len() {
            return Err(ProjectionError::InvalidVoicing(format!(
                "string set {:?} is too small for {} voices",
                strings,
                voicing.len()
            )));
        }
        for (i, &string) in strings.iter().enumerate() {
            if string >= STRING_COUNT {
                return Err(ProjectionError::InvalidVoicing(format!(
                    "string {} does not exist",
                    string
                )));
            }
            if strings[..i].contains(&string) {
                return Err(ProjectionError::InvalidVoicing(format!(
                    "string {} appears twice in {:?}",
                    string, strings
                )));
            }
        }
        Ok(())
    }

    fn frets_near(&self, string: usize, pitch_class: u8, anchor: u8, radius: u8) -> Vec<u8> {
        let lo = anchor.saturating_sub(radius);
        let hi = anchor.saturating_add(radius).min(self.max_fret);
        self.tuning.frets_for_pitch_class(string, pitch_class, lo, hi)
    }

    fn best_combination(
        &self,
        per_voice: &[Vec<u8>],
        strings: &[usize],
        anchor: u8,
        previous: Option<&Mapping>,
    ) -> Option<Best> {
        if per_voice.iter().any(Vec::is_empty) {
            return None;
        }
        let mut best = None;
        let mut chosen = Vec::with_capacity(per_voice.len());
        self.enumerate(per_voice, strings, anchor, previous, &mut chosen, &mut best);
        best
    }

    fn enumerate(
        &self,
        per_voice: &[Vec<u8>],
        strings: &[usize],
        anchor: u8,
        previous: Option<&Mapping>,
        chosen: &mut Vec<u8>,
        best: &mut Option<Best>,
    ) {
        let voice = chosen.len();
        if voice == per_voice.len() {
            let (score, large_leaps) = self.score(chosen, strings, anchor, previous);
            // Strict comparison keeps the first combination found on ties.
            if best.as_ref().map_or(true, |b| score < b.score) {
                *best = Some(Best {
                    frets: chosen.clone(),
                    score,
                    large_leaps,
                });
            }
            return;
        }

        for &fret in &per_voice[voice] {
            chosen.push(fret);
            if span_of(chosen) <= self.max_fret_span {
                self.enumerate(per_voice, strings, anchor, previous, chosen, best);
            }
            chosen.pop();
        }
    }

    /// Cost of one complete combination; lower is better.
    fn score(
        &self,
        frets: &[u8],
        strings: &[usize],
        anchor: u8,
        previous: Option<&Mapping>,
    ) -> (f64, usize) {
        let mean_distance = frets
            .iter()
            .map(|&f| (f as f64 - anchor as f64).abs())
            .sum::<f64>()
            / frets.len() as f64;
        let mut score = span_of(frets) as f64 * SPAN_WEIGHT + mean_distance;
        let mut large_leaps = 0;

        // Voices are compared index by index, so only same-sized chords take part.
        let previous = previous.filter(|p| p.string_set.len() == frets.len());
        if let Some(previous) = previous {
            for (i, (&fret, &string)) in frets.iter().zip(strings).enumerate() {
                let prev_string = previous.string_set[i];
                let Some(prev_fret) = previous.frets[prev_string] else {
                    continue;
                };

                if string == prev_string {
                    score += SAME_STRING_BONUS;
                }
                if self.tuning.pitch(string, fret) == self.tuning.pitch(prev_string, prev_fret) {
                    score += COMMON_TONE_BONUS;
                }

                let distance = fret.abs_diff(prev_fret);
                if distance > LARGE_LEAP_FRETS {
                    large_leaps += 1;
                    score += distance as f64 * LARGE_LEAP_WEIGHT;
                } else {
                    score += distance as f64 * SMALL_MOVE_WEIGHT;
                }
            }
            score += large_leaps as f64 * LARGE_LEAP_FLAG_PENALTY;
        }

        (score, large_leaps)
    }

    /// Nearest match for each voice on any free string, or the target fret itself.
    fn fallback(&self, pitch_classes: &[u8], strings: &[usize], anchor: u8) -> Placement {
        let mut positions: Vec<VoicePosition> = Vec::with_capacity(pitch_classes.len());
        let mut kind = PlacementKind::Relocated;

        for (&pc, &requested) in pitch_classes.iter().zip(strings) {
            let taken = |s: usize| positions.iter().any(|p| p.string == s);

            // Requested string first so it wins ties on distance.
            let order = std::iter::once(requested).chain((0..STRING_COUNT).filter(|&s| s != requested));
            let nearest = order
                .filter(|&s| !taken(s))
                .flat_map(|s| {
                    self.tuning
                        .frets_for_pitch_class(s, pc, 0, self.max_fret)
                        .into_iter()
                        .map(move |fret| VoicePosition { string: s, fret })
                })
                .min_by_key(|p| p.fret.abs_diff(anchor));

            match nearest {
                Some(position) => positions.push(position),
                None => {
                    warn!(
                        pitch_class = pc,
                        string = requested,
                        anchor,
                        "no matching fret anywhere, forcing anchor fret"
                    );
                    kind = PlacementKind::Forced;
                    let string = if taken(requested) {
                        (0..STRING_COUNT).find(|&s| !taken(s)).unwrap_or(requested)
                    } else {
                        requested
                    };
                    positions.push(VoicePosition { string, fret: anchor });
                }
            }
        }

        Placement {
            positions,
            kind,
            score: None,
            large_leaps: 0,
        }
    }
}

fn exact_placement(best: Best, strings: &[usize]) -> Placement {
    Placement {
        positions: best
            .frets
            .iter()
            .zip(strings)
            .map(|(&fret, &string)| VoicePosition { string, fret })
            .collect(),
        kind: PlacementKind::Exact,
        score: Some(best.score),
        large_leaps: best.large_leaps,
    }
}

fn span_of(frets: &[u8]) -> u8 {
    let lo = frets.iter().copied().min().unwrap_or(0);
    let hi = frets.iter().copied().max().unwrap_or(0);
    hi - lo
}

/// True when a placed voice sounds the voicing's pitch class.
pub fn matches_pitch_class(tuning: &Tuning, position: VoicePosition, pitch: u8) -> bool {
    pitch_class_of(tuning.pitch(position.string, position.fret)) == pitch_class_of(pitch)
}
