//! Candidate string sets
//!
//! Builds the ordered list of string sets the engine tries for one chord.
//! Earlier entries preserve continuity; later ones fall back to register
//! preferences, a fixed low-to-high list and finally every contiguous window.

use crate::tuning::STRING_COUNT;
use crate::types::RegisterBand;

/// Fixed low-to-high priority list, truncated to the voice count.
pub const DEFAULT_PRIORITY: [[usize; 4]; 3] = [[0, 1, 2, 3], [1, 2, 3, 4], [2, 3, 4, 5]];

/// Where the candidate came from, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// Same shape on the same strings as last time
    SameShape,
    /// Current strings, shape changed
    CurrentStrings,
    /// Preferred strings for the register band after a reset
    Register,
    /// Fixed priority list
    Priority,
    /// Exhaustive contiguous window
    Exhaustive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub strings: Vec<usize>,
    pub source: CandidateSource,
}

/// Inputs that decide the candidate order.
#[derive(Debug, Clone, Copy)]
pub struct CandidateContext<'a> {
    pub voice_count: usize,
    pub register_band: RegisterBand,
    pub reset_forced: bool,
    /// No previous mapping to stay close to
    pub first_projection: bool,
    pub current_strings: Option<&'a [usize]>,
    pub same_shape: bool,
    /// Whether the current strings still fit the new voicing
    pub current_fits: bool,
}

/// Preferred string sets for a band, lowest strings for `low`, highest for `high`.
pub fn register_sets(band: RegisterBand, voice_count: usize) -> Vec<Vec<usize>> {
    let sets: &[[usize; 4]] = match band {
        RegisterBand::Low => &[[0, 1, 2, 3], [1, 2, 3, 4]],
        RegisterBand::High => &[[2, 3, 4, 5], [1, 2, 3, 4]],
        RegisterBand::Mid => &[[1, 2, 3, 4], [2, 3, 4, 5], [0, 1, 2, 3]],
    };
    truncate_all(sets, voice_count)
}

pub fn priority_sets(voice_count: usize) -> Vec<Vec<usize>> {
    truncate_all(&DEFAULT_PRIORITY, voice_count)
}

/// Every run of `width` adjacent strings, lowest first.
pub fn contiguous_sets(width: usize) -> Vec<Vec<usize>> {
    if width == 0 || width > STRING_COUNT {
        return Vec::new();
    }
    (0..=STRING_COUNT - width).map(|start| (start..start + width).collect()).collect()
}

// Sets shorter than the voicing are dropped rather than padded.
fn truncate_all(sets: &[[usize; 4]], voice_count: usize) -> Vec<Vec<usize>> {
    sets.iter()
        .filter(|set| set.len() >= voice_count)
        .map(|set| set[..voice_count].to_vec())
        .collect()
}

/// Ordered, de-duplicated candidates for one chord.
pub fn candidate_sets(ctx: &CandidateContext<'_>) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut push = |strings: Vec<usize>, source: CandidateSource| {
        if strings.len() == ctx.voice_count && !candidates.iter().any(|c| c.strings == strings) {
            candidates.push(Candidate { strings, source });
        }
    };

    if !ctx.reset_forced && ctx.current_fits {
        if let Some(current) = ctx.current_strings {
            let source = if ctx.same_shape {
                CandidateSource::SameShape
            } else {
                CandidateSource::CurrentStrings
            };
            push(current.to_vec(), source);
        }
    }

    if ctx.reset_forced || ctx.first_projection {
        for set in register_sets(ctx.register_band, ctx.voice_count) {
            push(set, CandidateSource::Register);
        }
    }

    for set in priority_sets(ctx.voice_count) {
        push(set, CandidateSource::Priority);
    }

    for set in contiguous_sets(ctx.voice_count) {
        push(set, CandidateSource::Exhaustive);
    }

    candidates
}
