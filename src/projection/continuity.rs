//! Continuity tracking
//!
//! Everything the engine remembers between calls lives in [`ContinuityState`]:
//! the previous mapping, the string set and shape it used, the position window
//! and a short history of anchor frets. The engine owns exactly one of these and
//! commits to it once per successful `project()` call.
//!
//! The position window drifts instead of jumping: a RESET recentres it tightly on
//! the new anchor, STEP and HOLD only push its edges out far enough to keep the
//! anchor inside. Drift correction pulls the window back toward the rolling mean
//! of recent anchors when the current anchor runs away from it.

use std::collections::VecDeque;

use tracing::debug;

use crate::types::{Mapping, MovementType, PositionWindow, ShapeId};

/// Number of recent anchors averaged for drift correction.
pub const DRIFT_SAMPLE: usize = 4;

#[derive(Debug, Clone, Default)]
pub struct ContinuityState {
    previous: Option<Mapping>,
    string_set: Option<Vec<usize>>,
    shape_id: Option<ShapeId>,
    window: Option<PositionWindow>,
    history: VecDeque<u8>,
}

impl ContinuityState {
    pub fn new() -> Self {
        ContinuityState::default()
    }

    pub fn previous(&self) -> Option<&Mapping> {
        self.previous.as_ref()
    }

    pub fn string_set(&self) -> Option<&[usize]> {
        self.string_set.as_deref()
    }

    pub fn shape_id(&self) -> Option<&ShapeId> {
        self.shape_id.as_ref()
    }

    pub fn window(&self) -> Option<PositionWindow> {
        self.window
    }

    pub fn history(&self) -> impl Iterator<Item = u8> + '_ {
        self.history.iter().copied()
    }

    /// True before the first successful projection and after a reset.
    pub fn is_empty(&self) -> bool {
        self.previous.is_none()
    }

    pub fn clear(&mut self) {
        *self = ContinuityState::default();
    }

    /// Mean of the last [`DRIFT_SAMPLE`] anchors, once that many are recorded.
    pub fn rolling_mean(&self) -> Option<f64> {
        if self.history.len() < DRIFT_SAMPLE {
            return None;
        }
        let recent = self.history.iter().rev().take(DRIFT_SAMPLE);
        Some(recent.map(|&a| a as f64).sum::<f64>() / DRIFT_SAMPLE as f64)
    }

    /// Window for a new anchor under the given movement, before drift correction.
    pub fn next_window(
        &self,
        movement: MovementType,
        anchor: u8,
        max_fret_span: u8,
        max_fret: u8,
    ) -> PositionWindow {
        match (movement, self.window) {
            (MovementType::Step | MovementType::Hold, Some(window)) => window.widened_to(anchor),
            _ => PositionWindow::around(anchor, max_fret_span, max_fret),
        }
    }

    /// Recentre `window` on the rolling mean when `anchor` has drifted too far from it.
    ///
    /// The result is widened to keep `anchor` inside.
    pub fn correct_drift(
        &self,
        window: PositionWindow,
        anchor: u8,
        max_fret_span: u8,
        max_fret: u8,
    ) -> PositionWindow {
        let Some(mean) = self.rolling_mean() else {
            return window;
        };
        if (anchor as f64 - mean).abs() <= max_fret_span as f64 {
            return window;
        }

        let target = mean.round() as u8;
        debug!(anchor, mean, target, "drift correction recentring window");
        PositionWindow::around(target, max_fret_span, max_fret).widened_to(anchor)
    }

    /// Record a mapping as the new reference point.
    pub fn commit(&mut self, mapping: &Mapping, history_size: usize) {
        self.previous = Some(mapping.clone());
        self.string_set = Some(mapping.string_set.clone());
        self.shape_id = Some(mapping.shape_id.clone());
        self.window = Some(mapping.position_window);
        self.push_anchor(mapping.anchor_fret, history_size);
    }

    /// Record a caller-requested hold: the mapping is unchanged, the anchor still counts.
    pub fn commit_hold(&mut self, mapping: &Mapping, history_size: usize) {
        self.previous = Some(mapping.clone());
        self.push_anchor(mapping.anchor_fret, history_size);
    }

    fn push_anchor(&mut self, anchor: u8, history_size: usize) {
        self.history.push_back(anchor);
        while self.history.len() > history_size {
            self.history.pop_front();
        }
    }
}
