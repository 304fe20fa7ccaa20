//! Minimum persistence filter

use keypoints::TimeBase;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::event::DeviationEvent;

/// Drops events shorter than a minimum number of frames.
///
/// Short events are discarded whole; they are never merged with neighbours
/// or partially kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceFilter {
    min_frames: usize,
}

impl PersistenceFilter {
    pub fn new(min_frames: usize) -> Self {
        Self { min_frames }
    }

    /// Filter requiring events to last at least `min_seconds`
    pub fn from_seconds(min_seconds: f64, time_base: &TimeBase) -> Self {
        Self::new(time_base.min_frames(min_seconds))
    }

    pub fn min_frames(&self) -> usize {
        self.min_frames
    }

    /// Whether `event` is long enough to be kept
    pub fn keeps(&self, event: &DeviationEvent) -> bool {
        event.len_frames() >= self.min_frames
    }

    pub fn apply(&self, events: Vec<DeviationEvent>) -> Vec<DeviationEvent> {
        let before = events.len();
        let kept: Vec<_> = events.into_iter().filter(|e| self.keeps(e)).collect();
        debug!(
            min_frames = self.min_frames,
            kept = kept.len(),
            discarded = before - kept.len(),
            "Persistence filter applied"
        );
        kept
    }
}
