//! Deviation events

use keypoints::TimeBase;
use posture::{DeviationSample, DeviationType};
use serde::Serialize;

use crate::statistics::AngleStatistics;

/// Elapsed-time span of an event (seconds from the first analyzed frame)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeRange {
    pub start_seconds: f64,
    /// Start of the last frame in the event
    pub end_seconds: f64,
}

/// Maximal run of contiguous frames sharing one deviation type.
///
/// Invariant: samples are ordered and exactly contiguous, so
/// `end_frame - start_frame + 1 == samples.len()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviationEvent {
    kind: DeviationType,
    start_frame: usize,
    end_frame: usize,
    samples: Vec<DeviationSample>,
}

impl DeviationEvent {
    /// Open a new event at `sample`
    pub(crate) fn open(sample: DeviationSample) -> Self {
        Self {
            kind: sample.kind,
            start_frame: sample.frame_index,
            end_frame: sample.frame_index,
            samples: vec![sample],
        }
    }

    /// Whether `sample` directly continues this event
    pub(crate) fn continues_with(&self, sample: &DeviationSample) -> bool {
        sample.kind == self.kind && self.end_frame.checked_add(1) == Some(sample.frame_index)
    }

    pub(crate) fn extend(&mut self, sample: DeviationSample) {
        self.end_frame = sample.frame_index;
        self.samples.push(sample);
    }

    pub fn kind(&self) -> DeviationType {
        self.kind
    }

    pub fn start_frame(&self) -> usize {
        self.start_frame
    }

    /// Last frame of the event (inclusive)
    pub fn end_frame(&self) -> usize {
        self.end_frame
    }

    pub fn samples(&self) -> &[DeviationSample] {
        &self.samples
    }

    /// Number of frames spanned
    pub fn len_frames(&self) -> usize {
        self.end_frame - self.start_frame + 1
    }

    pub fn duration_seconds(&self, time_base: &TimeBase) -> f64 {
        time_base.seconds_for_frames(self.len_frames())
    }

    pub fn time_range(&self, time_base: &TimeBase) -> TimeRange {
        TimeRange {
            start_seconds: time_base.timestamp(self.start_frame),
            end_seconds: time_base.timestamp(self.end_frame),
        }
    }

    pub fn angles(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.angle).collect()
    }

    pub fn statistics(&self) -> AngleStatistics {
        AngleStatistics::compute(&self.angles())
    }

    /// One table row per sampled frame
    pub fn rows(&self, time_base: &TimeBase) -> Vec<DeviationRow> {
        self.samples
            .iter()
            .map(|s| DeviationRow {
                frame: s.frame_index,
                elapsed_seconds: round2(time_base.timestamp(s.frame_index)),
                deviation: s.kind.label(),
                angle: round2(s.angle),
            })
            .collect()
    }
}

/// Row of the per-frame deviation table handed to export collaborators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviationRow {
    pub frame: usize,
    pub elapsed_seconds: f64,
    pub deviation: &'static str,
    pub angle: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
