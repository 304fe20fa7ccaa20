//! Run-length event segmentation

use std::collections::BTreeMap;

use posture::{DeviationSample, DeviationType};
use tracing::debug;

use crate::event::DeviationEvent;

/// Groups ordered deviation samples into events.
///
/// A run is extended only by a sample of the same type on the very next frame
/// index. Any gap, including one left by an undetected frame, closes the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventSegmenter;

impl EventSegmenter {
    pub fn new() -> Self {
        Self
    }

    /// Segment samples of one deviation type, ordered by frame index.
    ///
    /// Zero samples yield zero events.
    pub fn segment<I>(&self, samples: I) -> Vec<DeviationEvent>
    where
        I: IntoIterator<Item = DeviationSample>,
    {
        let mut events = Vec::new();
        let mut current: Option<DeviationEvent> = None;

        for sample in samples {
            match current.as_mut() {
                Some(event) if event.continues_with(&sample) => event.extend(sample),
                _ => {
                    if let Some(closed) = current.replace(DeviationEvent::open(sample)) {
                        events.push(closed);
                    }
                }
            }
        }
        events.extend(current);

        events
    }

    /// Segment a mixed stream, each type independently.
    ///
    /// Events are returned ordered by type, then by start frame. Events of
    /// different types may overlap in frame range.
    pub fn segment_by_type<I>(&self, samples: I) -> Vec<DeviationEvent>
    where
        I: IntoIterator<Item = DeviationSample>,
    {
        let mut by_type: BTreeMap<DeviationType, Vec<DeviationSample>> = BTreeMap::new();
        for sample in samples {
            by_type.entry(sample.kind).or_default().push(sample);
        }

        let mut events = Vec::new();
        for (kind, samples) in by_type {
            let segmented = self.segment(samples);
            debug!(kind = kind.key(), events = segmented.len(), "Segmented deviation type");
            events.extend(segmented);
        }
        events
    }
}
