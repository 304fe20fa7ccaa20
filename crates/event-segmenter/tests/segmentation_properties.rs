use std::collections::BTreeSet;

use event_segmenter::{EventSegmenter, PersistenceFilter};
use posture::{DeviationSample, DeviationType};
use proptest::prelude::*;

/// Sorted, de-duplicated frame indices
fn frame_set() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::btree_set(0_usize..500, 0..200).prop_map(|s| s.into_iter().collect())
}

fn samples(frames: &[usize]) -> Vec<DeviationSample> {
    frames
        .iter()
        .map(|&frame_index| DeviationSample {
            frame_index,
            angle: 120.0,
            kind: DeviationType::TrunkInclination,
        })
        .collect()
}

proptest! {
    #[test]
    fn pt_events_are_contiguous_runs(frames in frame_set()) {
        let events = EventSegmenter::new().segment(samples(&frames));

        for event in &events {
            prop_assert_eq!(event.len_frames(), event.samples().len());
            for pair in event.samples().windows(2) {
                prop_assert_eq!(pair[1].frame_index, pair[0].frame_index + 1);
            }
        }
    }

    #[test]
    fn pt_events_are_maximal_and_cover_input(frames in frame_set()) {
        let events = EventSegmenter::new().segment(samples(&frames));
        let input: BTreeSet<usize> = frames.iter().copied().collect();

        let covered: Vec<usize> = events
            .iter()
            .flat_map(|e| e.samples().iter().map(|s| s.frame_index))
            .collect();
        prop_assert_eq!(covered, frames.clone());

        for event in &events {
            if event.start_frame() > 0 {
                prop_assert!(!input.contains(&(event.start_frame() - 1)));
            }
            prop_assert!(!input.contains(&(event.end_frame() + 1)));
        }
    }

    #[test]
    fn pt_persistence_filter_idempotent(frames in frame_set(), min_frames in 0_usize..40) {
        let filter = PersistenceFilter::new(min_frames);
        let once = filter.apply(EventSegmenter::new().segment(samples(&frames)));
        let twice = filter.apply(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn pt_persistence_filter_keeps_only_long_events(frames in frame_set(), min_frames in 0_usize..40) {
        let events = EventSegmenter::new().segment(samples(&frames));
        let expected = events.iter().filter(|e| e.len_frames() >= min_frames).count();
        let kept = PersistenceFilter::new(min_frames).apply(events);
        prop_assert_eq!(kept.len(), expected);
        prop_assert!(kept.iter().all(|e| e.len_frames() >= min_frames));
    }
}
