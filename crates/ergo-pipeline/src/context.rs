//! Per-run state

use keypoints::TimeBase;
use posture::FrameClassification;
use risk_assessment::FrameTally;
use uuid::Uuid;

/// State owned by a single analysis run
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: Uuid,
    pub time_base: TimeBase,
    pub tally: FrameTally,
}

impl RunContext {
    pub fn new(time_base: TimeBase) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            time_base,
            tally: FrameTally::default(),
        }
    }

    pub fn record(&mut self, frame: &FrameClassification) {
        self.tally.record(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_run_gets_fresh_context() {
        let mut first = RunContext::new(TimeBase::default());
        first.record(&FrameClassification::Undetected { index: 0 });
        let second = RunContext::new(TimeBase::default());

        assert_ne!(first.run_id, second.run_id);
        assert_eq!(first.tally.undetected_frames, 1);
        assert_eq!(second.tally, FrameTally::default());
    }
}
