//! Analysis report

use event_segmenter::{AngleStatistics, DeviationEvent, DeviationRow, TimeRange};
use keypoints::TimeBase;
use posture::FrameAngles;
use risk_assessment::{Finding, Metrics};
use serde::Serialize;
use uuid::Uuid;

/// Persistent event with its timing resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    #[serde(flatten)]
    pub event: DeviationEvent,
    pub time_range: TimeRange,
    pub duration_seconds: f64,
    pub statistics: AngleStatistics,
}

impl EventRecord {
    pub fn new(event: DeviationEvent, time_base: &TimeBase) -> Self {
        Self {
            time_range: event.time_range(time_base),
            duration_seconds: event.duration_seconds(time_base),
            statistics: event.statistics(),
            event,
        }
    }
}

/// Angles of one detected frame, for charting
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameAngleRecord {
    pub frame: usize,
    pub elapsed_seconds: f64,
    #[serde(flatten)]
    pub angles: FrameAngles,
}

/// Everything one analysis run returns
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub run_id: Uuid,
    pub time_base: TimeBase,
    pub metrics: Metrics,
    /// Persistent events ordered by type, then start frame
    pub events: Vec<EventRecord>,
    pub frame_angles: Vec<FrameAngleRecord>,
    pub findings: Vec<Finding>,
}

impl AnalysisReport {
    /// Row-per-sample deviation table ordered by frame
    pub fn deviation_rows(&self) -> Vec<DeviationRow> {
        let mut rows: Vec<_> = self
            .events
            .iter()
            .flat_map(|record| record.event.rows(&self.time_base))
            .collect();
        rows.sort_by_key(|row| row.frame);
        rows
    }

    /// Findings rendered as sentences
    pub fn finding_messages(&self) -> Vec<String> {
        self.findings.iter().map(ToString::to_string).collect()
    }
}
