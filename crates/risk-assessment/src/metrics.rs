//! Metrics aggregation and risk classification

use std::collections::BTreeMap;
use std::fmt;

use data_validator::{Validate, Validator};
use event_segmenter::DeviationEvent;
use keypoints::TimeBase;
use posture::{DeviationType, FrameClassification};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{RepetitionRule, RiskBasis, RiskConfig, StaticPostureRule};
use crate::RiskError;

/// Qualitative postural risk
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum RiskLevel {
    #[default]
    Low,
    Moderate,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        })
    }
}

/// Frame-level counts gathered during classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameTally {
    pub total_frames: usize,
    pub undetected_frames: usize,
    /// Detected frames with at least one extreme angle
    pub extreme_frames: usize,
    /// Frames classified as arm elevation, before persistence filtering
    pub arm_elevated_frames: usize,
}

impl FrameTally {
    pub fn record(&mut self, frame: &FrameClassification) {
        self.total_frames += 1;
        if !frame.is_detected() {
            self.undetected_frames += 1;
        }
        if frame.is_extreme() {
            self.extreme_frames += 1;
        }
        if frame.has_deviation(DeviationType::ArmElevation) {
            self.arm_elevated_frames += 1;
        }
    }

    pub fn from_classifications<'a, I>(frames: I) -> Self
    where
        I: IntoIterator<Item = &'a FrameClassification>,
    {
        let mut tally = Self::default();
        for frame in frames {
            tally.record(frame);
        }
        tally
    }
}

/// One named indicator value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IndicatorValue {
    Count(usize),
    Flag(bool),
    Seconds(f64),
    Level(RiskLevel),
}

impl fmt::Display for IndicatorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{}", n),
            Self::Flag(flag) => write!(f, "{}", if *flag { "yes" } else { "no" }),
            Self::Seconds(s) => write!(f, "{:.2} s", s),
            Self::Level(level) => write!(f, "{}", level),
        }
    }
}

/// Summary of one analysis run
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Metrics {
    /// Persistent deviation events across all types
    pub inadequate_postures: usize,
    pub repetitive_movements: bool,
    pub forced_postures: bool,
    /// Enough undetected time to count as a pause
    pub pauses_or_rhythm: bool,
    /// Frames with at least one extreme angle
    pub extreme_articular_angles: usize,
    pub static_postures: usize,
    pub postural_risk: RiskLevel,

    /// Persistent events per deviation type
    pub events_by_type: BTreeMap<DeviationType, usize>,
    pub total_frames: usize,
    pub undetected_frames: usize,
    pub analyzed_seconds: f64,
    pub undetected_seconds: f64,
}

impl Metrics {
    pub fn events_of(&self, kind: DeviationType) -> usize {
        self.events_by_type.get(&kind).copied().unwrap_or(0)
    }

    /// Named indicator mapping for reporting
    pub fn indicators(&self) -> BTreeMap<&'static str, IndicatorValue> {
        use IndicatorValue::*;

        let mut map = BTreeMap::from([
            ("inadequate_postures", Count(self.inadequate_postures)),
            ("repetitive_movements", Flag(self.repetitive_movements)),
            ("forced_postures", Flag(self.forced_postures)),
            ("pauses_or_rhythm", Flag(self.pauses_or_rhythm)),
            ("extreme_articular_angles", Count(self.extreme_articular_angles)),
            ("static_postures", Count(self.static_postures)),
            ("postural_risk", Level(self.postural_risk)),
            ("total_frames", Count(self.total_frames)),
            ("undetected_frames", Count(self.undetected_frames)),
            ("analyzed_seconds", Seconds(self.analyzed_seconds)),
            ("undetected_seconds", Seconds(self.undetected_seconds)),
        ]);
        for kind in DeviationType::ALL {
            map.insert(event_count_key(kind), Count(self.events_of(kind)));
        }
        map
    }
}

fn event_count_key(kind: DeviationType) -> &'static str {
    match kind {
        DeviationType::TrunkInclination => "trunk_inclination_events",
        DeviationType::ArmElevation => "arm_elevation_events",
        DeviationType::KneeFlexion => "knee_flexion_events",
    }
}

/// Combines persistent events and frame tallies into [`Metrics`]
#[derive(Debug, Clone)]
pub struct MetricsAggregator {
    config: RiskConfig,
    time_base: TimeBase,
}

impl MetricsAggregator {
    /// Rejects an invalid risk configuration or time base before any
    /// duration is computed.
    pub fn new(config: RiskConfig, time_base: TimeBase) -> Result<Self, RiskError> {
        let mut validator = Validator::new();
        config.validate(&mut validator);
        validator.nested("time_base", &time_base);
        validator.finish().into_result()?;
        Ok(Self { config, time_base })
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Risk level for the given counts
    pub fn risk_level(&self, inadequate_postures: usize, extreme_frames: usize) -> RiskLevel {
        let score = match self.config.basis {
            RiskBasis::InadequatePostures => inadequate_postures,
            RiskBasis::Combined => inadequate_postures + extreme_frames,
        };

        if score >= self.config.high_cutoff {
            RiskLevel::High
        } else if score >= self.config.moderate_cutoff {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    /// Aggregate persistence-filtered events
    pub fn aggregate(&self, events: &[DeviationEvent], tally: &FrameTally) -> Metrics {
        let tb = &self.time_base;

        let mut events_by_type: BTreeMap<DeviationType, usize> =
            DeviationType::ALL.into_iter().map(|k| (k, 0)).collect();
        for event in events {
            *events_by_type.entry(event.kind()).or_insert(0) += 1;
        }
        let count_of = |kind: DeviationType| events_by_type.get(&kind).copied().unwrap_or(0);

        let inadequate_postures = events.len();

        let repetitive_movements = match self.config.repetition {
            RepetitionRule::EventCount { max_events } => {
                count_of(DeviationType::ArmElevation) > max_events
            }
            RepetitionRule::FrameProportion { max_ratio } => {
                tally.total_frames > 0
                    && tally.arm_elevated_frames as f64 / tally.total_frames as f64 > max_ratio
            }
        };

        let forced_postures = events.iter().any(|e| {
            e.kind() == DeviationType::KneeFlexion
                && e.duration_seconds(tb) > self.config.forced_posture_seconds
        });

        let undetected_seconds = tb.seconds_for_frames(tally.undetected_frames);
        let pauses_or_rhythm = if self.config.pause_inclusive {
            undetected_seconds >= self.config.pause_seconds
        } else {
            undetected_seconds > self.config.pause_seconds
        };

        let static_postures = match self.config.static_posture {
            StaticPostureRule::Duration { min_seconds } => events
                .iter()
                .filter(|e| {
                    e.kind() == DeviationType::TrunkInclination
                        && e.duration_seconds(tb) > min_seconds
                })
                .count(),
            StaticPostureRule::AngularVariance {
                max_std_dev_degrees,
            } => events
                .iter()
                .filter(|e| e.statistics().std_dev < max_std_dev_degrees)
                .count(),
        };

        let postural_risk = self.risk_level(inadequate_postures, tally.extreme_frames);

        debug!(
            repetitive = repetitive_movements,
            forced = forced_postures,
            pauses = pauses_or_rhythm,
            static_postures,
            "Indicators computed"
        );
        info!(
            events = inadequate_postures,
            extreme_frames = tally.extreme_frames,
            risk = %postural_risk,
            "Metrics aggregated"
        );

        Metrics {
            inadequate_postures,
            repetitive_movements,
            forced_postures,
            pauses_or_rhythm,
            extreme_articular_angles: tally.extreme_frames,
            static_postures,
            postural_risk,
            events_by_type,
            total_frames: tally.total_frames,
            undetected_frames: tally.undetected_frames,
            analyzed_seconds: tb.seconds_for_frames(tally.total_frames),
            undetected_seconds,
        }
    }
}
