//! Human-readable findings

use std::collections::BTreeMap;
use std::fmt;

use event_segmenter::DeviationEvent;
use posture::DeviationType;
use serde::Serialize;

use crate::config::{RiskConfig, StaticPostureRule};
use crate::metrics::{Metrics, RiskLevel};

/// One diagnostic statement about an analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "finding", rename_all = "snake_case")]
pub enum Finding {
    InadequatePostures { count: usize },
    RepetitiveMovements,
    ForcedPostures { limit_seconds: f64 },
    MissingPauses,
    ExtremeAngles { frames: usize },
    StaticPostures { count: usize, rule: StaticPostureRule },
    ElevatedRisk { level: RiskLevel },
    /// Persistent events of one type and the frames they cover
    Occurrences {
        kind: DeviationType,
        events: usize,
        frames: usize,
    },
    NoRelevantRisk,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InadequatePostures { count } => write!(
                f,
                "{} inadequate postures were detected, indicating ergonomic risk",
                count
            ),
            Self::RepetitiveMovements => write!(
                f,
                "Repetitive movements were identified, which can lead to musculoskeletal disorders"
            ),
            Self::ForcedPostures { limit_seconds } => write!(
                f,
                "Forced postures were held for more than {} seconds",
                limit_seconds
            ),
            Self::MissingPauses => write!(
                f,
                "No work pauses were detected; regular recovery pauses are recommended"
            ),
            Self::ExtremeAngles { frames } => write!(
                f,
                "Extreme joint angles were detected on {} frames, which can overload muscles",
                frames
            ),
            Self::StaticPostures { count, rule } => match rule {
                StaticPostureRule::Duration { min_seconds } => write!(
                    f,
                    "{} static postures were held for more than {} seconds",
                    count, min_seconds
                ),
                StaticPostureRule::AngularVariance {
                    max_std_dev_degrees,
                } => write!(
                    f,
                    "{} static postures were held with less than {} degrees of angle variation",
                    count, max_std_dev_degrees
                ),
            },
            Self::ElevatedRisk { level } => write!(
                f,
                "Overall postural risk is {}, intervention is recommended",
                level
            ),
            Self::Occurrences {
                kind,
                events,
                frames,
            } => write!(
                f,
                "{} persistent occurrences of \"{}\" covering {} frames",
                events, kind, frames
            ),
            Self::NoRelevantRisk => write!(
                f,
                "No relevant ergonomic risk was identified; posture is within recommended limits"
            ),
        }
    }
}

/// Ordered findings for a run's metrics and persistent events
pub fn diagnose(metrics: &Metrics, events: &[DeviationEvent], config: &RiskConfig) -> Vec<Finding> {
    let mut findings = Vec::new();

    if metrics.inadequate_postures > 0 {
        findings.push(Finding::InadequatePostures {
            count: metrics.inadequate_postures,
        });
    }
    if metrics.repetitive_movements {
        findings.push(Finding::RepetitiveMovements);
    }
    if metrics.forced_postures {
        findings.push(Finding::ForcedPostures {
            limit_seconds: config.forced_posture_seconds,
        });
    }
    if !metrics.pauses_or_rhythm {
        findings.push(Finding::MissingPauses);
    }
    if metrics.extreme_articular_angles > 0 {
        findings.push(Finding::ExtremeAngles {
            frames: metrics.extreme_articular_angles,
        });
    }
    if metrics.static_postures > 0 {
        findings.push(Finding::StaticPostures {
            count: metrics.static_postures,
            rule: config.static_posture,
        });
    }
    if metrics.postural_risk > RiskLevel::Low {
        findings.push(Finding::ElevatedRisk {
            level: metrics.postural_risk,
        });
    }

    let mut by_type: BTreeMap<DeviationType, (usize, usize)> = BTreeMap::new();
    for event in events {
        let entry = by_type.entry(event.kind()).or_default();
        entry.0 += 1;
        entry.1 += event.len_frames();
    }
    findings.extend(
        by_type
            .into_iter()
            .map(|(kind, (events, frames))| Finding::Occurrences {
                kind,
                events,
                frames,
            }),
    );

    if findings.is_empty() {
        findings.push(Finding::NoRelevantRisk);
    }
    findings
}
