use std::sync::Mutex;

use ergo_pipeline::{ErgoPipeline, ObserverError, PipelineConfig, ProgressObserver};
use keypoints::{Dimensionality, Landmark, PoseSequence, RawFrame, TimeBase};
use posture::DeviationType;
use risk_assessment::{Finding, RiskBasis, RiskLevel};

#[derive(Clone, Copy)]
enum Pose {
    Standing,
    /// Trunk bent forward to about 131 degrees
    Bent,
    /// Forearm raised to about 129 degrees
    ArmRaised,
    /// Arm straight overhead, 180 degrees (also extreme)
    ArmOverhead,
    /// Knee bent to about 87 degrees
    Crouched,
    NoPerson,
}

fn raw(pose: Pose) -> RawFrame {
    let mut points = vec![[0.0, 0.0]; 17];
    let mut set = |landmark: Landmark, x: f64, y: f64| points[landmark.index()] = [x, y];

    set(Landmark::LeftShoulder, 90.0, 100.0);
    set(Landmark::RightShoulder, 110.0, 100.0);
    set(Landmark::LeftElbow, 90.0, 150.0);
    set(Landmark::LeftWrist, 140.0, 140.0);
    set(Landmark::LeftHip, 95.0, 200.0);
    set(Landmark::RightHip, 105.0, 200.0);
    set(Landmark::LeftKnee, 100.0, 300.0);
    set(Landmark::LeftAnkle, 100.0, 400.0);

    match pose {
        Pose::Standing => {}
        Pose::Bent => {
            set(Landmark::LeftShoulder, 170.0, 130.0);
            set(Landmark::RightShoulder, 190.0, 130.0);
            set(Landmark::LeftElbow, 170.0, 180.0);
            set(Landmark::LeftWrist, 220.0, 170.0);
        }
        Pose::ArmRaised => set(Landmark::LeftWrist, 140.0, 190.0),
        Pose::ArmOverhead => set(Landmark::LeftWrist, 90.0, 200.0),
        Pose::Crouched => set(Landmark::LeftAnkle, 0.0, 300.0),
        Pose::NoPerson => return RawFrame::default(),
    }

    RawFrame {
        keypoints: points.iter().map(|p| p.to_vec()).collect(),
    }
}

fn sequence(segments: &[(Pose, usize)]) -> PoseSequence {
    let frames = segments
        .iter()
        .flat_map(|&(pose, count)| std::iter::repeat(raw(pose)).take(count))
        .collect();
    PoseSequence::from_raw(frames, Dimensionality::Planar)
}

fn pipeline(config: PipelineConfig) -> ErgoPipeline {
    ErgoPipeline::new(config).unwrap()
}

#[test]
fn test_poses_classify_as_intended() {
    let report = pipeline(PipelineConfig {
        min_persistence_seconds: 0.0,
        ..Default::default()
    })
    .run(
        &sequence(&[
            (Pose::Standing, 1),
            (Pose::Bent, 1),
            (Pose::ArmRaised, 1),
            (Pose::ArmOverhead, 1),
            (Pose::Crouched, 1),
        ]),
        None,
    );

    let kinds: Vec<_> = report
        .events
        .iter()
        .map(|r| (r.event.kind(), r.event.start_frame(), r.event.len_frames()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (DeviationType::TrunkInclination, 1, 1),
            (DeviationType::ArmElevation, 2, 2),
            (DeviationType::KneeFlexion, 4, 1),
        ]
    );
    assert_eq!(report.metrics.extreme_articular_angles, 1);
    assert_eq!(report.frame_angles.len(), 5);
}

#[test]
fn test_short_knee_flexion_is_filtered() {
    let report = pipeline(PipelineConfig::default()).run(&sequence(&[(Pose::Crouched, 40)]), None);

    assert!(report.events.is_empty());
    assert_eq!(report.metrics.inadequate_postures, 0);
    assert!(!report.metrics.forced_postures);
    assert_eq!(report.metrics.postural_risk, RiskLevel::Low);
}

#[test]
fn test_huge_persistence_minimum_drops_everything() {
    let report = pipeline(PipelineConfig {
        min_persistence_seconds: 1e307,
        ..Default::default()
    })
    .run(&sequence(&[(Pose::Bent, 5)]), None);

    assert!(report.events.is_empty());
    assert_eq!(report.metrics.inadequate_postures, 0);
}

#[test]
fn test_persistent_trunk_inclination_counts_once() {
    let report = pipeline(PipelineConfig::default()).run(&sequence(&[(Pose::Bent, 100)]), None);

    assert_eq!(report.events.len(), 1);
    let record = &report.events[0];
    assert_eq!(record.event.kind(), DeviationType::TrunkInclination);
    assert_eq!((record.event.start_frame(), record.event.end_frame()), (0, 99));
    assert!((record.duration_seconds - 3.33).abs() < 0.01);
    assert_eq!(report.metrics.inadequate_postures, 1);
    assert_eq!(report.metrics.events_of(DeviationType::TrunkInclination), 1);
    assert_eq!(report.deviation_rows().len(), 100);
}

#[test]
fn test_gap_keeps_events_apart() {
    let config = PipelineConfig {
        min_persistence_seconds: 0.0,
        ..Default::default()
    };

    for gap in [Pose::Standing, Pose::NoPerson] {
        let report = pipeline(config.clone()).run(
            &sequence(&[(Pose::ArmRaised, 10), (gap, 10), (Pose::ArmRaised, 10)]),
            None,
        );

        assert_eq!(report.events.len(), 2);
        let spans: Vec<_> = report
            .events
            .iter()
            .map(|r| (r.event.start_frame(), r.event.end_frame(), r.event.len_frames()))
            .collect();
        assert_eq!(spans, vec![(0, 9, 10), (20, 29, 10)]);
    }
}

#[test]
fn test_single_undetected_frame_splits_event() {
    let report = pipeline(PipelineConfig::default()).run(
        &sequence(&[(Pose::Bent, 100), (Pose::NoPerson, 1), (Pose::Bent, 100)]),
        None,
    );
    assert_eq!(report.events.len(), 2);
    assert_eq!(report.metrics.undetected_frames, 1);
}

#[test]
fn test_ten_seconds_undetected_inclusive() {
    let report = pipeline(PipelineConfig::default()).run(&sequence(&[(Pose::NoPerson, 300)]), None);

    assert!(report.metrics.pauses_or_rhythm);
    assert_eq!(report.metrics.undetected_seconds, 10.0);
    assert_eq!(report.metrics.inadequate_postures, 0);
    assert_eq!(report.metrics.extreme_articular_angles, 0);
    assert_eq!(report.metrics.static_postures, 0);
    assert!(!report.metrics.repetitive_movements);
    assert!(!report.metrics.forced_postures);
    assert_eq!(report.metrics.postural_risk, RiskLevel::Low);
    assert_eq!(report.findings, vec![Finding::NoRelevantRisk]);
}

#[test]
fn test_ten_seconds_undetected_exclusive() {
    let mut config = PipelineConfig::default();
    config.risk.pause_inclusive = false;
    let report = pipeline(config).run(&sequence(&[(Pose::NoPerson, 300)]), None);

    assert!(!report.metrics.pauses_or_rhythm);
    assert_eq!(report.metrics.inadequate_postures, 0);
    assert_eq!(report.metrics.postural_risk, RiskLevel::Low);
}

/// `events` persistent trunk events plus `extremes` isolated overhead frames
fn mixed_session(events: usize, extremes: usize) -> PoseSequence {
    let mut segments = Vec::new();
    for _ in 0..events {
        segments.push((Pose::Bent, 100));
        segments.push((Pose::Standing, 20));
    }
    for _ in 0..extremes {
        segments.push((Pose::ArmOverhead, 1));
        segments.push((Pose::Standing, 5));
    }
    sequence(&segments)
}

#[test]
fn test_extreme_frames_do_not_raise_canonical_risk() {
    let pipeline = pipeline(PipelineConfig::default());

    let report = pipeline.run(&mixed_session(4, 2), None);
    assert_eq!(report.metrics.inadequate_postures, 4);
    assert_eq!(report.metrics.extreme_articular_angles, 2);
    assert_eq!(report.metrics.postural_risk, RiskLevel::Low);

    let report = pipeline.run(&mixed_session(5, 2), None);
    assert_eq!(report.metrics.inadequate_postures, 5);
    assert_eq!(report.metrics.postural_risk, RiskLevel::Moderate);
    assert!(report.findings.contains(&Finding::ElevatedRisk {
        level: RiskLevel::Moderate
    }));
}

#[test]
fn test_combined_basis_counts_extreme_frames() {
    let mut config = PipelineConfig::default();
    config.risk.basis = RiskBasis::Combined;
    let pipeline = pipeline(config);

    assert_eq!(
        pipeline.run(&mixed_session(4, 0), None).metrics.postural_risk,
        RiskLevel::Low
    );
    assert_eq!(
        pipeline.run(&mixed_session(4, 2), None).metrics.postural_risk,
        RiskLevel::Moderate
    );
}

#[test]
fn test_frame_skip_scales_durations() {
    let config = PipelineConfig {
        time_base: TimeBase::new(30.0, 3),
        ..Default::default()
    };
    let pipeline = pipeline(config);
    assert_eq!(pipeline.persistence().min_frames(), 30);

    let report = pipeline.run(&sequence(&[(Pose::Bent, 40)]), None);
    assert_eq!(report.events.len(), 1);
    assert_eq!(report.events[0].duration_seconds, 4.0);
    assert_eq!(report.metrics.analyzed_seconds, 4.0);
}

#[test]
fn test_spatial_keypoints() {
    let frames: Vec<RawFrame> = (0..100)
        .map(|_| {
            let mut frame = raw(Pose::Bent);
            for point in &mut frame.keypoints {
                point.push(5.0);
            }
            frame
        })
        .collect();
    let sequence = PoseSequence::from_raw(frames, Dimensionality::Spatial);
    let report = pipeline(PipelineConfig::default()).run(&sequence, None);

    assert_eq!(report.metrics.undetected_frames, 0);
    assert_eq!(report.metrics.events_of(DeviationType::TrunkInclination), 1);
}

#[test]
fn test_progress_reported_per_chunk() {
    let seen = Mutex::new(Vec::new());
    let observer = |fraction: f64| -> Result<(), ObserverError> {
        seen.lock().unwrap().push(fraction);
        Ok(())
    };

    let report = pipeline(PipelineConfig::default()).run(
        &sequence(&[(Pose::Standing, 600)]),
        Some(&observer as &dyn ProgressObserver),
    );
    assert_eq!(report.metrics.total_frames, 600);

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), 3);
    assert!(seen.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(seen.last().copied(), Some(1.0));
}

#[test]
fn test_empty_input_reports_completion() {
    let calls = Mutex::new(0);
    let observer = |fraction: f64| -> Result<(), ObserverError> {
        assert_eq!(fraction, 1.0);
        *calls.lock().unwrap() += 1;
        Ok(())
    };
    let report = pipeline(PipelineConfig::default()).run(&sequence(&[]), Some(&observer));
    assert_eq!(*calls.lock().unwrap(), 1);
    assert_eq!(report.metrics.postural_risk, RiskLevel::Low);
}

#[test]
fn test_failing_observer_does_not_change_result() {
    let session = mixed_session(5, 3);
    let pipeline = pipeline(PipelineConfig::default());

    let failing = |_: f64| -> Result<(), ObserverError> { Err(ObserverError("gone".into())) };
    let panicking = |_: f64| -> Result<(), ObserverError> { panic!("observer bug") };

    let baseline = pipeline.run(&session, None);
    for observer in [&failing as &dyn ProgressObserver, &panicking] {
        let report = pipeline.run(&session, Some(observer));
        assert_eq!(report.metrics, baseline.metrics);
        assert_eq!(report.events, baseline.events);
        assert_ne!(report.run_id, baseline.run_id);
    }
}

#[test]
fn test_report_serializes() {
    let report = pipeline(PipelineConfig::default()).run(&sequence(&[(Pose::Bent, 100)]), None);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["metrics"]["inadequate_postures"], 1);
    assert_eq!(json["metrics"]["postural_risk"], "Low");
    assert_eq!(json["events"][0]["kind"], "trunk_inclination");
    assert_eq!(json["events"][0]["start_frame"], 0);
    assert!(json["frame_angles"][0]["trunk_inclination"].is_number());
    assert!(json["run_id"].is_string());
}
