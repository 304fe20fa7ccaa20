//! Analysis pipeline

use data_validator::Validate;
use event_segmenter::{EventSegmenter, PersistenceFilter};
use keypoints::{PoseFrame, PoseSequence};
use posture::{FrameClassification, FrameClassifier};
use rayon::prelude::*;
use risk_assessment::{diagnose, MetricsAggregator};
use tracing::{debug, info, info_span};

use crate::config::PipelineConfig;
use crate::context::RunContext;
use crate::observer::{notify, ProgressObserver};
use crate::report::{AnalysisReport, EventRecord, FrameAngleRecord};
use crate::PipelineError;

/// Validated, reusable analysis pipeline
pub struct ErgoPipeline {
    config: PipelineConfig,
    classifier: FrameClassifier,
    segmenter: EventSegmenter,
    persistence: PersistenceFilter,
    aggregator: MetricsAggregator,
}

impl ErgoPipeline {
    /// Validate every parameter and build the stages.
    ///
    /// Fails before any frame is processed.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validated()?;

        let classifier = FrameClassifier::new(config.posture.clone())?;
        let persistence =
            PersistenceFilter::from_seconds(config.min_persistence_seconds, &config.time_base);
        let aggregator = MetricsAggregator::new(config.risk.clone(), config.time_base)?;

        info!(
            fps = config.time_base.fps,
            frame_skip = config.time_base.frame_skip,
            min_frames = persistence.min_frames(),
            "Analysis pipeline ready"
        );

        Ok(Self {
            config,
            classifier,
            segmenter: EventSegmenter::new(),
            persistence,
            aggregator,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn persistence(&self) -> &PersistenceFilter {
        &self.persistence
    }

    /// Analyze a complete pose sequence.
    ///
    /// Per-frame problems never abort the run; they surface as undetected
    /// frames in the metrics.
    pub fn run(
        &self,
        sequence: &PoseSequence,
        observer: Option<&dyn ProgressObserver>,
    ) -> AnalysisReport {
        let mut ctx = RunContext::new(self.config.time_base);
        let span = info_span!("analysis_run", run_id = %ctx.run_id);
        let _enter = span.enter();

        info!(
            frames = sequence.len(),
            dimensionality = ?sequence.dimensionality(),
            "Starting analysis run"
        );

        let classifications = self.classify_frames(sequence.frames(), observer);
        for frame in &classifications {
            ctx.record(frame);
        }

        let samples = classifications
            .iter()
            .flat_map(|frame| frame.deviations().iter().copied());
        let segmented = self.segmenter.segment_by_type(samples);
        let segmented_count = segmented.len();
        let events = self.persistence.apply(segmented);
        debug!(
            segmented = segmented_count,
            persistent = events.len(),
            "Events segmented"
        );

        let metrics = self.aggregator.aggregate(&events, &ctx.tally);
        let findings = diagnose(&metrics, &events, self.aggregator.config());

        let tb = ctx.time_base;
        let frame_angles = classifications
            .iter()
            .filter_map(|frame| {
                frame.angles().map(|angles| FrameAngleRecord {
                    frame: frame.index(),
                    elapsed_seconds: tb.timestamp(frame.index()),
                    angles: *angles,
                })
            })
            .collect();
        let events = events
            .into_iter()
            .map(|event| EventRecord::new(event, &tb))
            .collect();

        info!(
            risk = %metrics.postural_risk,
            inadequate_postures = metrics.inadequate_postures,
            "Analysis run complete"
        );

        AnalysisReport {
            run_id: ctx.run_id,
            time_base: tb,
            metrics,
            events,
            frame_angles,
            findings,
        }
    }

    /// Classify frames in parallel chunks, reporting progress after each chunk
    fn classify_frames(
        &self,
        frames: &[PoseFrame],
        observer: Option<&dyn ProgressObserver>,
    ) -> Vec<FrameClassification> {
        let total = frames.len();
        let mut classifications = Vec::with_capacity(total);

        for chunk in frames.chunks(self.config.progress_chunk) {
            let classified: Vec<_> = chunk
                .par_iter()
                .map(|frame| self.classifier.classify(frame))
                .collect();
            classifications.extend(classified);
            notify(observer, classifications.len() as f64 / total as f64);
        }
        if total == 0 {
            notify(observer, 1.0);
        }

        classifications.sort_by_key(FrameClassification::index);
        classifications
    }
}
