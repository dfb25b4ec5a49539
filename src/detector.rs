//! The scheduler (spec.md §4.7): owns every buffer and queue in the
//! pipeline and drives the stages in order behind `process_unit` /
//! `process_to_result`.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::config::DetectorConfig;
use crate::pipeline::{
    classifier, gps::GpsVerifier, sample::SampleBuffer, threshold::ThresholdPreFilter, window,
    Classifier, CrashResult, FixedWindow, PeakThresholdClassifier, PipelineResult, ResultKind,
    Sample,
};
use crate::spline::{NaturalCubicSpline, SplineInterpolator};
use crate::telemetry::{self, LogSink};

/// Mode control (spec.md §6, §9 Open Question (b)): stored but currently
/// has no observable effect on pipeline behavior, matching the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Off,
    On,
    Debug,
}

/// Accepted/out-of-order sample counts per channel (spec.md §3 "Counters"),
/// bookkeeping only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counters {
    pub accepted_accelerometer: u64,
    pub accepted_gps: u64,
    pub out_of_order_accelerometer: u64,
    pub out_of_order_gps: u64,
}

/// The detector instance. Owns all dynamic state for the lifetime of the
/// process; there is no persistence and no explicit teardown (spec.md §3
/// "Lifecycle").
pub struct CrashDetector {
    config: DetectorConfig,
    mode: Mode,
    log_sink: Arc<dyn LogSink>,

    accelerometer_buffer: SampleBuffer,
    gps_buffer: SampleBuffer,
    over_threshold_queue: VecDeque<Sample>,
    window_queue: VecDeque<FixedWindow>,
    potential_crash_queue: VecDeque<Sample>,

    threshold_filter: ThresholdPreFilter,
    classifier: Box<dyn Classifier>,
    gps_verifier: GpsVerifier,

    latest_result: CrashResult,
    counters: Counters,
}

impl CrashDetector {
    /// Build a detector with reference configuration (spec.md §6).
    pub fn new() -> Self {
        Self::with_config(DetectorConfig::default())
    }

    pub fn with_config(config: DetectorConfig) -> Self {
        let classifier = PeakThresholdClassifier::new(config.crash_threshold());
        let accelerometer_buffer = SampleBuffer::new(config.accelerometer_buffer_span());
        let gps_buffer = SampleBuffer::new(config.gps_buffer_span());

        Self {
            accelerometer_buffer,
            gps_buffer,
            over_threshold_queue: VecDeque::new(),
            window_queue: VecDeque::new(),
            potential_crash_queue: VecDeque::new(),
            threshold_filter: ThresholdPreFilter::default(),
            classifier: Box::new(classifier),
            gps_verifier: GpsVerifier::default(),
            latest_result: CrashResult::default(),
            counters: Counters::default(),
            mode: Mode::Off,
            log_sink: telemetry::hub().sink(),
            config,
        }
    }

    /// Swap the classifier backend (spec.md §9 "Classifier swap") — the
    /// extension point for a learned model.
    pub fn with_classifier(mut self, classifier: Box<dyn Classifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Report through `log_sink` instead of the process-wide telemetry hub.
    pub fn with_log_sink(mut self, log_sink: Arc<dyn LogSink>) -> Self {
        self.log_sink = log_sink;
        self
    }

    /// spec.md §4.1: append if strictly after the buffer's back sample.
    pub fn add_accelerometer(&mut self, t: f64, v: f64) -> bool {
        let accepted = self.accelerometer_buffer.push(t, v);
        if accepted {
            self.counters.accepted_accelerometer += 1;
        } else {
            self.counters.out_of_order_accelerometer += 1;
        }
        accepted
    }

    /// spec.md §4.1, GPS channel.
    pub fn add_gps(&mut self, t: f64, v: f64) -> bool {
        let accepted = self.gps_buffer.push(t, v);
        if accepted {
            self.counters.accepted_gps += 1;
        } else {
            self.counters.out_of_order_gps += 1;
        }
        accepted
    }

    /// Run the threshold pre-filter, window extractor, one iteration of the
    /// IMU classifier stage, and — only if that left nothing to report —
    /// one iteration of the GPS verifier (spec.md §4.7).
    pub fn process_unit(&mut self) -> PipelineResult {
        self.threshold_filter.scan(
            &self.accelerometer_buffer,
            self.config.preprocessing_threshold(),
            &mut self.over_threshold_queue,
        );

        window::extract_all(
            &mut self.over_threshold_queue,
            &self.accelerometer_buffer,
            &self.config,
            &mut self.window_queue,
            &fit_natural_cubic_spline,
        );

        let classifier_result = classifier::process_one(
            &mut self.window_queue,
            self.classifier.as_ref(),
            &mut self.potential_crash_queue,
            &mut self.latest_result,
            self.log_sink.as_ref(),
        );

        if classifier_result.kind != ResultKind::None || classifier_result.more_work {
            return classifier_result;
        }

        self.gps_verifier.process_one(
            &mut self.potential_crash_queue,
            &self.gps_buffer,
            &self.config,
            &mut self.latest_result,
        )
    }

    /// Drive `process_unit` until a crash is emitted or the pipeline is
    /// drained (spec.md §4.7).
    pub fn process_to_result(&mut self) -> PipelineResult {
        loop {
            let result = self.process_unit();
            if result.kind != ResultKind::None || !result.more_work {
                return result;
            }
        }
    }

    pub fn get_crash_result(&self) -> CrashResult {
        self.latest_result
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }
}

impl Default for CrashDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn fit_natural_cubic_spline(xs: &[f64], ys: &[f64]) -> Box<dyn SplineInterpolator> {
    Box::new(NaturalCubicSpline::fit(xs, ys))
}
