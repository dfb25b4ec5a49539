//! IMU classifier stage (spec.md §4.5): invokes the pluggable [`Classifier`]
//! on each materialized window and, on a positive verdict, records the peak
//! sample as the latest result and queues the window's last sample for GPS
//! verification.

use std::collections::VecDeque;

use crate::error::{log_classifier_error, ClassifierError};
use crate::telemetry::LogSink;

use super::sample::Sample;
use super::window::FixedWindow;
use super::{CrashResult, PipelineResult, ResultKind};

/// Verdict a [`Classifier`] returns for a single fixed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierVerdict {
    None,
    CrashImuOnly,
}

/// The extension point for swapping in a learned model (spec.md §4.2,
/// §9 "Classifier swap"). The reference implementation is
/// [`PeakThresholdClassifier`].
pub trait Classifier {
    fn classify(&self, window: &FixedWindow) -> Result<ClassifierVerdict, ClassifierError>;
}

/// Reference classifier: `CRASH_IMU_ONLY` iff the window's peak magnitude
/// exceeds `crash_threshold`, a pure function that never fails.
#[derive(Debug, Clone, Copy)]
pub struct PeakThresholdClassifier {
    crash_threshold: f64,
}

impl PeakThresholdClassifier {
    pub fn new(crash_threshold: f64) -> Self {
        Self { crash_threshold }
    }
}

impl Classifier for PeakThresholdClassifier {
    fn classify(&self, window: &FixedWindow) -> Result<ClassifierVerdict, ClassifierError> {
        if window.is_empty() {
            return Err(ClassifierError::InvalidWindow {
                expected_len: 1,
                actual_len: 0,
            });
        }
        let verdict = if window.peak().v > self.crash_threshold {
            ClassifierVerdict::CrashImuOnly
        } else {
            ClassifierVerdict::None
        };
        Ok(verdict)
    }
}

/// Pop and classify one window from `window_queue`. A classifier failure
/// is logged at ERROR and treated as `NONE` (spec.md §7).
pub fn process_one(
    window_queue: &mut VecDeque<FixedWindow>,
    classifier: &dyn Classifier,
    potential_crash_queue: &mut VecDeque<Sample>,
    latest_result: &mut CrashResult,
    log_sink: &dyn LogSink,
) -> PipelineResult {
    let Some(window) = window_queue.pop_front() else {
        return PipelineResult {
            kind: ResultKind::None,
            more_work: false,
        };
    };

    let verdict = match classifier.classify(&window) {
        Ok(verdict) => verdict,
        Err(err) => {
            log_classifier_error(log_sink, &err, "pipeline::classifier");
            ClassifierVerdict::None
        }
    };

    let kind = match verdict {
        ClassifierVerdict::CrashImuOnly => {
            let peak = window.peak();
            *latest_result = CrashResult {
                t: peak.t,
                magnitude: peak.v,
            };
            potential_crash_queue.push_back(window.last());
            ResultKind::CrashImuOnly
        }
        ClassifierVerdict::None => ResultKind::None,
    };

    PipelineResult {
        kind,
        more_work: !window_queue.is_empty(),
    }
}
