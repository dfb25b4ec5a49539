//! The five-stage streaming crash-detection pipeline (spec.md §2, §4):
//! sample ingress, threshold pre-filter, window extractor, IMU classifier
//! stage, GPS verifier. [`crate::detector::CrashDetector`] owns one instance
//! of each and drives them through [`PipelineResult`].

pub mod classifier;
pub mod gps;
pub mod sample;
pub mod threshold;
pub mod window;

pub use classifier::{Classifier, ClassifierVerdict, PeakThresholdClassifier};
pub use gps::GpsVerifier;
pub use sample::{Sample, SampleBuffer};
pub use threshold::ThresholdPreFilter;
pub use window::{to_variable_window, FixedWindow, VariableWindow};

/// The `{t, magnitude}` record exposed to the client (spec.md §3 "Latest
/// result"), overwritten on every `CRASH_IMU_ONLY` or `CRASH_GPS` emission.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CrashResult {
    pub t: f64,
    pub magnitude: f64,
}

/// The outcome type a stage or `process_unit` reports (spec.md §4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    None,
    CrashImuOnly,
    CrashGps,
}

/// `{more_work, type}` from spec.md §6's `process_unit`/`process_to_result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineResult {
    pub kind: ResultKind,
    pub more_work: bool,
}

impl PipelineResult {
    pub const fn drained() -> Self {
        Self {
            kind: ResultKind::None,
            more_work: false,
        }
    }
}
