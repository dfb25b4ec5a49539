// Errors a wrapped classifier backend may report.
//
// The reference `PeakThresholdClassifier` (pipeline::classifier) is a pure
// function and never produces one of these. They exist for a learned-model
// classifier plugged in behind the `Classifier` trait, per spec.md §7:
// "Implementers wrapping a learned model must treat its failures as NONE
// and log at ERROR."

use std::fmt;

use crate::error::ErrorCode;

/// Error code range: 2001-2003.
pub struct ClassifierErrorCodes;

impl ClassifierErrorCodes {
    pub const UNAVAILABLE: i32 = 2001;
    pub const INVALID_WINDOW: i32 = 2002;
    pub const BACKEND_FAILURE: i32 = 2003;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// The classifier backend (e.g. a learned model) is not loaded or ready.
    Unavailable,
    /// The window passed to the classifier did not have the expected shape.
    InvalidWindow { expected_len: usize, actual_len: usize },
    /// The backend ran but reported a failure.
    BackendFailure { details: String },
}

impl ErrorCode for ClassifierError {
    fn code(&self) -> i32 {
        match self {
            ClassifierError::Unavailable => ClassifierErrorCodes::UNAVAILABLE,
            ClassifierError::InvalidWindow { .. } => ClassifierErrorCodes::INVALID_WINDOW,
            ClassifierError::BackendFailure { .. } => ClassifierErrorCodes::BACKEND_FAILURE,
        }
    }

    fn message(&self) -> String {
        match self {
            ClassifierError::Unavailable => "classifier backend unavailable".to_string(),
            ClassifierError::InvalidWindow {
                expected_len,
                actual_len,
            } => format!(
                "window has {actual_len} samples, expected {expected_len}"
            ),
            ClassifierError::BackendFailure { details } => {
                format!("classifier backend failure: {details}")
            }
        }
    }
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassifierError (code {}): {}", self.code(), self.message())
    }
}

impl std::error::Error for ClassifierError {}

/// Log a classifier error at ERROR severity through the given sink, per
/// spec.md §7's "treat its failures as NONE and log at ERROR".
pub fn log_classifier_error(
    sink: &dyn crate::telemetry::LogSink,
    err: &ClassifierError,
    context: &str,
) {
    sink.log(
        crate::telemetry::Severity::Error,
        context,
        &format!("code={} message={}", err.code(), err.message()),
    );
}
