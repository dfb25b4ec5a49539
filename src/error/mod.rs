// Error types for the crash detection pipeline.
//
// The pipeline itself never aborts (spec.md §7): every public operation
// completes and returns a result. These types cover the two places an
// ambient error taxonomy is still useful: a wrapped classifier backend that
// can genuinely fail, and config loading, which is I/O.

mod classifier;
mod config;

pub use classifier::{log_classifier_error, ClassifierError, ClassifierErrorCodes};
pub use config::ConfigError;

/// Standard way to get a numeric code and message from an error type,
/// suitable for structured logging via the detector's log sink.
pub trait ErrorCode {
    fn code(&self) -> i32;
    fn message(&self) -> String;
}
