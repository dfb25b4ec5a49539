//! Logging sink abstraction for the crash detection pipeline.
//!
//! spec.md treats logging as an external collaborator: a callback taking
//! `(severity, tag, message)`. Internally the pipeline logs through the `log`
//! facade exactly as the rest of this codebase's ancestry does; this module
//! additionally exposes that external callback seam so a host application can
//! observe pipeline events without installing a global `log` logger.

use std::sync::Arc;

use once_cell::sync::Lazy;

/// Severity levels, matching spec.md §6 exactly. `log::Level` has no
/// `Verbose` variant, so it is mapped onto `log::Level::Trace`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Warn,
    Info,
    Debug,
    Verbose,
}

impl Severity {
    fn as_log_level(self) -> log::Level {
        match self {
            Severity::Error => log::Level::Error,
            Severity::Warn => log::Level::Warn,
            Severity::Info => log::Level::Info,
            Severity::Debug => log::Level::Debug,
            Severity::Verbose => log::Level::Trace,
        }
    }
}

/// External logging callback contract: `(severity, tag, message)`.
pub trait LogSink: Send + Sync {
    fn log(&self, severity: Severity, tag: &str, message: &str);
}

impl<F> LogSink for F
where
    F: Fn(Severity, &str, &str) + Send + Sync,
{
    fn log(&self, severity: Severity, tag: &str, message: &str) {
        (self)(severity, tag, message)
    }
}

/// Default sink: forwards into the `log` crate, same as the teacher's own
/// internal `log::info!`/`log::warn!` call sites.
pub struct LogCrateSink;

impl LogSink for LogCrateSink {
    fn log(&self, severity: Severity, tag: &str, message: &str) {
        log::log!(severity.as_log_level(), "[{tag}] {message}");
    }
}

/// Process-wide default hub, used when a `CrashDetector` is not given an
/// explicit sink via [`crate::detector::CrashDetector::with_log_sink`].
pub struct TelemetryHub {
    sink: Arc<dyn LogSink>,
}

impl TelemetryHub {
    fn new() -> Self {
        Self {
            sink: Arc::new(LogCrateSink),
        }
    }

    pub fn sink(&self) -> Arc<dyn LogSink> {
        Arc::clone(&self.sink)
    }
}

static HUB: Lazy<TelemetryHub> = Lazy::new(TelemetryHub::new);

/// Access the global telemetry hub.
pub fn hub() -> &'static TelemetryHub {
    &HUB
}
