//! GPS verifier (spec.md §4.6): delays each potential crash until the GPS
//! buffer has accumulated enough post-event coverage, then accepts or
//! rejects it against the low-speed criterion, deduplicating against the
//! last confirmed crash.

use std::collections::VecDeque;

use crate::config::DetectorConfig;

use super::sample::{Sample, SampleBuffer};
use super::{CrashResult, PipelineResult, ResultKind};

/// De-duplication state (spec.md §3), set on every confirmed `CRASH_GPS`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GpsVerifier {
    crash_detected: bool,
    t_last_crash: f64,
    magnitude_last_crash: f64,
}

impl GpsVerifier {
    pub fn t_last_crash(&self) -> Option<f64> {
        self.crash_detected.then_some(self.t_last_crash)
    }

    pub fn magnitude_last_crash(&self) -> Option<f64> {
        self.crash_detected.then_some(self.magnitude_last_crash)
    }

    /// Evaluate the head of `potential_crash_queue` against the gates in
    /// spec.md §4.6, in order. Any gate failure returns `NONE` without
    /// popping; a completed evaluation (dedup-drop, rejected, or
    /// confirmed) always pops.
    pub fn process_one(
        &mut self,
        potential_crash_queue: &mut VecDeque<Sample>,
        gps_buffer: &SampleBuffer,
        config: &DetectorConfig,
        latest_result: &mut CrashResult,
    ) -> PipelineResult {
        let no_work = PipelineResult {
            kind: ResultKind::None,
            more_work: false,
        };

        let Some(c) = potential_crash_queue.front().copied() else {
            return no_work;
        };

        if gps_buffer.len() < config.minimum_gps_points_in_window {
            return no_work;
        }
        if gps_buffer.is_empty() || gps_buffer.span() < config.gps_window_time {
            return no_work;
        }
        let front = gps_buffer.front().expect("non-empty, checked above");
        if front.t < c.t + config.gps_delay_time {
            return no_work;
        }

        if self.crash_detected && c.t < self.t_last_crash + config.minimum_time_between_crashes {
            potential_crash_queue.pop_front();
            return PipelineResult {
                kind: ResultKind::None,
                more_work: true,
            };
        }

        let moving = Self::low_speed_criterion_fails(gps_buffer, config);
        potential_crash_queue.pop_front();

        if moving {
            return PipelineResult {
                kind: ResultKind::None,
                more_work: true,
            };
        }

        self.crash_detected = true;
        self.t_last_crash = c.t;
        self.magnitude_last_crash = c.v;
        *latest_result = CrashResult {
            t: c.t,
            magnitude: c.v,
        };

        PipelineResult {
            kind: ResultKind::CrashGps,
            more_work: true,
        }
    }

    /// `true` if the vehicle was still moving: five or more consecutive
    /// samples above `gps_speed_threshold` anywhere in the buffer.
    fn low_speed_criterion_fails(gps_buffer: &SampleBuffer, config: &DetectorConfig) -> bool {
        let mut consecutive = 0u32;
        for sample in gps_buffer.iter() {
            if sample.v > config.gps_speed_threshold {
                consecutive += 1;
                if consecutive >= config.gps_consecutive_over_speed_reject as u32 {
                    return true;
                }
            } else {
                consecutive = 0;
            }
        }
        false
    }
}
