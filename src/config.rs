//! Configuration for the crash detection pipeline.
//!
//! Reference values come from spec.md §6. Loading from a JSON file allows
//! tuning the thresholds without recompiling; a bad or missing file falls
//! back to defaults rather than failing the caller, matching the teacher's
//! `AppConfig::load_from_file` behavior.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Tunable parameters for the crash detection pipeline.
///
/// Derived quantities (thresholds in SI units, buffer spans) are computed
/// accessor methods rather than additional stored fields, so there is a
/// single source of truth for each value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Acceleration due to gravity, m/s^2.
    pub g: f64,
    /// Pre-filter threshold, in multiples of `g`.
    pub preprocessing_threshold_g: f64,
    /// Classifier decision threshold, in multiples of `g`.
    pub crash_threshold_g: f64,
    /// GPS low-speed criterion threshold, m/s.
    pub gps_speed_threshold: f64,
    /// Half-width of the IMU resampled window, seconds.
    pub imu_half_window: f64,
    /// IMU resampling rate, Hz.
    pub imu_sampling_frequency: f64,
    /// GPS post-event coverage span required before verifying, seconds.
    pub gps_window_time: f64,
    /// Delay after a candidate before GPS coverage is trusted, seconds.
    pub gps_delay_time: f64,
    /// Minimum spacing between two confirmed crashes, seconds.
    pub minimum_time_between_crashes: f64,
    /// GPS sampling rate, Hz (used to derive buffer eviction precision).
    pub gps_sampling_frequency: f64,
    /// Consecutive over-speed GPS samples that reject the low-speed criterion.
    pub gps_consecutive_over_speed_reject: usize,
    /// Minimum number of GPS points required before verification runs at all.
    pub minimum_gps_points_in_window: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            g: 9.80665,
            preprocessing_threshold_g: 2.1,
            crash_threshold_g: 2.5,
            gps_speed_threshold: 2.7,
            imu_half_window: 1.0,
            imu_sampling_frequency: 9.0,
            gps_window_time: 30.0,
            gps_delay_time: 90.0,
            minimum_time_between_crashes: 20.0,
            gps_sampling_frequency: 1.0,
            gps_consecutive_over_speed_reject: 5,
            minimum_gps_points_in_window: 0,
        }
    }
}

impl DetectorConfig {
    /// Pre-filter threshold in m/s^2.
    pub fn preprocessing_threshold(&self) -> f64 {
        self.preprocessing_threshold_g * self.g
    }

    /// Classifier decision threshold in m/s^2.
    pub fn crash_threshold(&self) -> f64 {
        self.crash_threshold_g * self.g
    }

    /// Accelerometer buffer span bound: `2 * imu_half_window + gps_window_precision`.
    pub fn accelerometer_buffer_span(&self) -> f64 {
        2.0 * self.imu_half_window + self.gps_window_precision()
    }

    /// GPS buffer span bound: `gps_window_time + gps_window_precision`.
    pub fn gps_buffer_span(&self) -> f64 {
        self.gps_window_time + self.gps_window_precision()
    }

    /// `1.0 / gps_sampling_frequency`, the eviction slack spec.md §3 allows.
    pub fn gps_window_precision(&self) -> f64 {
        1.0 / self.gps_sampling_frequency
    }

    /// IMU resampling step, seconds.
    pub fn imu_sample_period(&self) -> f64 {
        1.0 / self.imu_sampling_frequency
    }

    /// Load configuration from a JSON file, falling back to defaults (with a
    /// warning logged) if the file is missing or malformed.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[config] loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[config] failed to parse JSON from {:?}: {err}. Using defaults.",
                        path.as_ref()
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[config] failed to read config file {:?}: {err}. Using defaults.",
                    path.as_ref()
                );
                Self::default()
            }
        }
    }

    /// Strict variant of [`Self::load_from_file`] that surfaces I/O and parse
    /// errors instead of silently falling back.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
