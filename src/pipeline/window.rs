//! Window extractor (spec.md §4.4): turns over-threshold candidates into
//! fixed-rate resampled windows once the accelerometer buffer brackets them.

use std::collections::VecDeque;

use crate::config::DetectorConfig;
use crate::spline::SplineInterpolator;

use super::sample::{Sample, SampleBuffer};

/// Floating-point slack for the inclusive upper bound of the resampling
/// loop (spec.md §4.4: "included if floating-point accumulation leaves it
/// within ε").
const STEP_EPS: f64 = 1e-9;

/// A materialized, uniformly resampled window of `(t, v)` pairs spanning
/// `[center - imu_half_window, center + imu_half_window]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedWindow {
    samples: Vec<Sample>,
}

impl FixedWindow {
    /// Test-only constructor for building a window directly from values,
    /// bypassing bracket/resample (see `pipeline::classifier`'s tests).
    #[cfg(test)]
    pub(crate) fn from_samples(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The sample with the largest magnitude (ties resolve to the earlier
    /// one encountered).
    pub fn peak(&self) -> Sample {
        self.samples
            .iter()
            .copied()
            .fold(self.samples[0], |best, s| if s.v > best.v { s } else { best })
    }

    /// The last sample of the window, pushed onto the potential-crash
    /// queue on a positive classification instead of the peak (spec.md
    /// §4.5).
    pub fn last(&self) -> Sample {
        *self.samples.last().expect("fixed window is never empty")
    }
}

/// Named after the source's unimplemented adaptive post-processing stage
/// (GLOSSARY "Variable window"); identical in shape to [`FixedWindow`]
/// until that stage exists.
pub type VariableWindow = FixedWindow;

/// An identity seam named after the source's unimplemented adaptive
/// post-processing stage (spec.md §9 Open Question (a)). No transformation
/// happens here; it exists only so a future adaptive stage has a single
/// call site to change.
pub fn to_variable_window(window: FixedWindow) -> VariableWindow {
    window
}

/// Process every candidate currently at the front of `candidates` that the
/// accelerometer buffer can bracket, pushing a [`FixedWindow`] onto
/// `window_queue` for each. Stops at the first candidate the buffer
/// doesn't yet cover on the right; candidates that have aged out on the
/// left are discarded and do not stop the loop (spec.md §4.4).
pub fn extract_all(
    candidates: &mut VecDeque<Sample>,
    acc_buffer: &SampleBuffer,
    config: &DetectorConfig,
    window_queue: &mut VecDeque<FixedWindow>,
    fit_spline: &dyn Fn(&[f64], &[f64]) -> Box<dyn SplineInterpolator>,
) {
    let mut spline: Option<Box<dyn SplineInterpolator>> = None;

    loop {
        let Some(p) = candidates.front().copied() else {
            break;
        };
        let (Some(front), Some(back)) = (acc_buffer.front(), acc_buffer.back()) else {
            break;
        };

        if p.t - config.imu_half_window < front.t {
            candidates.pop_front();
            continue;
        }
        if p.t + config.imu_half_window > back.t {
            break;
        }

        // The buffer is unchanged across every candidate this call
        // brackets, so fit the spline once and reuse it.
        let spline = spline.get_or_insert_with(|| {
            let xs: Vec<f64> = acc_buffer.iter().map(|s| s.t).collect();
            let ys: Vec<f64> = acc_buffer.iter().map(|s| s.v).collect();
            fit_spline(&xs, &ys)
        });

        let step = config.imu_sample_period();
        let end = p.t + config.imu_half_window;
        let mut samples = Vec::new();
        let mut t = p.t - config.imu_half_window;
        while t <= end + STEP_EPS {
            samples.push(Sample::new(t, spline.evaluate(t)));
            t += step;
        }

        window_queue.push_back(FixedWindow { samples });
        candidates.pop_front();
    }
}
