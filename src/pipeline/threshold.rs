//! Threshold pre-filter (spec.md §4.3): scans newly arrived accelerometer
//! samples and pushes the ones above `preprocessing_threshold` onto the
//! over-threshold queue, advancing `previous_thresholded_t` as it goes.

use std::collections::VecDeque;

use super::sample::{Sample, SampleBuffer};

/// Owns the `previous_thresholded_t` tracker state (spec.md §3).
///
/// Starts at negative infinity rather than `0.0` so a sample arriving with
/// `t = 0.0` is still examined; the source's `0.0` sentinel only works
/// because its timestamps are assumed positive, which this type does not
/// assume.
#[derive(Debug, Clone)]
pub struct ThresholdPreFilter {
    previous_thresholded_t: f64,
}

impl Default for ThresholdPreFilter {
    fn default() -> Self {
        Self {
            previous_thresholded_t: f64::NEG_INFINITY,
        }
    }
}

impl ThresholdPreFilter {
    pub fn previous_thresholded_t(&self) -> f64 {
        self.previous_thresholded_t
    }

    /// Examine every accelerometer sample with `t > previous_thresholded_t`,
    /// in timestamp order, pushing the ones with `v > threshold` onto
    /// `queue`. Every examined sample advances the tracker exactly once
    /// (P4: classified at most once).
    pub fn scan(&mut self, acc_buffer: &SampleBuffer, threshold: f64, queue: &mut VecDeque<Sample>) {
        let already_scanned = self.previous_thresholded_t;
        let unscanned = acc_buffer
            .iter()
            .skip_while(|s| s.t <= already_scanned);

        for sample in unscanned {
            if sample.v > threshold {
                queue.push_back(*sample);
            }
            self.previous_thresholded_t = sample.t;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_above_threshold_are_queued() {
        let mut buf = SampleBuffer::new(100.0);
        buf.push(1.0, 5.0);
        buf.push(2.0, 30.0);
        buf.push(3.0, 1.0);

        let mut filter = ThresholdPreFilter::default();
        let mut queue = VecDeque::new();
        filter.scan(&buf, 10.0, &mut queue);

        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].t, 2.0);
    }

    #[test]
    fn exact_threshold_is_excluded_b1() {
        let mut buf = SampleBuffer::new(100.0);
        buf.push(1.0, 10.0);

        let mut filter = ThresholdPreFilter::default();
        let mut queue = VecDeque::new();
        filter.scan(&buf, 10.0, &mut queue);

        assert!(queue.is_empty());
    }

    #[test]
    fn each_sample_examined_at_most_once_p4() {
        let mut buf = SampleBuffer::new(100.0);
        buf.push(1.0, 30.0);

        let mut filter = ThresholdPreFilter::default();
        let mut queue = VecDeque::new();
        filter.scan(&buf, 10.0, &mut queue);
        filter.scan(&buf, 10.0, &mut queue);

        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn no_op_once_caught_up() {
        let mut buf = SampleBuffer::new(100.0);
        buf.push(1.0, 30.0);

        let mut filter = ThresholdPreFilter::default();
        let mut queue = VecDeque::new();
        filter.scan(&buf, 10.0, &mut queue);
        assert_eq!(filter.previous_thresholded_t(), 1.0);

        filter.scan(&buf, 10.0, &mut queue);
        assert_eq!(filter.previous_thresholded_t(), 1.0);
    }
}
