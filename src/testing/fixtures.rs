//! Deterministic sample-stream generators for the end-to-end scenarios in
//! spec.md §8. Each function returns the literal inputs the scenario
//! prescribes so tests can feed them through a `CrashDetector` and assert on
//! the emitted results.

use crate::config::DetectorConfig;
use crate::pipeline::Sample;

/// A constant-magnitude stream at `frequency` Hz over `[0, duration]`
/// (inclusive), with each listed `(t, magnitude_g)` spike spliced in at its
/// exact timestamp, replacing whatever grid sample would have landed there.
pub fn imu_stream_with_spikes(
    duration: f64,
    frequency: f64,
    base_g: f64,
    g: f64,
    spikes: &[(f64, f64)],
) -> Vec<Sample> {
    let dt = 1.0 / frequency;
    let mut samples = Vec::new();
    let mut t = 0.0;
    while t <= duration + 1e-9 {
        samples.push(Sample::new(t, base_g * g));
        t += dt;
    }

    for &(spike_t, spike_g) in spikes {
        samples.retain(|s| (s.t - spike_t).abs() > 1e-6);
        samples.push(Sample::new(spike_t, spike_g * g));
    }
    samples.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap());
    samples
}

/// A constant-speed GPS stream at `frequency` Hz over `[0, duration]`.
pub fn gps_stream_constant(duration: f64, frequency: f64, speed: f64) -> Vec<Sample> {
    let dt = 1.0 / frequency;
    let mut samples = Vec::new();
    let mut t = 0.0;
    while t <= duration + 1e-9 {
        samples.push(Sample::new(t, speed));
        t += dt;
    }
    samples
}

/// Scenario 1: 300 s of IMU at constant 1.0 g and GPS at 0 m/s. No crash
/// should ever surface.
pub fn silent_stream(config: &DetectorConfig) -> (Vec<Sample>, Vec<Sample>) {
    (
        imu_stream_with_spikes(300.0, config.imu_sampling_frequency, 1.0, config.g, &[]),
        gps_stream_constant(300.0, config.gps_sampling_frequency, 0.0),
    )
}

/// Scenario 2: a single 3.0 g spike at `t=100.0`, vehicle stopped
/// (0.5 m/s GPS). Expect `CRASH_IMU_ONLY` then `CRASH_GPS`.
pub fn single_strong_hit_stopped(config: &DetectorConfig) -> (Vec<Sample>, Vec<Sample>) {
    (
        imu_stream_with_spikes(
            230.0,
            config.imu_sampling_frequency,
            1.0,
            config.g,
            &[(100.0, 3.0)],
        ),
        gps_stream_constant(230.0, config.gps_sampling_frequency, 0.5),
    )
}

/// Scenario 3: same spike, but the vehicle keeps moving at 10 m/s. Expect
/// `CRASH_IMU_ONLY` but GPS verification rejects.
pub fn hit_but_vehicle_moving(config: &DetectorConfig) -> (Vec<Sample>, Vec<Sample>) {
    (
        imu_stream_with_spikes(
            230.0,
            config.imu_sampling_frequency,
            1.0,
            config.g,
            &[(100.0, 3.0)],
        ),
        gps_stream_constant(230.0, config.gps_sampling_frequency, 10.0),
    )
}

/// Scenario 4: two spikes 10 s apart, vehicle stopped. Expect one
/// `CRASH_GPS` at `t=100.0`; the second candidate is dropped by dedup.
pub fn two_hits_ten_seconds_apart_stopped(config: &DetectorConfig) -> (Vec<Sample>, Vec<Sample>) {
    (
        imu_stream_with_spikes(
            240.0,
            config.imu_sampling_frequency,
            1.0,
            config.g,
            &[(100.0, 3.0), (110.0, 3.0)],
        ),
        gps_stream_constant(240.0, config.gps_sampling_frequency, 0.0),
    )
}

/// Scenario 5: a spike at exactly `crash_threshold` (2.5 g). Expect no
/// `CRASH_IMU_ONLY` (strict `>`).
pub fn borderline_spike(config: &DetectorConfig) -> (Vec<Sample>, Vec<Sample>) {
    (
        imu_stream_with_spikes(
            150.0,
            config.imu_sampling_frequency,
            1.0,
            config.g,
            &[(100.0, 2.5)],
        ),
        gps_stream_constant(150.0, config.gps_sampling_frequency, 0.0),
    )
}

/// Scenario 6: out-of-order IMU feed. Expect acceptance flags
/// `[true, false, true]` and a final buffer of `[10.0, 11.0]`.
pub fn out_of_order_feed() -> Vec<(f64, f64)> {
    vec![(10.0, 0.0), (5.0, 0.0), (11.0, 0.0)]
}
