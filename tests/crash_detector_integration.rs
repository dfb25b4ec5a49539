//! End-to-end scenarios and invariants from spec.md §8, driven entirely
//! through the public `CrashDetector` surface.

use crash_detector::config::DetectorConfig;
use crash_detector::detector::CrashDetector;
use crash_detector::pipeline::ResultKind;
use crash_detector::testing::fixtures;

fn replay(detector: &mut CrashDetector, imu: &[(f64, f64)], gps: &[(f64, f64)]) -> Vec<ResultKind> {
    let mut imu_iter = imu.iter().peekable();
    let mut gps_iter = gps.iter().peekable();
    let mut events = Vec::new();

    loop {
        let next_is_imu = match (imu_iter.peek(), gps_iter.peek()) {
            (Some((imu_t, _)), Some((gps_t, _))) => imu_t <= gps_t,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };

        if next_is_imu {
            let &(t, v) = imu_iter.next().unwrap();
            detector.add_accelerometer(t, v);
        } else {
            let &(t, v) = gps_iter.next().unwrap();
            detector.add_gps(t, v);
        }

        loop {
            let result = detector.process_unit();
            if result.kind != ResultKind::None {
                events.push(result.kind);
            }
            if !result.more_work {
                break;
            }
        }
    }

    events
}

#[test]
fn scenario_1_silent_stream_never_crashes() {
    let config = DetectorConfig::default();
    let (imu, gps) = fixtures::silent_stream(&config);
    let imu: Vec<(f64, f64)> = imu.iter().map(|s| (s.t, s.v)).collect();
    let gps: Vec<(f64, f64)> = gps.iter().map(|s| (s.t, s.v)).collect();

    let mut detector = CrashDetector::with_config(config);
    let events = replay(&mut detector, &imu, &gps);

    assert!(events.is_empty(), "silent stream produced {events:?}");
}

#[test]
fn scenario_2_single_strong_hit_stopped_confirms() {
    let config = DetectorConfig::default();
    let (imu, gps) = fixtures::single_strong_hit_stopped(&config);
    let imu: Vec<(f64, f64)> = imu.iter().map(|s| (s.t, s.v)).collect();
    let gps: Vec<(f64, f64)> = gps.iter().map(|s| (s.t, s.v)).collect();

    let mut detector = CrashDetector::with_config(config.clone());
    let events = replay(&mut detector, &imu, &gps);

    assert!(events.contains(&ResultKind::CrashImuOnly));
    assert!(events.contains(&ResultKind::CrashGps));
    // GPS confirmation overwrites latest-result with the potential-crash
    // queue entry (the window's last sample, spec.md §4.6), not the peak
    // CRASH_IMU_ONLY reported — see detector::tests for the peak assertion
    // at the moment CRASH_IMU_ONLY actually fires.
    let crash = detector.get_crash_result();
    assert!((crash.magnitude - config.g).abs() < 1e-6);
}

#[test]
fn scenario_3_hit_but_moving_rejects_gps() {
    let config = DetectorConfig::default();
    let (imu, gps) = fixtures::hit_but_vehicle_moving(&config);
    let imu: Vec<(f64, f64)> = imu.iter().map(|s| (s.t, s.v)).collect();
    let gps: Vec<(f64, f64)> = gps.iter().map(|s| (s.t, s.v)).collect();

    let mut detector = CrashDetector::with_config(config);
    let events = replay(&mut detector, &imu, &gps);

    assert!(events.contains(&ResultKind::CrashImuOnly));
    assert!(!events.contains(&ResultKind::CrashGps));
}

#[test]
fn scenario_4_second_hit_within_dedup_window_is_dropped_p3() {
    let config = DetectorConfig::default();
    let (imu, gps) = fixtures::two_hits_ten_seconds_apart_stopped(&config);
    let imu: Vec<(f64, f64)> = imu.iter().map(|s| (s.t, s.v)).collect();
    let gps: Vec<(f64, f64)> = gps.iter().map(|s| (s.t, s.v)).collect();

    let mut detector = CrashDetector::with_config(config);
    let events = replay(&mut detector, &imu, &gps);

    let confirmed = events
        .iter()
        .filter(|k| **k == ResultKind::CrashGps)
        .count();
    assert_eq!(confirmed, 1, "dedup should leave exactly one confirmed crash");
}

#[test]
fn scenario_5_borderline_spike_never_classifies_b2() {
    let config = DetectorConfig::default();
    let (imu, gps) = fixtures::borderline_spike(&config);
    let imu: Vec<(f64, f64)> = imu.iter().map(|s| (s.t, s.v)).collect();
    let gps: Vec<(f64, f64)> = gps.iter().map(|s| (s.t, s.v)).collect();

    let mut detector = CrashDetector::with_config(config);
    let events = replay(&mut detector, &imu, &gps);

    assert!(events.is_empty());
}

#[test]
fn scenario_6_out_of_order_feed_b4() {
    let mut detector = CrashDetector::new();
    let mut accepted = Vec::new();
    for &(t, v) in &fixtures::out_of_order_feed() {
        accepted.push(detector.add_accelerometer(t, v));
    }

    assert_eq!(accepted, vec![true, false, true]);
    assert_eq!(detector.counters().out_of_order_accelerometer, 1);
    assert_eq!(detector.counters().accepted_accelerometer, 2);
}

#[test]
fn p5_samples_below_preprocessing_threshold_never_crash() {
    let config = DetectorConfig::default();
    let mut detector = CrashDetector::with_config(config.clone());

    let mut t = 0.0;
    while t <= 60.0 {
        detector.add_accelerometer(t, config.preprocessing_threshold());
        t += config.imu_sample_period();
    }

    let result = detector.process_to_result();
    assert_eq!(result.kind, ResultKind::None);
}

#[test]
fn r1_drained_detector_is_a_no_op() {
    let mut detector = CrashDetector::new();
    let result = detector.process_to_result();
    assert_eq!(result.kind, ResultKind::None);
    assert!(!result.more_work);
}

#[test]
fn b4_out_of_order_sample_leaves_counters_unchanged() {
    let mut detector = CrashDetector::new();
    detector.add_accelerometer(10.0, 1.0);
    let before = detector.counters();
    assert!(!detector.add_accelerometer(5.0, 1.0));
    let after = detector.counters();
    assert_eq!(before.accepted_accelerometer, after.accepted_accelerometer);
    assert_eq!(after.out_of_order_accelerometer, 1);
}

#[test]
fn r2_deterministic_given_fixed_config() {
    let config = DetectorConfig::default();
    let (imu, gps) = fixtures::single_strong_hit_stopped(&config);
    let imu: Vec<(f64, f64)> = imu.iter().map(|s| (s.t, s.v)).collect();
    let gps: Vec<(f64, f64)> = gps.iter().map(|s| (s.t, s.v)).collect();

    let mut first = CrashDetector::with_config(config.clone());
    let first_events = replay(&mut first, &imu, &gps);

    let mut second = CrashDetector::with_config(config);
    let second_events = replay(&mut second, &imu, &gps);

    assert_eq!(first_events, second_events);
    assert_eq!(first.get_crash_result(), second.get_crash_result());
}
