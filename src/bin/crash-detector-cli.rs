use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crash_detector::testing::fixtures;
use crash_detector::{CrashDetector, DetectorConfig, ResultKind};

#[derive(Parser, Debug)]
#[command(
    name = "crash-detector-cli",
    about = "Deterministic replay harness for the streaming crash detector"
)]
struct Cli {
    /// Override the detector configuration (falls back to reference defaults)
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a JSON sample file and print every non-NONE result
    Replay {
        #[arg(long)]
        input: PathBuf,
    },
    /// Run one of the built-in end-to-end scenarios (spec.md §8)
    Scenario {
        #[arg(value_enum)]
        name: ScenarioName,
    },
    /// Print the active configuration as JSON
    DumpConfig,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum ScenarioName {
    Silent,
    SingleHitStopped,
    HitVehicleMoving,
    TwoHitsStopped,
    BorderlineSpike,
}

#[derive(Debug, Deserialize)]
struct ReplayInput {
    accelerometer: Vec<(f64, f64)>,
    gps: Vec<(f64, f64)>,
}

#[derive(Debug, Serialize)]
struct ReplayEvent {
    kind: String,
    t: f64,
    magnitude: f64,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Replay { input } => run_replay(config, &input),
        Commands::Scenario { name } => run_scenario(config, name),
        Commands::DumpConfig => run_dump_config(&config),
    }
}

fn load_config(path: &Option<PathBuf>) -> Result<DetectorConfig> {
    match path {
        Some(path) => DetectorConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(DetectorConfig::default()),
    }
}

fn run_replay(config: DetectorConfig, input: &PathBuf) -> Result<ExitCode> {
    let contents =
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let parsed: ReplayInput =
        serde_json::from_str(&contents).with_context(|| "parsing replay input")?;

    let mut detector = CrashDetector::with_config(config);
    replay(&mut detector, &parsed.accelerometer, &parsed.gps)?;

    Ok(ExitCode::from(0))
}

fn run_scenario(config: DetectorConfig, name: ScenarioName) -> Result<ExitCode> {
    let (imu, gps) = match name {
        ScenarioName::Silent => fixtures::silent_stream(&config),
        ScenarioName::SingleHitStopped => fixtures::single_strong_hit_stopped(&config),
        ScenarioName::HitVehicleMoving => fixtures::hit_but_vehicle_moving(&config),
        ScenarioName::TwoHitsStopped => fixtures::two_hits_ten_seconds_apart_stopped(&config),
        ScenarioName::BorderlineSpike => fixtures::borderline_spike(&config),
    };
    let imu: Vec<(f64, f64)> = imu.iter().map(|s| (s.t, s.v)).collect();
    let gps: Vec<(f64, f64)> = gps.iter().map(|s| (s.t, s.v)).collect();

    let mut detector = CrashDetector::with_config(config);
    replay(&mut detector, &imu, &gps)?;

    Ok(ExitCode::from(0))
}

fn run_dump_config(config: &DetectorConfig) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(ExitCode::from(0))
}

/// Feed accelerometer and GPS samples in timestamp order, printing every
/// non-`NONE` result `process_unit` surfaces along the way.
fn replay(detector: &mut CrashDetector, imu: &[(f64, f64)], gps: &[(f64, f64)]) -> Result<()> {
    let mut imu_iter = imu.iter().peekable();
    let mut gps_iter = gps.iter().peekable();

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
                let crash = detector.get_crash_result();
                let event = ReplayEvent {
                    kind: match result.kind {
                        ResultKind::CrashImuOnly => "CRASH_IMU_ONLY".to_string(),
                        ResultKind::CrashGps => "CRASH_GPS".to_string(),
                        ResultKind::None => unreachable!(),
                    },
                    t: crash.t,
                    magnitude: crash.magnitude,
                };
                println!("{}", serde_json::to_string(&event)?);
            }
            if !result.more_work {
                break;
            }
        }
    }

    Ok(())
}
