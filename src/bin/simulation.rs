//! Road Survey Simulation
//!
//! Generates synthetic accelerometer bursts for a device driving a route
//! and scores them through the pipeline. Useful for exercising the full
//! signal path without a phone in a car:
//! - Smooth tarmac (low-amplitude noise)
//! - Rough chipseal (broadband vibration)
//! - Cobblestones (strong periodic excitation)
//! - Stops at junctions (speed below the gate threshold)
//!
//! # Usage
//! ```bash
//! ./roadscore-sim --bursts 20 --seed 42 | jq .roughness
//! ```

use clap::Parser;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;
use std::f64::consts::PI;

use roadscore::{PipelineConfig, RoughnessPipeline, Submission};

// ============================================================================
// Route Constants
// ============================================================================

/// Route start latitude (degrees)
const START_LAT: f64 = 52.090;
/// Route start longitude (degrees)
const START_LON: f64 = 5.120;
/// Cruise speed between stops (km/h)
const CRUISE_SPEED_KMH: f64 = 35.0;
/// Dominant chassis resonance excited by road texture (Hz)
const CHASSIS_RESONANCE_HZ: f64 = 12.0;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "roadscore-sim")]
#[command(about = "Synthetic road survey generator for the roughness pipeline")]
#[command(version = "1.0")]
struct Args {
    /// Number of bursts to generate
    #[arg(short, long, default_value = "12", value_parser = clap::value_parser!(u32).range(1..=10_000))]
    bursts: u32,

    /// Samples per burst
    #[arg(short = 'n', long, default_value = "256")]
    samples: usize,

    /// Accelerometer sample rate (Hz)
    #[arg(short, long, default_value = "104.0")]
    rate: f64,

    /// Timestamp jitter standard deviation as a fraction of the interval
    #[arg(short, long, default_value = "0.05")]
    jitter: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,
}

// ============================================================================
// Road Surfaces
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Surface {
    /// Fresh tarmac: faint broadband noise
    Smooth,
    /// Worn chipseal: noticeable broadband vibration
    Rough,
    /// Cobblestones: strong periodic excitation at the chassis resonance
    Cobbles,
    /// Junction stop: signal is pocket noise, speed under the gate
    Stopped,
}

impl Surface {
    fn for_burst(index: u32) -> Self {
        match index % 6 {
            0 | 1 => Self::Smooth,
            2 | 3 => Self::Rough,
            4 => Self::Cobbles,
            _ => Self::Stopped,
        }
    }

    fn speed_kmh(self) -> f64 {
        match self {
            Self::Stopped => 2.0,
            _ => CRUISE_SPEED_KMH,
        }
    }

    fn noise_std(self) -> f64 {
        match self {
            Self::Smooth => 0.05,
            Self::Rough => 0.6,
            Self::Cobbles => 0.4,
            Self::Stopped => 0.1,
        }
    }

    fn resonance_amplitude(self) -> f64 {
        match self {
            Self::Cobbles => 2.5,
            Self::Rough => 0.5,
            _ => 0.0,
        }
    }
}

// ============================================================================
// Burst Generation
// ============================================================================

fn generate_burst(
    args: &Args,
    surface: Surface,
    position: (f64, f64),
    rng: &mut StdRng,
) -> anyhow::Result<Submission> {
    let noise = Normal::new(0.0, surface.noise_std())?;
    let jitter = Normal::new(0.0, (args.jitter / args.rate).max(0.0))?;
    let dt = 1.0 / args.rate;

    let mut samples = Vec::with_capacity(args.samples);
    let mut t = 0.0_f64;
    for i in 0..args.samples {
        let nominal = i as f64 * dt;
        t = (nominal + jitter.sample(rng)).max(t); // keep timestamps non-decreasing
        let z = 9.81
            + surface.resonance_amplitude() * (2.0 * PI * CHASSIS_RESONANCE_HZ * nominal).sin()
            + noise.sample(rng);
        samples.push(roadscore::SensorSample::new(t, z));
    }

    Ok(Submission::new(
        "sim-device-1",
        position.0,
        position.1,
        surface.speed_kmh(),
        45.0,
        samples,
    ))
}

// ============================================================================
// Output
// ============================================================================

#[derive(Serialize)]
struct ScoredBurst<'a> {
    burst: u32,
    surface: &'a str,
    speed_kmh: f64,
    roughness: f64,
    vdv: f64,
    crest_factor: f64,
    distance_m: f64,
    gated: bool,
    degraded: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let pipeline = RoughnessPipeline::new(PipelineConfig::load());
    let mut position = (START_LAT, START_LON);

    for burst_index in 0..args.bursts {
        let surface = Surface::for_burst(burst_index);
        // March the route north-east ~80 m per burst; stopped bursts stay put.
        if surface != Surface::Stopped && burst_index > 0 {
            position.0 += 0.0005;
            position.1 += 0.0005;
        }
        let submission = generate_burst(&args, surface, position, &mut rng)?;

        match pipeline.process(&submission) {
            Ok(result) => {
                let line = ScoredBurst {
                    burst: burst_index,
                    surface: match surface {
                        Surface::Smooth => "smooth",
                        Surface::Rough => "rough",
                        Surface::Cobbles => "cobbles",
                        Surface::Stopped => "stopped",
                    },
                    speed_kmh: submission.speed_kmh,
                    roughness: result.roughness,
                    vdv: result.vdv,
                    crest_factor: result.crest_factor,
                    distance_m: result.distance_m,
                    gated: result.gated,
                    degraded: result.degraded,
                };
                println!("{}", serde_json::to_string(&line)?);
            }
            Err(err) => {
                tracing::error!(burst = burst_index, error = %err, "Simulated burst rejected");
            }
        }
    }

    Ok(())
}
