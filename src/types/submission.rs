//! Submission types
//!
//! A submission is one accelerometer burst plus the GPS fix reported with it.
//! The upstream HTTP/validation layer constructs it once per request; the
//! pipeline consumes it read-only.

use serde::{Deserialize, Serialize};

/// One raw Z-axis accelerometer reading.
///
/// Timestamps are seconds (device monotonic clock or epoch; the pipeline
/// only uses differences) and must be non-decreasing within a burst.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// Sample time in seconds
    pub timestamp: f64,
    /// Vertical acceleration (m/s²)
    pub z_accel: f64,
}

impl SensorSample {
    pub fn new(timestamp: f64, z_accel: f64) -> Self {
        Self { timestamp, z_accel }
    }
}

/// One accelerometer burst with its GPS fix, as accepted from a device.
///
/// Clients either ship per-sample timestamps or a flat value array with a
/// nominal rate; [`Submission::from_waveform`] normalises the flat form so
/// the rest of the pipeline only ever sees timestamped samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Device identifier, keys the per-device fix store
    pub device_id: String,
    /// Fix latitude (degrees)
    pub latitude: f64,
    /// Fix longitude (degrees)
    pub longitude: f64,
    /// Client-reported average speed over the burst window (km/h)
    pub speed_kmh: f64,
    /// Client-reported heading (degrees), carried through for the caller
    #[serde(default)]
    pub direction_deg: f64,
    /// Ordered burst samples, timestamps non-decreasing
    pub samples: Vec<SensorSample>,
}

impl Submission {
    /// Build a submission from explicitly timestamped samples.
    pub fn new(
        device_id: impl Into<String>,
        latitude: f64,
        longitude: f64,
        speed_kmh: f64,
        direction_deg: f64,
        samples: Vec<SensorSample>,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            latitude,
            longitude,
            speed_kmh,
            direction_deg,
            samples,
        }
    }

    /// Build a submission from a flat value array at a nominal sample rate.
    ///
    /// Timestamps are synthesised as `i / rate_hz` starting at zero, which
    /// makes the flat form indistinguishable from an evenly timestamped
    /// burst downstream.
    pub fn from_waveform(
        device_id: impl Into<String>,
        latitude: f64,
        longitude: f64,
        speed_kmh: f64,
        direction_deg: f64,
        z_values: &[f64],
        rate_hz: f64,
    ) -> Self {
        let dt = if rate_hz > 0.0 { 1.0 / rate_hz } else { 0.0 };
        let samples = z_values
            .iter()
            .enumerate()
            .map(|(i, &z)| SensorSample::new(i as f64 * dt, z))
            .collect();
        Self::new(device_id, latitude, longitude, speed_kmh, direction_deg, samples)
    }

    /// Burst duration in seconds (first to last timestamp).
    pub fn duration_secs(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.timestamp - first.timestamp,
            _ => 0.0,
        }
    }

    /// Timestamps are non-decreasing throughout the burst.
    pub fn timestamps_monotonic(&self) -> bool {
        self.samples
            .windows(2)
            .all(|w| w[1].timestamp >= w[0].timestamp)
    }
}
